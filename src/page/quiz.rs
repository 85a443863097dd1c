//! Badminton quiz widget: radio-group selections graded against the fixed
//! answer key, with the result written to the score box.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlInputElement, MouseEvent, window};

use crate::QUIZ_ANSWER_KEY;

/// Outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

/// Grade selections (in answer-key order) against [`QUIZ_ANSWER_KEY`].
/// An unanswered question is skipped: it counts neither as correct nor as
/// incorrect, it just cannot contribute to the score.
pub fn grade<S: AsRef<str>>(selections: &[Option<S>]) -> QuizScore {
    let mut correct = 0;
    for ((_, answer), selection) in QUIZ_ANSWER_KEY.iter().zip(selections) {
        if let Some(value) = selection {
            if value.as_ref() == *answer {
                correct += 1;
            }
        }
    }
    QuizScore {
        correct,
        total: QUIZ_ANSWER_KEY.len(),
    }
}

/// Wire the submit button; pages without the quiz stay unwired.
pub fn init_quiz(doc: &Document) -> Result<(), JsValue> {
    if let Some(btn) = doc.query_selector("#btnSubmit")? {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            submit_quiz();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Re-grade from scratch on every submit and show `Score: n/total`.
fn submit_quiz() {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let selections: Vec<Option<String>> = QUIZ_ANSWER_KEY
        .iter()
        .map(|(group, _)| checked_value(&doc, group))
        .collect();
    let score = grade(&selections);
    if let Ok(Some(scorebox)) = doc.query_selector("#scorebox") {
        scorebox.set_text_content(Some(&format!("Score: {}/{}", score.correct, score.total)));
    }
}

/// Value of the checked radio in a group, if any option is selected.
fn checked_value(doc: &Document, group: &str) -> Option<String> {
    let selector = format!("input[name='{group}']:checked");
    let input = doc.query_selector(&selector).ok().flatten()?;
    let input: HtmlInputElement = input.dyn_into().ok()?;
    Some(input.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_wrong_answer_scores_two_of_three() {
        let score = grade(&[Some("21"), Some("Shuttlecock"), Some("3")]);
        assert_eq!(
            score,
            QuizScore {
                correct: 2,
                total: 3
            }
        );
    }

    #[test]
    fn no_selections_score_zero() {
        let score = grade::<&str>(&[None, None, None]);
        assert_eq!(
            score,
            QuizScore {
                correct: 0,
                total: 3
            }
        );
    }

    #[test]
    fn all_correct_scores_full() {
        let score = grade(&[Some("21"), Some("Shuttlecock"), Some("2")]);
        assert_eq!(score.correct, score.total);
    }

    #[test]
    fn skipped_question_does_not_block_the_rest() {
        let score = grade(&[None, Some("Shuttlecock"), Some("2")]);
        assert_eq!(
            score,
            QuizScore {
                correct: 2,
                total: 3
            }
        );
    }

    #[test]
    fn answers_are_compared_exactly() {
        let score = grade(&[Some("21 "), Some("shuttlecock"), Some("02")]);
        assert_eq!(score.correct, 0);
    }
}
