//! Racket-vs-shuttle mini-game: canvas renderer, pointer input and the
//! frame-driven game loop.
//!
//! The rally logic itself (session state, physics, opponent controller) is
//! pure Rust in the submodules; this module owns the browser side: canvas and
//! DOM handles, event listeners, and a `requestAnimationFrame` chain with an
//! explicit cancellable handle so start/restart can never leave two live
//! loops behind.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Element, HtmlAudioElement, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, MouseEvent, window,
};

use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod ai;
pub mod physics;
pub mod session;

use session::{Court, GameSession, RACKET_HEIGHT, RACKET_WIDTH, Side};

/// Canvas size used when the page markup does not provide the court itself.
const COURT_WIDTH: u32 = 800;
const COURT_HEIGHT: u32 = 400;

/// Half the shuttle sprite's visual size; the DOM sprite is larger than the
/// physics radius and is anchored by its center.
const SPRITE_HALF_SIZE: f64 = 32.0;

/// Browser-side handles plus the owned rally session.
struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scoreboard: Option<Element>,
    sprite: Option<HtmlElement>,
    start_btn: Option<HtmlElement>,
    restart_btn: Option<HtmlElement>,
    racket_img: HtmlImageElement,
    hit_sound: Option<HtmlAudioElement>,
    session: GameSession,
    rng: StdRng,
    /// Pending animation frame, if one is scheduled. Cancelling a handle that
    /// already fired is a no-op, which keeps restart idempotent.
    raf_handle: Option<i32>,
}

thread_local! {
    static GAME_STATE: std::cell::RefCell<Option<GameState>> = std::cell::RefCell::new(None);
    static GAME_LOOP: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Wire up the game surface and controls. Safe to call on pages without the
/// game section: missing elements simply stay unwired.
pub fn init_game() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the court canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("gameCanvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("gameCanvas");
        c.set_width(COURT_WIDTH);
        c.set_height(COURT_HEIGHT);
        c.set_attribute(
            "style",
            "display:block; margin:0 auto; border:2px solid #222; border-radius:8px;",
        )
        .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let scoreboard = doc.get_element_by_id("scoreboard");
    let sprite: Option<HtmlElement> = doc
        .get_element_by_id("shuttleSprite")
        .and_then(|el| el.dyn_into().ok());
    let start_btn: Option<HtmlElement> = doc
        .get_element_by_id("startBtn")
        .and_then(|el| el.dyn_into().ok());
    let restart_btn: Option<HtmlElement> = doc
        .get_element_by_id("restartBtn")
        .and_then(|el| el.dyn_into().ok());

    // Assets load asynchronously; rendering falls back until they are ready
    // and the hit sound stays silent if audio is unavailable.
    let racket_img = HtmlImageElement::new()?;
    racket_img.set_src("images/racket.png");
    let hit_sound = HtmlAudioElement::new_with_src("audio/hit.mp3").ok();

    let court = Court::new(canvas.width() as f64, canvas.height() as f64);
    let state = GameState {
        canvas: canvas.clone(),
        ctx,
        scoreboard,
        sprite,
        start_btn,
        restart_btn,
        racket_img,
        hit_sound,
        session: GameSession::new(court),
        rng: StdRng::from_entropy(),
        raf_handle: None,
    };

    // Idle UI: restart hidden, sprite hidden until a session starts.
    if let Some(btn) = &state.restart_btn {
        set_display(btn, "none");
    }
    if let Some(sprite) = &state.sprite {
        sprite.class_list().add_1("hidden").ok();
    }

    GAME_STATE.with(|cell| cell.replace(Some(state)));
    ensure_loop_closure();

    // Pointer input: vertical position drives the player racket.
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    if !state.session.is_running {
                        return;
                    }
                    let mouse_y = evt.offset_y() as f64;
                    state.session.player.y = mouse_y - RACKET_HEIGHT / 2.0;
                    let court = state.session.court;
                    state.session.player.clamp_to(&court);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Start control: only valid while idle.
    if let Some(btn) = doc.get_element_by_id("startBtn") {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            begin_session(false);
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Restart control: valid any time, cancels the pending frame first.
    if let Some(btn) = doc.get_element_by_id("restartBtn") {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            begin_session(true);
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

// --- Lifecycle ---------------------------------------------------------------

/// Idle -> Running, or Running -> Running on restart. Always cancels any
/// pending frame before scheduling so exactly one loop chain survives.
fn begin_session(restart: bool) {
    let mut begun = false;
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            if !restart && state.session.is_running {
                return;
            }
            cancel_pending_frame(state);
            state.session.reset_for_start(&mut state.rng);
            apply_running_ui(state);
            begun = true;
        }
    });
    if begun {
        schedule_frame();
    }
}

/// Running -> Ended: announce the winner, revert the UI, stop the loop.
fn finish_session(state: &mut GameState, winner: Side) {
    let message = match winner {
        Side::Player => "You win!",
        Side::Opponent => "Opponent wins!",
    };
    if let Some(win) = window() {
        win.alert_with_message(message).ok();
    }
    state.session.end();
    apply_idle_ui(state);
    cancel_pending_frame(state);
}

fn apply_running_ui(state: &GameState) {
    if let Some(btn) = &state.start_btn {
        set_display(btn, "none");
    }
    if let Some(btn) = &state.restart_btn {
        set_display(btn, "inline-block");
    }
    if let Some(sprite) = &state.sprite {
        sprite.class_list().remove_1("hidden").ok();
        sprite.class_list().add_1("rotate").ok();
    }
}

fn apply_idle_ui(state: &GameState) {
    if let Some(btn) = &state.start_btn {
        set_display(btn, "inline-block");
    }
    if let Some(btn) = &state.restart_btn {
        set_display(btn, "none");
    }
    if let Some(sprite) = &state.sprite {
        sprite.class_list().add_1("hidden").ok();
        sprite.class_list().remove_1("rotate").ok();
    }
}

fn set_display(el: &HtmlElement, value: &str) {
    el.style().set_property("display", value).ok();
}

// --- Frame scheduling --------------------------------------------------------

/// Build the shared loop closure once. Each firing renders, advances physics,
/// updates the opponent, then reschedules itself while the session runs; a
/// frame observed while not running clears the handle and lets the chain die.
fn ensure_loop_closure() {
    GAME_LOOP.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let chain = slot.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            let mut keep_running = false;
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    if state.session.is_running {
                        game_tick(state);
                        keep_running = state.session.is_running;
                    }
                    if !keep_running {
                        state.raf_handle = None;
                    }
                }
            });
            if keep_running {
                if let Some(handle) = request_frame(&chain) {
                    store_frame_handle(handle);
                }
            }
        }) as Box<dyn FnMut(f64)>));
    });
}

fn schedule_frame() {
    GAME_LOOP.with(|chain| {
        if let Some(handle) = request_frame(chain) {
            store_frame_handle(handle);
        }
    });
}

fn request_frame(chain: &FrameCallback) -> Option<i32> {
    let win = window()?;
    let slot = chain.borrow();
    let closure = slot.as_ref()?;
    win.request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

fn store_frame_handle(handle: i32) {
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.raf_handle = Some(handle);
        }
    });
}

/// Cancelling with no pending frame is a no-op.
fn cancel_pending_frame(state: &mut GameState) {
    if let Some(handle) = state.raf_handle.take() {
        if let Some(win) = window() {
            win.cancel_animation_frame(handle).ok();
        }
    }
}

// --- Tick --------------------------------------------------------------------

fn game_tick(state: &mut GameState) {
    render(state);

    let outcome = physics::advance(&mut state.session, &mut state.rng);
    if outcome.player_hit {
        if let Some(audio) = &state.hit_sound {
            let _ = audio.play();
        }
    }
    if outcome.scored.is_some() {
        if let Some(winner) = state.session.winner() {
            finish_session(state, winner);
        }
    }

    let shuttle_y = state.session.shuttle.y;
    let court = state.session.court;
    ai::update_opponent(&mut state.session.opponent, shuttle_y, &court);
}

// --- Rendering ---------------------------------------------------------------

/// Draw the whole frame from current session state; mutates nothing.
fn render(state: &GameState) {
    let court = state.session.court;
    let ctx = &state.ctx;

    ctx.clear_rect(
        0.0,
        0.0,
        state.canvas.width() as f64,
        state.canvas.height() as f64,
    );

    // Court background and center dividing line.
    ctx.set_fill_style_str("#4caf50");
    ctx.fill_rect(0.0, 0.0, court.width, court.height);
    ctx.set_stroke_style_str("white");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(court.width / 2.0, 0.0);
    ctx.line_to(court.width / 2.0, court.height);
    ctx.stroke();

    draw_racket(state, 0.0, state.session.player.y);
    draw_racket(state, court.width - RACKET_WIDTH, state.session.opponent.y);
    position_shuttle_sprite(state);
    draw_score(state);
}

/// Racket image when loaded, solid placeholder rectangle otherwise.
fn draw_racket(state: &GameState, x: f64, y: f64) {
    if state.racket_img.complete() {
        state
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                &state.racket_img,
                x,
                y,
                RACKET_WIDTH,
                RACKET_HEIGHT,
            )
            .ok();
    } else {
        state.ctx.set_fill_style_str("blue");
        state.ctx.fill_rect(x, y, RACKET_WIDTH, RACKET_HEIGHT);
    }
}

/// Move the DOM shuttle sprite over the court; the sprite is anchored by its
/// visual center, which is larger than the physics radius.
fn position_shuttle_sprite(state: &GameState) {
    if let Some(sprite) = &state.sprite {
        let style = sprite.style();
        style
            .set_property(
                "left",
                &format!("{}px", state.session.shuttle.x - SPRITE_HALF_SIZE),
            )
            .ok();
        style
            .set_property(
                "top",
                &format!("{}px", state.session.shuttle.y - SPRITE_HALF_SIZE),
            )
            .ok();
    }
}

fn draw_score(state: &GameState) {
    if let Some(el) = &state.scoreboard {
        el.set_text_content(Some(&format!(
            "Player: {}  |  Opponent: {}",
            state.session.player_score, state.session.opponent_score
        )));
    }
}
