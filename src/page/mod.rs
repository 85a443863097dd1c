//! Decorative page behavior: background slideshow, fullscreen controls,
//! window-size readout, hamburger nav and single-page section switching.
//!
//! None of this is gameplay; it is event-driven DOM glue. Every installer
//! tolerates missing elements so the crate can load on partial pages.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, Window,
    window,
};

pub mod quiz;

use crate::BACKGROUND_IMAGES;

/// Interval between background cross-fades.
const BACKGROUND_INTERVAL_MS: i32 = 5_000;

/// Fullscreen capability candidates, tried in order until one exists.
const ENTER_FULLSCREEN_CANDIDATES: &[&str] = &["requestFullscreen", "webkitRequestFullscreen"];
const EXIT_FULLSCREEN_CANDIDATES: &[&str] = &["exitFullscreen", "webkitExitFullscreen"];

/// Which slideshow layer is currently visible and which image comes next.
struct SlideshowState {
    index: usize,
    showing_first: bool,
}

thread_local! {
    static SLIDESHOW: std::cell::RefCell<SlideshowState> =
        std::cell::RefCell::new(SlideshowState { index: 0, showing_first: true });
}

/// Wire up all page behavior.
pub fn init_page() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    init_background_rotation(&win, &doc)?;
    init_fullscreen_controls(&doc)?;
    init_resize_readout(&win)?;
    init_nav_menu(&doc)?;
    init_section_switching(&doc)?;
    quiz::init_quiz(&doc)?;
    Ok(())
}

// --- Background slideshow ----------------------------------------------------

/// Two stacked background layers cross-fade by toggling a `hidden` class;
/// the hidden layer is retargeted to the next image before each swap.
fn init_background_rotation(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let bg1 = background_layer(doc, ".bg-image-1");
    let bg2 = background_layer(doc, ".bg-image-2");
    let (Some(bg1), Some(bg2)) = (bg1, bg2) else {
        return Ok(());
    };

    set_background_image(&bg1, BACKGROUND_IMAGES[0]);
    set_background_image(&bg2, BACKGROUND_IMAGES[1]);
    bg2.class_list().add_1("hidden").ok();

    let closure = Closure::wrap(Box::new(advance_background) as Box<dyn FnMut()>);
    win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        BACKGROUND_INTERVAL_MS,
    )?;
    closure.forget();
    Ok(())
}

fn advance_background() {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let bg1 = background_layer(&doc, ".bg-image-1");
    let bg2 = background_layer(&doc, ".bg-image-2");
    let (Some(bg1), Some(bg2)) = (bg1, bg2) else {
        return;
    };

    SLIDESHOW.with(|cell| {
        let mut slideshow = cell.borrow_mut();
        let next = (slideshow.index + 1) % BACKGROUND_IMAGES.len();
        let (incoming, outgoing) = if slideshow.showing_first {
            (&bg2, &bg1)
        } else {
            (&bg1, &bg2)
        };
        set_background_image(incoming, BACKGROUND_IMAGES[next]);
        incoming.class_list().remove_1("hidden").ok();
        outgoing.class_list().add_1("hidden").ok();
        slideshow.showing_first = !slideshow.showing_first;
        slideshow.index = next;
    });
}

fn background_layer(doc: &Document, selector: &str) -> Option<HtmlElement> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok())
}

fn set_background_image(layer: &HtmlElement, src: &str) {
    layer
        .style()
        .set_property("background-image", &format!("url('{src}')"))
        .ok();
}

// --- Fullscreen --------------------------------------------------------------

fn init_fullscreen_controls(doc: &Document) -> Result<(), JsValue> {
    if let Some(btn) = doc.query_selector("#btnFS")? {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            enter_fullscreen();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    if let Some(btn) = doc.query_selector("#btnWS")? {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            exit_fullscreen();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn enter_fullscreen() {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(root) = doc.document_element() {
            call_first_supported(root.as_ref(), ENTER_FULLSCREEN_CANDIDATES);
        }
    }
}

fn exit_fullscreen() {
    if let Some(doc) = window().and_then(|w| w.document()) {
        call_first_supported(doc.as_ref(), EXIT_FULLSCREEN_CANDIDATES);
    }
}

/// Invoke the first candidate method that exists on `target`. Engines expose
/// the fullscreen API under different names; when none match this is silently
/// a no-op.
fn call_first_supported(target: &JsValue, candidates: &[&str]) -> bool {
    for name in candidates {
        if let Ok(value) = js_sys::Reflect::get(target, &JsValue::from_str(name)) {
            if value.is_function() {
                let func: js_sys::Function = value.unchecked_into();
                let _ = func.call0(target);
                return true;
            }
        }
    }
    false
}

// --- Window size readout -----------------------------------------------------

fn init_resize_readout(win: &Window) -> Result<(), JsValue> {
    report_window_size();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        report_window_size();
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn report_window_size() {
    let Some(win) = window() else {
        return;
    };
    let Some(doc) = win.document() else {
        return;
    };
    if let Some(el) = doc.get_element_by_id("height") {
        if let Some(h) = win.inner_height().ok().and_then(|v| v.as_f64()) {
            el.set_text_content(Some(&format!("{}", h as i64)));
        }
    }
    if let Some(el) = doc.get_element_by_id("width") {
        if let Some(w) = win.inner_width().ok().and_then(|v| v.as_f64()) {
            el.set_text_content(Some(&format!("{}", w as i64)));
        }
    }
}

// --- Nav menu + section switching --------------------------------------------

fn init_nav_menu(doc: &Document) -> Result<(), JsValue> {
    if let Some(hamburger) = doc.query_selector(".hamburger")? {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            if let Some(doc) = window().and_then(|w| w.document()) {
                if let Ok(Some(nav)) = doc.query_selector(".nav-links") {
                    nav.class_list().toggle("active").ok();
                }
            }
        }) as Box<dyn FnMut(_)>);
        hamburger.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Each nav link reveals the `.page-section` named by its `data-target`,
/// scrolls back to the top anchor and closes the mobile nav.
fn init_section_switching(doc: &Document) -> Result<(), JsValue> {
    let links = doc.query_selector_all(".nav-links a")?;
    for i in 0..links.length() {
        let Some(node) = links.item(i) else {
            continue;
        };
        let Ok(link) = node.dyn_into::<Element>() else {
            continue;
        };
        let link_for_cb = link.clone();
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            evt.prevent_default();
            if let Some(target_id) = link_for_cb.get_attribute("data-target") {
                show_section(&target_id);
            }
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn show_section(target_id: &str) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };

    if let Ok(sections) = doc.query_selector_all(".page-section") {
        for i in 0..sections.length() {
            let Some(node) = sections.item(i) else {
                continue;
            };
            let Ok(section) = node.dyn_into::<Element>() else {
                continue;
            };
            let active = section.id() == target_id;
            section
                .class_list()
                .toggle_with_force("active", active)
                .ok();
        }
    }

    if let Some(top) = doc.get_element_by_id("top") {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        top.scroll_into_view_with_scroll_into_view_options(&opts);
    }

    // Close the mobile nav after a selection.
    if let Ok(Some(nav)) = doc.query_selector(".nav-links") {
        nav.class_list().remove_1("active").ok();
    }
}
