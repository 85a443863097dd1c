//! Shuttle Rally core crate.
//!
//! Drives the badminton fan page: decorative page behavior (background
//! slideshow, fullscreen, nav, quiz) lives in [`page`], the canvas
//! racket-vs-shuttle mini-game in [`game`]. `start_app()` is the single
//! entrypoint the page bootstrap calls after the wasm module loads.

use wasm_bindgen::prelude::*;

pub mod game;
pub mod page;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Shared page datasets
// -----------------------------------------------------------------------------

/// Background slideshow sources, rotated on a fixed 5s interval.
pub const BACKGROUND_IMAGES: &[&str] = &[
    "images/badminton1.jpg",
    "images/badminton2.jpg",
    "images/badminton3.jpg",
    "images/badminton4.jpg",
];

/// Quiz answer key: radio group name -> correct value.
pub const QUIZ_ANSWER_KEY: &[(&str, &str)] =
    &[("q1", "21"), ("q2", "Shuttlecock"), ("q3", "2")];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    page::init_page()?;
    game::init_game()
}
