//! Lane Tap core crate.
//!
//! Three lanes, notes falling toward a hit line, tap to score. The game logic
//! ([`game::Game`] and the modules it drives) is platform independent and
//! runs headless in native tests; [`web`] binds it to a canvas page.
//!
//! Expected page elements: `#gameCanvas`, `#score`, `#combo`, `#startBtn`,
//! `#pauseBtn`, `#stopBtn`, `.tap-zones button` (one per lane, in order) and
//! `.vinyl[data-difficulty]` selectors whose class list contains their key.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod hit;
pub mod lanes;
pub mod notes;
pub mod render;
pub mod scheduler;
pub mod score;
pub mod spawner;
mod web;

pub use config::GameConfig;
pub use difficulty::{DifficultyProfile, DifficultyTable};
pub use error::GameError;
pub use game::{Game, Phase};
pub use hit::HitOutcome;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Err only means a logger is already installed.
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

/// Binds the page and loads the default (easy) profile. Does not start play.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::boot(difficulty::builtin().clone())?;
    Ok(())
}

/// Same as [`start_game`] with a caller supplied JSON difficulty table. The
/// table must contain an `easy` profile, which is selected first.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_profiles(json: &str) -> Result<(), JsValue> {
    let table = DifficultyTable::from_json(json)?;
    web::boot(table)?;
    Ok(())
}
