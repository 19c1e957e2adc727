//! Kana Shuffle core crate.
//!
//! Builds seeded hiragana / katakana practice grids for the Kana Shuffle page.
//! The same seed and settings always give the same grid; with no explicit seed
//! the local date is used, so everyone gets the same "daily" grid.
//!
//! The page keeps all DOM, i18n and persistence work on the JS side and talks
//! to this crate through [`KanaDrill`] and [`KanaTimer`].

use wasm_bindgen::prelude::*;

pub mod config;
mod drill;
pub mod generate;
pub mod kana;
mod logging;
pub mod prng;
pub mod session;
pub mod timer;

pub use config::{ConfigError, DrillConfig, GRID_SIZE, GridMode, day_seed};
pub use drill::{KanaDrill, KanaTimer, sanitize_seed, set_log_level, today_seed};
pub use generate::{FillStrategy, IndexStrategy, append_batch, generate_fixed};
pub use kana::{Cell, Pool, Row, RowSelection, Script, build_pool};
pub use prng::Prng;
pub use session::{Session, SessionCache, SessionKey};
pub use timer::Countdown;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}
