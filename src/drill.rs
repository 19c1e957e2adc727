//! JS-facing drill handle.
//!
//! The page owns one `KanaDrill` and one `KanaTimer`; it reads indices and
//! glyphs from here and does all DOM work itself.
use wasm_bindgen::prelude::*;

use crate::config::{self, DrillConfig, GridMode};
use crate::generate::FillStrategy;
use crate::kana::{RowSelection, Script};
use crate::session::{Session, SessionCache, SessionKey};
use crate::timer::{Countdown, TickOutcome};

#[wasm_bindgen]
pub struct KanaDrill {
    config: DrillConfig,
    cache: SessionCache,
}

impl KanaDrill {
    /// Native constructor from an already-built config.
    pub fn with_config(config: DrillConfig) -> Self {
        Self {
            config: config.normalized(),
            cache: SessionCache::new(),
        }
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn session(&mut self) -> &mut Session {
        self.cache.ensure(SessionKey::for_today(&self.config))
    }
}

fn config_from_params(script: &str, dakuten: bool, rows: &str, seed: &str, endless: bool) -> DrillConfig {
    DrillConfig {
        script: Script::from_param(script),
        dakuten,
        rows: RowSelection::parse(rows),
        seed: seed.to_string(),
        mode: if endless { GridMode::Endless } else { GridMode::Fixed },
        ..DrillConfig::default()
    }
}

#[wasm_bindgen]
impl KanaDrill {
    /// Build from raw page parameters; every argument is normalized leniently.
    #[wasm_bindgen(constructor)]
    pub fn new(script: &str, dakuten: bool, rows: &str, seed: &str, endless: bool) -> KanaDrill {
        Self::with_config(config_from_params(script, dakuten, rows, seed, endless))
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<KanaDrill, JsValue> {
        let config = DrillConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_config(config))
    }

    /// Apply new settings. The session survives unless its key changed.
    pub fn reconfigure(&mut self, script: &str, dakuten: bool, rows: &str, seed: &str, endless: bool) {
        self.config = DrillConfig {
            timer_seconds: self.config.timer_seconds,
            strategy: self.config.strategy,
            ..config_from_params(script, dakuten, rows, seed, endless)
        }
        .normalized();
    }

    /// Switch between "balanced" and "weighted" fill.
    pub fn set_strategy(&mut self, name: &str) -> Result<(), JsValue> {
        self.config.strategy = name
            .parse::<FillStrategy>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Throw away the current session and regenerate from the seed.
    pub fn shuffle(&mut self) {
        self.cache.invalidate();
    }

    /// Fixed mode: the whole grid. Endless mode: everything generated so far,
    /// starting with a first batch of `initial` cells.
    pub fn grid(&mut self, initial: usize) -> Vec<u32> {
        let mode = self.config.mode;
        let session = self.session();
        let indices = match mode {
            GridMode::Fixed => session.fixed_indices(),
            GridMode::Endless => {
                if session.endless_indices().is_empty() {
                    session.extend_endless(initial);
                }
                session.endless_indices()
            }
        };
        to_u32(indices)
    }

    /// Endless mode: append `amount` cells and return their indices.
    /// Fixed mode has nothing to append and returns an empty list.
    pub fn more(&mut self, amount: usize) -> Vec<u32> {
        if self.config.mode == GridMode::Fixed {
            return Vec::new();
        }
        to_u32(self.session().extend_endless(amount))
    }

    pub fn pool_len(&mut self) -> usize {
        self.session().pool().len()
    }

    pub fn is_filtered(&mut self) -> bool {
        self.session().pool().is_filtered()
    }

    pub fn kana(&mut self, idx: usize) -> Option<String> {
        self.session().pool().get(idx).map(|(k, _)| k.to_string())
    }

    pub fn romaji(&mut self, idx: usize) -> Option<String> {
        self.session().pool().get(idx).map(|(_, r)| r.to_string())
    }

    pub fn seed_used(&mut self) -> String {
        self.session().seed().to_string()
    }

    pub fn is_endless(&self) -> bool {
        self.config.mode == GridMode::Endless
    }

    #[cfg(feature = "serde_json")]
    pub fn cells_json(&mut self) -> Result<String, JsValue> {
        let mode = self.config.mode;
        let session = self.session();
        let cells = match mode {
            GridMode::Fixed => session.fixed_cells(),
            GridMode::Endless => session.endless_cells(),
        };
        serde_json::to_string(&cells).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn to_u32(indices: &[usize]) -> Vec<u32> {
    indices.iter().map(|&i| i as u32).collect()
}

/// Countdown handle for the header timer.
#[wasm_bindgen]
pub struct KanaTimer {
    countdown: Countdown,
}

#[wasm_bindgen]
impl KanaTimer {
    #[wasm_bindgen(constructor)]
    pub fn new(seconds: f64) -> KanaTimer {
        let seconds = match crate::timer::clamp_timer_seconds(seconds) {
            0 => crate::timer::DEFAULT_TIMER_SECONDS,
            s => s,
        };
        KanaTimer {
            countdown: Countdown::new(seconds),
        }
    }

    /// Advance one second. Returns true exactly when time runs out.
    pub fn tick(&mut self) -> bool {
        self.countdown.tick() == TickOutcome::Finished
    }

    pub fn toggle(&mut self) {
        self.countdown.toggle();
    }

    pub fn start(&mut self) {
        self.countdown.start();
    }

    pub fn pause(&mut self) {
        self.countdown.pause();
    }

    /// Rewind; a time-input string ("HH:MM[:SS]") also sets a new duration.
    pub fn reset(&mut self, time_input: Option<String>) {
        let duration = time_input.as_deref().and_then(crate::timer::parse_time_input);
        self.countdown.reset(duration);
    }

    pub fn running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn display(&self) -> String {
        self.countdown.display()
    }

    pub fn time_input(&self) -> String {
        crate::timer::seconds_to_time_input(self.countdown.duration())
    }
}

#[wasm_bindgen]
pub fn sanitize_seed(raw: &str) -> String {
    config::sanitize_seed(raw)
}

#[wasm_bindgen]
pub fn today_seed() -> String {
    config::today_seed()
}

#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    log::set_max_level(crate::logging::parse_level(level));
}
