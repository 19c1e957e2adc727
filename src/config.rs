//! Drill configuration and boundary normalization.
//!
//! Everything arriving from the page (URL params, form fields, JSON) passes
//! through here. Lenient helpers clamp or drop bad input so the generation core
//! never sees it; the `FromStr` impls are strict and report a `ConfigError`.
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

use crate::generate::FillStrategy;
use crate::kana::{RowSelection, Script};
use crate::timer::{self, DEFAULT_TIMER_SECONDS};

/// Cells in a fixed grid.
pub const GRID_SIZE: usize = 50;
/// Per-symbol cap for unfiltered pools.
pub const DEFAULT_CAP: usize = 2;
/// No per-symbol cap once rows are filtered.
pub const FILTERED_CAP: Option<usize> = None;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown kana script '{0}'")]
    UnknownScript(String),
    #[error("unknown row '{0}'")]
    UnknownRow(String),
    #[error("unknown grid mode '{0}'")]
    UnknownMode(String),
    #[error("unknown fill strategy '{0}'")]
    UnknownStrategy(String),
    #[error("invalid time '{0}'")]
    InvalidTime(String),
    #[cfg(feature = "serde_json")]
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridMode {
    #[default]
    Fixed,
    Endless,
}

impl GridMode {
    pub fn name(self) -> &'static str {
        match self {
            GridMode::Fixed => "fixed",
            GridMode::Endless => "endless",
        }
    }

    /// URL flag parse: "1", "true" or "endless" turn endless mode on.
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "endless" => GridMode::Endless,
            _ => GridMode::Fixed,
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(GridMode::Fixed),
            "endless" => Ok(GridMode::Endless),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Lowercase and keep only `[a-z0-9]`. Idempotent.
pub fn sanitize_seed(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Seed for a calendar day, e.g. `day20261016`.
pub fn day_seed(date: NaiveDate) -> String {
    format!("day{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Day seed for today's local date.
pub fn today_seed() -> String {
    day_seed(Local::now().date_naive())
}

/// Everything needed to produce one drill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrillConfig {
    pub script: Script,
    pub dakuten: bool,
    pub rows: RowSelection,
    /// Raw seed as typed; empty selects the day seed.
    pub seed: String,
    pub mode: GridMode,
    pub strategy: FillStrategy,
    pub timer_seconds: u32,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            script: Script::Hiragana,
            dakuten: false,
            rows: RowSelection::none(),
            seed: String::new(),
            mode: GridMode::Fixed,
            strategy: FillStrategy::Balanced,
            timer_seconds: DEFAULT_TIMER_SECONDS,
        }
    }
}

impl DrillConfig {
    /// Sanitized seed and clamped timer; a zero timer falls back to the default.
    pub fn normalized(mut self) -> Self {
        self.seed = sanitize_seed(&self.seed);
        self.timer_seconds = match timer::clamp_timer_seconds(f64::from(self.timer_seconds)) {
            0 => DEFAULT_TIMER_SECONDS,
            secs => secs,
        };
        self
    }

    /// The seed actually used: the sanitized explicit seed, or the day seed
    /// for `today` when none is set.
    pub fn effective_seed(&self, today: NaiveDate) -> String {
        let seed = sanitize_seed(&self.seed);
        if seed.is_empty() { day_seed(today) } else { seed }
    }

    /// Per-symbol cap for a fixed grid over this pool: 2 normally, unlimited
    /// once a row filter shrinks the pool.
    pub fn cap_for(filtered: bool) -> Option<usize> {
        if filtered { FILTERED_CAP } else { Some(DEFAULT_CAP) }
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: DrillConfig = serde_json::from_str(json)?;
        Ok(cfg.normalized())
    }

    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
