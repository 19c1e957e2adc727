//! Kana tables and the candidate pool a grid is drawn from.
//!
//! A pool is built in three steps: pick the script's table, keep the entries
//! matching the selected rows (all of them when no row is selected), then
//! optionally append dakuten / handakuten variants after the base entries.
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

mod diacritics;
mod hiragana;
mod katakana;
mod rows;

pub use diacritics::{DAKUTEN, DiacriticMap, HANDAKUTEN, Mark, semi_voiced_romaji, voiced_romaji};
pub use hiragana::HIRAGANA;
pub use katakana::KATAKANA;
pub use rows::{Row, RowSelection};

/// Romaji shared by both syllabaries; index `i` matches `kana[i]` of either table.
pub static ROMAJI: [&str; 46] = [
    "a", "i", "u", "e", "o",
    "ka", "ki", "ku", "ke", "ko",
    "sa", "shi", "su", "se", "so",
    "ta", "chi", "tsu", "te", "to",
    "na", "ni", "nu", "ne", "no",
    "ha", "hi", "fu", "he", "ho",
    "ma", "mi", "mu", "me", "mo",
    "ya", "yu", "yo",
    "ra", "ri", "ru", "re", "ro",
    "wa", "wo", "n",
];

/// Immutable parallel glyph / romaji lists for one script.
pub struct KanaTable {
    pub name: &'static str,
    pub kana: &'static [&'static str],
    pub romaji: &'static [&'static str],
}

impl KanaTable {
    pub fn len(&self) -> usize {
        self.kana.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kana.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.kana.iter().copied().zip(self.romaji.iter().copied())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Script {
    #[default]
    Hiragana,
    Katakana,
}

impl Script {
    pub fn table(self) -> &'static KanaTable {
        match self {
            Script::Hiragana => &HIRAGANA,
            Script::Katakana => &KATAKANA,
        }
    }

    pub fn name(self) -> &'static str {
        self.table().name
    }

    /// Boundary parse: anything that is not "katakana" means hiragana.
    pub fn from_param(raw: &str) -> Self {
        raw.trim().to_ascii_lowercase().parse::<Script>().unwrap_or_default()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Script {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hiragana" => Ok(Script::Hiragana),
            "katakana" => Ok(Script::Katakana),
            other => Err(ConfigError::UnknownScript(other.to_string())),
        }
    }
}

/// One rendered grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub kana: String,
    pub romaji: String,
}

/// Materialized candidates for one (script, dakuten, rows) configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pool {
    kana: Vec<&'static str>,
    romaji: Vec<String>,
    filtered: bool,
}

impl Pool {
    pub fn len(&self) -> usize {
        self.kana.len()
    }

    /// An empty pool means "nothing to render", never an error.
    pub fn is_empty(&self) -> bool {
        self.kana.is_empty()
    }

    /// Whether a row filter was active; filtered pools lift the per-symbol cap.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    pub fn kana(&self) -> &[&'static str] {
        &self.kana
    }

    pub fn romaji(&self) -> &[String] {
        &self.romaji
    }

    pub fn get(&self, idx: usize) -> Option<(&'static str, &str)> {
        Some((*self.kana.get(idx)?, self.romaji.get(idx)?.as_str()))
    }

    /// Resolve indices into cells; out-of-range indices are skipped.
    pub fn cells(&self, indices: &[usize]) -> Vec<Cell> {
        indices
            .iter()
            .filter_map(|&i| self.get(i))
            .map(|(kana, romaji)| Cell {
                kana: kana.to_string(),
                romaji: romaji.to_string(),
            })
            .collect()
    }

    fn push(&mut self, kana: &'static str, romaji: String) {
        self.kana.push(kana);
        self.romaji.push(romaji);
    }
}

/// Build the candidate pool for a configuration.
pub fn build_pool(script: Script, dakuten: bool, rows: &RowSelection) -> Pool {
    let mut pool = Pool {
        kana: Vec::new(),
        romaji: Vec::new(),
        filtered: !rows.is_empty(),
    };
    for (kana, romaji) in script.table().entries() {
        if rows.accepts(romaji) {
            pool.push(kana, romaji.to_string());
        }
    }
    if dakuten {
        let base = pool.len();
        for i in 0..base {
            let kana = pool.kana[i];
            for map in diacritics::MAPS {
                if let Some(variant) = map.variant(kana) {
                    let romaji = map.romanize(&pool.romaji[i]);
                    pool.push(variant, romaji);
                }
            }
        }
    }
    pool
}
