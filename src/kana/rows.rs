// Phonetic row filters (a-row vowels, k-row, s-row, ...).
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// One gojuon row. The set of rows is closed; unknown names never parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Row {
    Vowels,
    K,
    S,
    T,
    N,
    H,
    M,
    Y,
    R,
    /// wa / wo plus the syllabic ん (which the n row also claims).
    W,
}

impl Row {
    pub const ALL: [Row; 10] = [
        Row::Vowels,
        Row::K,
        Row::S,
        Row::T,
        Row::N,
        Row::H,
        Row::M,
        Row::Y,
        Row::R,
        Row::W,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Row::Vowels => "vowels",
            Row::K => "k",
            Row::S => "s",
            Row::T => "t",
            Row::N => "n",
            Row::H => "h",
            Row::M => "m",
            Row::Y => "y",
            Row::R => "r",
            Row::W => "w",
        }
    }

    /// Row membership is decided by romaji alone.
    pub fn matches(self, romaji: &str) -> bool {
        match self {
            Row::Vowels => matches!(romaji, "a" | "i" | "u" | "e" | "o"),
            Row::K => romaji.starts_with('k'),
            Row::S => romaji.starts_with('s'),
            Row::T => romaji.starts_with('t') || romaji == "chi",
            Row::N => romaji.starts_with('n'),
            Row::H => romaji.starts_with('h') || romaji == "fu",
            Row::M => romaji.starts_with('m'),
            Row::Y => romaji.starts_with('y'),
            Row::R => romaji.starts_with('r'),
            Row::W => matches!(romaji, "wa" | "wo" | "n"),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Row {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Row::ALL
            .into_iter()
            .find(|row| row.name() == s)
            .ok_or_else(|| ConfigError::UnknownRow(s.to_string()))
    }
}

/// Selected rows. Empty means "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RowSelection(BTreeSet<Row>);

impl RowSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Row::ALL.into_iter().collect()
    }

    /// Lenient comma-separated parse; unknown names are dropped.
    pub fn parse(raw: &str) -> Self {
        Self::from_names(raw.split(','))
    }

    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rows = BTreeSet::new();
        for name in names.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
            match name.parse::<Row>() {
                Ok(row) => {
                    rows.insert(row);
                }
                Err(e) => log::debug!("dropping row selection entry: {e}"),
            }
        }
        Self(rows)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, row: Row) -> bool {
        self.0.contains(&row)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.0.iter().copied()
    }

    /// True when `romaji` passes the filter. An empty selection keeps everything.
    pub fn accepts(&self, romaji: &str) -> bool {
        self.0.is_empty() || self.0.iter().any(|row| row.matches(romaji))
    }
}

impl FromIterator<Row> for RowSelection {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RowSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.rows().map(Row::name).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RowSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Unknown names from JS are dropped, not rejected.
        let names: Vec<String> = serde::Deserialize::deserialize(deserializer)?;
        Ok(Self::from_names(names.iter().map(String::as_str)))
    }
}
