//! Index sequences for the drill grid.
//!
//! Fixed mode fills a finite grid up front under a per-symbol cap; endless mode
//! appends batches to an unbounded list from a long-lived stream. Both avoid
//! placing the same symbol twice in a row whenever the pool allows it.
use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::config::ConfigError;
use crate::prng::Prng;

/// Draws per slot before fixed mode falls back to a deterministic scan.
pub const FIXED_ATTEMPTS: usize = 5000;
/// Draws per slot before endless mode accepts a repeat.
pub const ENDLESS_ATTEMPTS: usize = 50;

/// Shape of a fixed grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedGridSpec {
    pub total: usize,
    /// `None` means no cap beyond what the grid size implies.
    pub max_per_symbol: Option<usize>,
    pub avoid_immediate_repeat: bool,
}

impl FixedGridSpec {
    /// The cap actually enforced: never below `ceil(total / pool_size)`, so the
    /// grid can always be filled, and never above `total`.
    pub fn effective_cap(&self, pool_size: usize) -> usize {
        let min_needed = self.total.div_ceil(pool_size.max(1));
        self.max_per_symbol
            .unwrap_or(self.total)
            .min(self.total)
            .max(min_needed)
    }
}

/// Running per-symbol counts plus the last placed index.
struct Tally {
    counts: Vec<usize>,
    cap: usize,
    prev: Option<usize>,
    avoid_repeat: bool,
}

impl Tally {
    fn new(pool_size: usize, spec: &FixedGridSpec) -> Self {
        Self {
            counts: vec![0; pool_size],
            cap: spec.effective_cap(pool_size),
            prev: None,
            avoid_repeat: spec.avoid_immediate_repeat,
        }
    }

    fn under_cap(&self, idx: usize) -> bool {
        self.counts[idx] < self.cap
    }

    fn allows(&self, idx: usize) -> bool {
        !(self.avoid_repeat && self.prev == Some(idx)) && self.under_cap(idx)
    }

    /// Lowest index that is allowed, else the lowest index still under the cap
    /// (which can only be the previous symbol).
    fn fallback(&self) -> Option<usize> {
        let size = self.counts.len();
        (0..size)
            .find(|&j| self.allows(j))
            .or_else(|| (0..size).find(|&j| self.under_cap(j)))
    }

    fn place(&mut self, idx: usize) {
        self.counts[idx] += 1;
        self.prev = Some(idx);
    }
}

/// A way of filling a fixed grid. Implementations must be deterministic in the
/// PRNG stream they are handed.
pub trait IndexStrategy {
    fn fill(&self, rng: &mut Prng, pool_size: usize, spec: &FixedGridSpec) -> Vec<usize>;
}

/// Uniform draws with rejection of repeats and capped symbols.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectionSampling;

impl IndexStrategy for RejectionSampling {
    fn fill(&self, rng: &mut Prng, pool_size: usize, spec: &FixedGridSpec) -> Vec<usize> {
        if pool_size == 0 {
            return Vec::new();
        }
        let mut tally = Tally::new(pool_size, spec);
        let mut out = Vec::with_capacity(spec.total);
        for slot in 0..spec.total {
            let mut idx = 0;
            let mut placed = false;
            for _ in 0..FIXED_ATTEMPTS {
                idx = rng.next_index(pool_size);
                if tally.allows(idx) {
                    placed = true;
                    break;
                }
            }
            if !placed {
                trace!("slot {slot}: rejection budget exhausted, scanning");
                idx = tally.fallback().unwrap_or(idx);
            }
            tally.place(idx);
            out.push(idx);
        }
        out
    }
}

/// Weighted choice list: each eligible symbol gets weight `cap - count + 1`,
/// favouring symbols that have appeared less.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedChoice;

impl IndexStrategy for WeightedChoice {
    fn fill(&self, rng: &mut Prng, pool_size: usize, spec: &FixedGridSpec) -> Vec<usize> {
        if pool_size == 0 {
            return Vec::new();
        }
        let mut tally = Tally::new(pool_size, spec);
        let weight = |t: &Tally, k: usize| t.cap - t.counts[k] + 1;
        let mut out = Vec::with_capacity(spec.total);
        for slot in 0..spec.total {
            let total_weight: usize = (0..pool_size)
                .filter(|&k| tally.allows(k))
                .map(|k| weight(&tally, k))
                .sum();
            let idx = if total_weight == 0 {
                trace!("slot {slot}: no weighted candidate, scanning");
                tally.fallback().unwrap_or(0)
            } else {
                let mut target = rng.next_index(total_weight);
                let mut chosen = 0;
                for k in (0..pool_size).filter(|&k| tally.allows(k)) {
                    let w = weight(&tally, k);
                    if target < w {
                        chosen = k;
                        break;
                    }
                    target -= w;
                }
                chosen
            };
            tally.place(idx);
            out.push(idx);
        }
        out
    }
}

/// Named fixed-grid strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FillStrategy {
    /// Rejection sampling; the default.
    #[default]
    Balanced,
    /// The older weighted-choice-list scheme.
    Weighted,
}

impl FillStrategy {
    pub fn name(self) -> &'static str {
        match self {
            FillStrategy::Balanced => "balanced",
            FillStrategy::Weighted => "weighted",
        }
    }

    pub fn strategy(self) -> &'static dyn IndexStrategy {
        match self {
            FillStrategy::Balanced => &RejectionSampling,
            FillStrategy::Weighted => &WeightedChoice,
        }
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FillStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(FillStrategy::Balanced),
            "weighted" => Ok(FillStrategy::Weighted),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Fill a fixed grid with the default rejection-sampling strategy.
pub fn generate_fixed(
    rng: &mut Prng,
    pool_size: usize,
    total: usize,
    max_per_symbol: Option<usize>,
    avoid_immediate_repeat: bool,
) -> Vec<usize> {
    let spec = FixedGridSpec {
        total,
        max_per_symbol,
        avoid_immediate_repeat,
    };
    RejectionSampling.fill(rng, pool_size, &spec)
}

/// Draw `amount` more endless-mode indices, continuing after `previous`.
///
/// No cap applies. A repeat of the previous index is redrawn up to
/// [`ENDLESS_ATTEMPTS`] times, after which the last draw is kept. The JS page
/// draws once more at that point, so the two only part ways in that case.
pub fn append_batch(
    rng: &mut Prng,
    pool_size: usize,
    previous: Option<usize>,
    amount: usize,
) -> Vec<usize> {
    if pool_size == 0 {
        return Vec::new();
    }
    let mut prev = previous;
    let mut out = Vec::with_capacity(amount);
    for _ in 0..amount {
        let mut idx = rng.next_index(pool_size);
        let mut attempts = 1;
        while pool_size > 1 && prev == Some(idx) && attempts < ENDLESS_ATTEMPTS {
            idx = rng.next_index(pool_size);
            attempts += 1;
        }
        out.push(idx);
        prev = Some(idx);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC123_GOLDEN: [usize; 50] = [
        14, 1, 6, 42, 29, 41, 29, 43, 3, 36, 6, 12, 23, 22, 30, 16, 20, 23, 10, 17, 37, 41, 2, 45,
        16, 11, 24, 12, 32, 27, 3, 7, 11, 24, 7, 14, 2, 18, 33, 30, 1, 5, 36, 37, 40, 8, 39, 35,
        19, 13,
    ];

    #[test]
    fn test_fixed_golden_abc123() {
        let mut rng = Prng::new("abc123");
        let got = generate_fixed(&mut rng, 46, 50, Some(2), true);
        assert_eq!(got, ABC123_GOLDEN);
    }

    #[test]
    fn test_weighted_golden_abc123() {
        let mut rng = Prng::new("abc123");
        let spec = FixedGridSpec {
            total: 50,
            max_per_symbol: Some(2),
            avoid_immediate_repeat: true,
        };
        let got = WeightedChoice.fill(&mut rng, 46, &spec);
        assert_eq!(
            &got[..12],
            &[14, 1, 6, 42, 29, 41, 28, 43, 3, 36, 7, 13]
        );
    }

    #[test]
    fn test_single_symbol_pool_repeats_as_last_resort() {
        let mut rng = Prng::new("abc123");
        assert_eq!(generate_fixed(&mut rng, 1, 4, Some(2), true), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_two_symbol_pool_alternates() {
        let mut rng = Prng::new("abc123");
        assert_eq!(generate_fixed(&mut rng, 2, 5, Some(2), true), vec![0, 1, 0, 1, 0]);
        let mut rng = Prng::new("abc123");
        let spec = FixedGridSpec {
            total: 5,
            max_per_symbol: Some(2),
            avoid_immediate_repeat: true,
        };
        assert_eq!(WeightedChoice.fill(&mut rng, 2, &spec), vec![0, 1, 0, 1, 0]);
    }

    fn tally(counts: Vec<usize>, prev: Option<usize>, avoid_repeat: bool) -> Tally {
        Tally {
            counts,
            cap: 2,
            prev,
            avoid_repeat,
        }
    }

    #[test]
    fn test_fallback_prefers_non_repeat_under_cap() {
        assert_eq!(tally(vec![2, 1, 1], Some(1), true).fallback(), Some(2));
    }

    #[test]
    fn test_fallback_repeats_previous_as_last_resort() {
        assert_eq!(tally(vec![2, 1, 2], Some(1), true).fallback(), Some(1));
        assert_eq!(tally(vec![2, 2, 2], Some(1), true).fallback(), None);
    }

    #[test]
    fn test_repeat_allowed_when_not_avoiding() {
        let t = tally(vec![0, 0], Some(0), false);
        assert!(t.allows(0));
        assert_eq!(t.fallback(), Some(0));
        assert!(!tally(vec![0, 0], Some(0), true).allows(0));
    }

    #[test]
    fn test_fixed_without_repeat_avoidance_respects_cap() {
        let mut rng = Prng::new("abc123");
        let got = generate_fixed(&mut rng, 2, 4, Some(2), false);
        assert_eq!(got.len(), 4);
        assert_eq!(got.iter().filter(|&&i| i == 0).count(), 2);
        assert_eq!(got.iter().filter(|&&i| i == 1).count(), 2);
    }

    #[test]
    fn test_effective_cap_never_infeasible() {
        let spec = FixedGridSpec {
            total: 50,
            max_per_symbol: Some(2),
            avoid_immediate_repeat: true,
        };
        assert_eq!(spec.effective_cap(46), 2);
        assert_eq!(spec.effective_cap(5), 10);
        assert_eq!(spec.effective_cap(0), 50);
        let unlimited = FixedGridSpec { max_per_symbol: None, ..spec };
        assert_eq!(unlimited.effective_cap(46), 50);
    }

    #[test]
    fn test_empty_pool_yields_nothing() {
        let mut rng = Prng::new("x");
        assert!(generate_fixed(&mut rng, 0, 50, Some(2), true).is_empty());
        assert!(append_batch(&mut rng, 0, None, 10).is_empty());
    }

    #[test]
    fn test_append_batch_continues_stream() {
        let mut rng = Prng::new("abc123");
        let first = append_batch(&mut rng, 46, None, 10);
        assert_eq!(first, vec![14, 1, 6, 42, 29, 41, 29, 43, 3, 36]);

        let mut rng = Prng::new("abc123");
        let mut split = append_batch(&mut rng, 2, None, 5);
        let last = split.last().copied();
        split.extend(append_batch(&mut rng, 2, last, 7));
        assert_eq!(split, vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_append_batch_single_symbol() {
        let mut rng = Prng::new("abc123");
        assert_eq!(append_batch(&mut rng, 1, Some(0), 3), vec![0, 0, 0]);
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for s in [FillStrategy::Balanced, FillStrategy::Weighted] {
            assert_eq!(s.name().parse::<FillStrategy>().ok(), Some(s));
        }
        assert!("shuffle".parse::<FillStrategy>().is_err());
    }
}
