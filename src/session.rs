//! Per-configuration generation state.
//!
//! A [`Session`] owns the pool, the endless-mode PRNG stream and every index
//! generated so far for exactly one [`SessionKey`]. [`SessionCache`] keeps the
//! current session and swaps it out wholesale when the key changes.
use chrono::{Local, NaiveDate};
use log::debug;

use crate::config::{DrillConfig, GRID_SIZE};
use crate::generate::{self, FillStrategy, FixedGridSpec};
use crate::kana::{self, Cell, Pool, RowSelection, Script};
use crate::prng::Prng;

/// Everything that, when changed, forces a fresh pool and stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub script: Script,
    pub dakuten: bool,
    pub rows: RowSelection,
    /// Effective (sanitized or day) seed.
    pub seed: String,
    pub strategy: FillStrategy,
}

impl SessionKey {
    pub fn new(cfg: &DrillConfig, today: NaiveDate) -> Self {
        Self {
            script: cfg.script,
            dakuten: cfg.dakuten,
            rows: cfg.rows.clone(),
            seed: cfg.effective_seed(today),
            strategy: cfg.strategy,
        }
    }

    /// Key using the local calendar date for the day seed.
    pub fn for_today(cfg: &DrillConfig) -> Self {
        Self::new(cfg, Local::now().date_naive())
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    key: SessionKey,
    pool: Pool,
    rng: Prng,
    fixed: Option<Vec<usize>>,
    endless: Vec<usize>,
}

impl Session {
    pub fn new(key: SessionKey) -> Self {
        let pool = kana::build_pool(key.script, key.dakuten, &key.rows);
        let rng = Prng::new(&key.seed);
        Self {
            key,
            pool,
            rng,
            fixed: None,
            endless: Vec::new(),
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn seed(&self) -> &str {
        &self.key.seed
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The fixed grid, generated on first use and cached afterwards.
    ///
    /// Drawn from its own stream seeded like the session, so it does not
    /// depend on how far the endless stream has advanced.
    pub fn fixed_indices(&mut self) -> &[usize] {
        let pool = &self.pool;
        let key = &self.key;
        self.fixed.get_or_insert_with(|| {
            let spec = FixedGridSpec {
                total: GRID_SIZE,
                max_per_symbol: DrillConfig::cap_for(pool.is_filtered()),
                avoid_immediate_repeat: true,
            };
            let mut rng = Prng::new(&key.seed);
            key.strategy.strategy().fill(&mut rng, pool.len(), &spec)
        })
    }

    pub fn fixed_cells(&mut self) -> Vec<Cell> {
        self.fixed_indices();
        self.pool.cells(self.fixed.as_deref().unwrap_or_default())
    }

    /// Append `amount` endless-mode indices and return just the new ones.
    pub fn extend_endless(&mut self, amount: usize) -> &[usize] {
        let start = self.endless.len();
        let batch = generate::append_batch(
            &mut self.rng,
            self.pool.len(),
            self.endless.last().copied(),
            amount,
        );
        self.endless.extend(batch);
        &self.endless[start..]
    }

    pub fn endless_indices(&self) -> &[usize] {
        &self.endless
    }

    pub fn endless_cells(&self) -> Vec<Cell> {
        self.pool.cells(&self.endless)
    }
}

/// Holds at most one live session.
#[derive(Debug, Default)]
pub struct SessionCache {
    session: Option<Session>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for `key`, rebuilding pool, stream and indices
    /// together if the cached one was built for a different key.
    pub fn ensure(&mut self, key: SessionKey) -> &mut Session {
        let session = match self.session.take() {
            Some(s) if s.key == key => s,
            previous => {
                match previous {
                    Some(old) => debug!("session key changed ({:?} -> {:?}), rebuilding", old.key, key),
                    None => debug!("building session for {key:?}"),
                }
                Session::new(key)
            }
        };
        self.session.insert(session)
    }

    /// Drop the cached session so the next `ensure` rebuilds from scratch.
    pub fn invalidate(&mut self) {
        if self.session.take().is_some() {
            debug!("session invalidated");
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(seed: &str) -> SessionKey {
        SessionKey {
            script: Script::Hiragana,
            dakuten: false,
            rows: RowSelection::none(),
            seed: seed.to_string(),
            strategy: FillStrategy::Balanced,
        }
    }

    #[test]
    fn test_fixed_is_memoized_and_golden() {
        let mut session = Session::new(key("abc123"));
        let first = session.fixed_indices().to_vec();
        assert_eq!(first.len(), GRID_SIZE);
        assert_eq!(&first[..5], &[14, 1, 6, 42, 29]);
        session.extend_endless(30);
        assert_eq!(session.fixed_indices(), first.as_slice());
    }

    #[test]
    fn test_ensure_keeps_progress_for_same_key() {
        let mut cache = SessionCache::new();
        cache.ensure(key("abc")).extend_endless(80);
        let s = cache.ensure(key("abc"));
        assert_eq!(s.endless_indices().len(), 80);
    }

    #[test]
    fn test_ensure_rebuilds_on_key_change() {
        let mut cache = SessionCache::new();
        cache.ensure(key("abc")).extend_endless(10);
        let s = cache.ensure(SessionKey { dakuten: true, ..key("abc") });
        assert!(s.endless_indices().is_empty());
        assert_eq!(s.pool().len(), 71);
    }

    #[test]
    fn test_invalidate_restarts_stream() {
        let mut cache = SessionCache::new();
        let a = cache.ensure(key("abc")).extend_endless(20).to_vec();
        cache.invalidate();
        assert!(cache.current().is_none());
        let b = cache.ensure(key("abc")).extend_endless(20).to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_filtered_pool_lifts_cap() {
        let mut session = Session::new(SessionKey {
            rows: RowSelection::parse("vowels"),
            ..key("abc")
        });
        assert_eq!(session.pool().len(), 5);
        let cells = session.fixed_cells();
        assert_eq!(cells.len(), GRID_SIZE);
        assert!(cells.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_key_uses_day_seed_when_unset() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let k = SessionKey::new(&DrillConfig::default(), today);
        assert_eq!(k.seed, "day20261016");
    }
}
