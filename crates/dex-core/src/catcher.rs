//! The catcher: draw a free identifier, fetch it, report the outcome.
//!
//! A catch walks `Idle -> Drawing -> Requesting(id)` and ends in
//! `Success(id)`, `Failed` or `Exhausted`. Once the outcome is handed on,
//! [`Catcher::reset`] returns a settled catcher to `Idle`. Redraws on collision are capped;
//! past the cap the identifier is sampled from the ids still free, so a catch
//! always terminates. The registry is only read here. Recording the catch is
//! the caller's job, once per `Ok` result.

use tracing::{debug, info, warn};

use crate::catalog::{CatalogRange, IdSource};
use crate::config::{DEFAULT_MAX_ATTEMPTS, DexConfig};
use crate::creature::Creature;
use crate::error::CatchError;
use crate::registry::Registry;
use crate::source::CreatureSource;

/// Where the catcher is in a catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready for the next catch.
    Idle,
    /// Picking an identifier not yet in the registry.
    Drawing,
    /// Waiting on the source for this identifier.
    Requesting(u32),
    /// The last catch returned this identifier.
    Success(u32),
    /// The last catch failed at the source.
    Failed,
    /// No identifier in the catalog is left to catch.
    Exhausted,
}

impl Phase {
    /// Whether no further catch can succeed.
    pub fn is_terminal(self) -> bool {
        self == Phase::Exhausted
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Drawing => write!(f, "drawing"),
            Phase::Requesting(id) => write!(f, "requesting #{id}"),
            Phase::Success(id) => write!(f, "caught #{id}"),
            Phase::Failed => write!(f, "failed"),
            Phase::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// A successful catch, not yet recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Catch {
    /// Identifier that was drawn and requested.
    pub id: u32,
    /// What the source returned.
    pub creature: Creature,
    /// Draws it took to find a free identifier.
    pub draws: u32,
}

/// Draws free identifiers and fetches them from a [`CreatureSource`].
pub struct Catcher<G, S> {
    ids: G,
    source: S,
    range: CatalogRange,
    max_attempts: u32,
    phase: Phase,
}

impl<G: IdSource, S: CreatureSource> Catcher<G, S> {
    /// Create a catcher over `range`.
    pub fn new(ids: G, source: S, range: CatalogRange) -> Self {
        Self {
            ids,
            source,
            range,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            phase: Phase::Idle,
        }
    }

    /// Create a catcher using the catalog and draw cap from `config`.
    pub fn from_config(ids: G, source: S, config: &DexConfig) -> Self {
        Self::new(ids, source, config.catalog).with_max_attempts(config.max_attempts)
    }

    /// Set the rejection draw cap (at least 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The catalog being drawn from.
    pub fn range(&self) -> &CatalogRange {
        &self.range
    }

    /// Return to `Idle` after a `Success` or `Failed` catch.
    ///
    /// `Exhausted` is kept since no later catch can succeed.
    pub fn reset(&mut self) {
        if matches!(self.phase, Phase::Success(_) | Phase::Failed) {
            self.phase = Phase::Idle;
        }
    }

    /// Pick an identifier that `registry` does not hold.
    ///
    /// Returns the identifier and the number of draws taken.
    pub fn draw_free(&mut self, registry: &Registry) -> Result<(u32, u32), CatchError> {
        self.phase = Phase::Drawing;

        if registry.len() >= self.range.len() && registry.covers(&self.range) {
            self.phase = Phase::Exhausted;
            return Err(CatchError::Exhausted {
                lower: self.range.lower(),
                upper: self.range.upper(),
                count: self.range.len(),
            });
        }

        for attempt in 1..=self.max_attempts {
            let id = self.ids.draw_in(&self.range);
            if !registry.contains(id) {
                return Ok((id, attempt));
            }
            debug!(id, attempt, "drew an id already caught, redrawing");
        }

        let free = registry.free_ids(&self.range);
        let last = free.len().saturating_sub(1);
        let pick = (self.ids.draw(0, last as u32) as usize).min(last);
        debug!(
            free = free.len(),
            "draw cap of {} reached, sampling free ids", self.max_attempts
        );
        Ok((free[pick], self.max_attempts + 1))
    }

    /// Run one catch against `registry`.
    ///
    /// Makes exactly one source request unless the catalog is exhausted.
    pub fn catch(&mut self, registry: &Registry) -> Result<Catch, CatchError> {
        let (id, draws) = self.draw_free(registry)?;

        self.phase = Phase::Requesting(id);
        match self.source.fetch(&id.to_string()) {
            Ok(creature) => {
                if creature.id != id {
                    debug!(requested = id, returned = creature.id, "source answered with a different id");
                }
                info!(id, name = %creature.name, draws, "caught");
                self.phase = Phase::Success(id);
                Ok(Catch {
                    id,
                    creature,
                    draws,
                })
            }
            Err(source) => {
                warn!(id, error = %source, "fetch failed");
                self.phase = Phase::Failed;
                Err(CatchError::Source { id, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::collections::{HashMap, VecDeque};

    /// Replays a fixed sequence of draws, then repeats the lower edge.
    struct ScriptedIds(VecDeque<u32>);

    impl ScriptedIds {
        fn new(ids: &[u32]) -> Self {
            Self(ids.iter().copied().collect())
        }
    }

    impl IdSource for ScriptedIds {
        fn draw(&mut self, lower: u32, _upper: u32) -> u32 {
            self.0.pop_front().unwrap_or(lower)
        }
    }

    /// In-memory source that counts requests.
    struct FakeSource {
        names: HashMap<u32, &'static str>,
        calls: Cell<usize>,
        fail: Option<SourceError>,
    }

    impl FakeSource {
        fn new(names: &[(u32, &'static str)]) -> Self {
            Self {
                names: names.iter().copied().collect(),
                calls: Cell::new(0),
                fail: None,
            }
        }

        fn failing(err: SourceError) -> Self {
            Self {
                names: HashMap::new(),
                calls: Cell::new(0),
                fail: Some(err),
            }
        }
    }

    impl CreatureSource for FakeSource {
        fn fetch(&self, id: &str) -> Result<Creature, SourceError> {
            self.calls.set(self.calls.get() + 1);
            if let Some(err) = &self.fail {
                return Err(err.clone());
            }
            let n: u32 = id
                .parse()
                .map_err(|_| SourceError::Malformed(id.to_string()))?;
            self.names
                .get(&n)
                .map(|name| Creature::named(n, *name))
                .ok_or_else(|| SourceError::NotFound(id.to_string()))
        }
    }

    #[test]
    fn starts_idle() {
        let catcher = Catcher::new(
            ScriptedIds::new(&[]),
            FakeSource::new(&[]),
            CatalogRange::default(),
        );
        assert_eq!(catcher.phase(), Phase::Idle);
    }

    #[test]
    fn first_catch_on_empty_registry() {
        let source = FakeSource::new(&[(7, "squirtle")]);
        let mut catcher = Catcher::new(ScriptedIds::new(&[7]), &source, CatalogRange::default());
        let mut registry = Registry::new();

        let catch = catcher.catch(&registry).unwrap();
        assert_eq!(catch.id, 7);
        assert_eq!(catch.creature.name, "squirtle");
        assert_eq!(catch.draws, 1);
        assert_eq!(catcher.phase(), Phase::Success(7));
        assert_eq!(source.calls.get(), 1);

        assert_eq!(registry.insert(catch.id, catch.creature), 1);
        assert!(registry.contains(7));
    }

    #[test]
    fn collision_triggers_redraw() {
        let source = FakeSource::new(&[(7, "squirtle"), (12, "butterfree")]);
        let mut catcher = Catcher::new(ScriptedIds::new(&[7, 12]), &source, CatalogRange::default());
        let mut registry = Registry::new();
        registry.insert(7, Creature::named(7, "squirtle"));

        let catch = catcher.catch(&registry).unwrap();
        assert_eq!(catch.id, 12);
        assert_eq!(catch.draws, 2);
        assert_eq!(source.calls.get(), 1);

        registry.insert(catch.id, catch.creature);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(12).map(|e| e.creature.name.as_str()),
            Some("butterfree")
        );
    }

    #[test]
    fn source_failure_leaves_registry_alone() {
        let source = FakeSource::failing(SourceError::Transport("connection refused".into()));
        let mut catcher = Catcher::new(ScriptedIds::new(&[3]), &source, CatalogRange::default());
        let registry = Registry::new();

        let err = catcher.catch(&registry).unwrap_err();
        assert_eq!(
            err,
            CatchError::Source {
                id: 3,
                source: SourceError::Transport("connection refused".into()),
            }
        );
        assert_eq!(catcher.phase(), Phase::Failed);
        assert!(registry.is_empty());
        assert_eq!(source.calls.get(), 1);
        assert_eq!(err.to_string(), "could not catch #3: request failed: connection refused");
    }

    #[test]
    fn exhausted_catalog_makes_no_request() {
        let range = CatalogRange::new(1, 2).unwrap();
        let source = FakeSource::new(&[(1, "bulbasaur"), (2, "ivysaur")]);
        let mut catcher = Catcher::new(ScriptedIds::new(&[1, 1, 1]), &source, range);
        let mut registry = Registry::new();
        registry.insert(1, Creature::named(1, "bulbasaur"));
        registry.insert(2, Creature::named(2, "ivysaur"));

        let err = catcher.catch(&registry).unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(catcher.phase(), Phase::Exhausted);
        assert!(catcher.phase().is_terminal());
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn cap_falls_back_to_free_ids() {
        let range = CatalogRange::new(1, 4).unwrap();
        let source = FakeSource::new(&[(3, "venusaur")]);
        // Three colliding draws hit the cap, then index 1 of the free set [2, 3].
        let mut catcher = Catcher::new(ScriptedIds::new(&[1, 1, 4, 1]), &source, range)
            .with_max_attempts(3);
        let mut registry = Registry::new();
        registry.insert(1, Creature::named(1, "bulbasaur"));
        registry.insert(4, Creature::named(4, "charmander"));

        let catch = catcher.catch(&registry).unwrap();
        assert_eq!(catch.id, 3);
        assert_eq!(catch.draws, 4);
    }

    #[test]
    fn last_free_id_is_always_found() {
        let range = CatalogRange::new(1, 3).unwrap();
        let source = FakeSource::new(&[(2, "ivysaur")]);
        let mut catcher =
            Catcher::new(ScriptedIds::new(&[]), &source, range).with_max_attempts(1);
        let mut registry = Registry::new();
        registry.insert(1, Creature::named(1, "bulbasaur"));
        registry.insert(3, Creature::named(3, "venusaur"));

        assert_eq!(catcher.catch(&registry).map(|c| c.id), Ok(2));
    }

    #[test]
    fn from_config_uses_catalog_and_cap() {
        let cfg = DexConfig::default()
            .with_catalog_size(10)
            .unwrap()
            .with_max_attempts(0);
        let catcher = Catcher::from_config(ScriptedIds::new(&[]), FakeSource::new(&[]), &cfg);
        assert_eq!(catcher.range().upper(), 10);
        assert_eq!(catcher.max_attempts, 1);
    }

    #[test]
    fn sessions_never_repeat_ids() {
        let range = CatalogRange::new(1, 20).unwrap();
        let names: Vec<(u32, &'static str)> = (1..=20).map(|id| (id, "mon")).collect();
        let source = FakeSource::new(&names);
        let mut catcher = Catcher::new(crate::RandomIds::seeded(9), &source, range);
        let mut registry = Registry::new();

        for expected in 1..=20 {
            let catch = catcher.catch(&registry).unwrap();
            assert!(!registry.contains(catch.id));
            assert_eq!(registry.insert(catch.id, catch.creature), expected);
        }
        assert!(catcher.catch(&registry).unwrap_err().is_exhausted());
        assert_eq!(source.calls.get(), 20);
    }

    #[test]
    fn reset_returns_to_idle() {
        let source = FakeSource::new(&[(7, "squirtle")]);
        let mut catcher = Catcher::new(ScriptedIds::new(&[7, 8]), &source, CatalogRange::default());
        let mut registry = Registry::new();

        let catch = catcher.catch(&registry).unwrap();
        catcher.reset();
        assert_eq!(catcher.phase(), Phase::Idle);

        registry.insert(catch.id, catch.creature);
        assert!(catcher.catch(&registry).is_err());
        assert_eq!(catcher.phase(), Phase::Failed);
        catcher.reset();
        assert_eq!(catcher.phase(), Phase::Idle);
    }

    #[test]
    fn reset_keeps_exhausted() {
        let range = CatalogRange::new(1, 1).unwrap();
        let source = FakeSource::new(&[]);
        let mut catcher = Catcher::new(ScriptedIds::new(&[]), &source, range);
        let mut registry = Registry::new();
        registry.insert(1, Creature::named(1, "bulbasaur"));

        assert!(catcher.catch(&registry).unwrap_err().is_exhausted());
        catcher.reset();
        assert_eq!(catcher.phase(), Phase::Exhausted);
    }

    proptest! {
        #[test]
        fn catches_are_distinct_until_exhausted(
            seed in any::<u64>(),
            size in 1u32..64,
            max_attempts in 1u32..8,
        ) {
            let range = CatalogRange::with_size(size).unwrap();
            let names: Vec<(u32, &'static str)> = (1..=size).map(|id| (id, "mon")).collect();
            let source = FakeSource::new(&names);
            let mut catcher = Catcher::new(crate::RandomIds::seeded(seed), &source, range)
                .with_max_attempts(max_attempts);
            let mut registry = Registry::new();

            for caught in 1..=size as usize {
                let catch = catcher.catch(&registry).unwrap();
                prop_assert!(range.contains(catch.id));
                prop_assert!(!registry.contains(catch.id), "repeated #{}", catch.id);
                registry.insert(catch.id, catch.creature);
                prop_assert_eq!(registry.len(), caught);
                catcher.reset();
            }

            prop_assert!(catcher.catch(&registry).unwrap_err().is_exhausted());
            prop_assert_eq!(source.calls.get(), size as usize);
        }
    }
}
