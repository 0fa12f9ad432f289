//! The session registry of caught creatures.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::catalog::CatalogRange;
use crate::creature::Creature;

/// A creature caught during this session.
#[derive(Debug, Clone, PartialEq)]
pub struct CaughtEntry {
    /// Identifier the creature was caught under.
    pub id: u32,
    /// The creature record.
    pub creature: Creature,
    /// When it was caught.
    pub caught_at: DateTime<Utc>,
}

/// Creatures caught so far, keyed by identifier.
///
/// Iteration is newest first. Nothing here outlives the process.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<u32, CaughtEntry>,
    /// Identifiers, newest first.
    order: Vec<u32>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` has already been caught.
    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Record a catch under `id`, returning the new size.
    ///
    /// Inserting an id twice replaces the earlier record and moves it to the
    /// front.
    pub fn insert(&mut self, id: u32, creature: Creature) -> usize {
        self.insert_at(id, creature, Utc::now())
    }

    /// Record a catch with an explicit timestamp.
    pub fn insert_at(&mut self, id: u32, creature: Creature, caught_at: DateTime<Utc>) -> usize {
        let entry = CaughtEntry {
            id,
            creature,
            caught_at,
        };
        if self.entries.insert(id, entry).is_some() {
            self.order.retain(|existing| *existing != id);
        }
        self.order.insert(0, id);
        self.entries.len()
    }

    /// Number of creatures caught.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been caught yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a catch by identifier.
    pub fn get(&self, id: u32) -> Option<&CaughtEntry> {
        self.entries.get(&id)
    }

    /// Iterate catches, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &CaughtEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Catches whose name contains `query` (case-insensitive), newest first.
    pub fn filter(&self, query: &str) -> Vec<&CaughtEntry> {
        let query = query.to_lowercase();
        self.iter()
            .filter(|e| query.is_empty() || e.creature.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Identifiers in `range` that have not been caught, ascending.
    pub fn free_ids(&self, range: &CatalogRange) -> Vec<u32> {
        range.ids().filter(|id| !self.contains(*id)).collect()
    }

    /// Whether every identifier in `range` has been caught.
    pub fn covers(&self, range: &CatalogRange) -> bool {
        range.ids().all(|id| self.contains(id))
    }
}
