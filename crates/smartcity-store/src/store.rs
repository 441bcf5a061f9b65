//! Reader-writer guarded area store
//!
//! Facts live in an `IndexMap` keyed by name behind a `parking_lot::RwLock`:
//! O(1) expected lookup, insertion-ordered iteration, and at most one fact
//! per name.

use indexmap::IndexMap;
use parking_lot::RwLock;
use smartcity_core::{Area, AreaName, CityError, DuplicatePolicy, Result};

/// Read access to a set of area facts.
///
/// Implementations must iterate in a stable order: two scans of an unchanged
/// source visit areas in the same sequence.
pub trait FactSource {
    /// Exact lookup by name
    fn lookup(&self, name: &str) -> Option<Area>;

    /// Run `f` over every area without copying them out.
    ///
    /// The iterator is finite; `f` may stop early.
    fn scan<R>(&self, f: impl FnOnce(Box<dyn Iterator<Item = &Area> + '_>) -> R) -> R;

    /// Copy every area out, in iteration order
    fn snapshot(&self) -> Vec<Area> {
        self.scan(|areas| areas.cloned().collect())
    }

    /// Number of stored areas
    fn count(&self) -> usize {
        self.scan(|areas| areas.count())
    }
}

/// The knowledge base's area facts
#[derive(Debug, Default)]
pub struct FactStore {
    /// Facts keyed by name, in insertion order
    areas: RwLock<IndexMap<AreaName, Area>>,
    /// Behavior on re-asserting a stored name
    policy: DuplicatePolicy,
}

impl FactStore {
    /// Create an empty store
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            areas: RwLock::new(IndexMap::new()),
            policy,
        }
    }

    /// Create a store holding `areas`, asserted in order
    pub fn with_areas(
        policy: DuplicatePolicy,
        areas: impl IntoIterator<Item = Area>,
    ) -> Result<Self> {
        let store = Self::new(policy);
        for area in areas {
            store.insert(area)?;
        }
        Ok(store)
    }

    /// Assert an area fact.
    ///
    /// Returns the replaced fact when the policy is `Overwrite` and the name
    /// was already stored. Under `Reject` a stored name fails with
    /// `DuplicateName` and the store is left unchanged.
    pub fn insert(&self, area: Area) -> Result<Option<Area>> {
        if area.name.is_empty() {
            return Err(CityError::invalid_query("area name cannot be empty"));
        }

        let mut areas = self.areas.write();
        match (areas.get_mut(area.name.as_str()), self.policy) {
            (Some(_), DuplicatePolicy::Reject) => {
                tracing::warn!(name = %area.name, "Rejected duplicate area assertion");
                Err(CityError::duplicate_name(area.name))
            }
            (Some(stored), DuplicatePolicy::Overwrite) => {
                tracing::info!(name = %area.name, "Overwrote area fact");
                Ok(Some(std::mem::replace(stored, area)))
            }
            (None, _) => {
                tracing::debug!(name = %area.name, total = areas.len() + 1, "Asserted area fact");
                areas.insert(area.name.clone(), area);
                Ok(None)
            }
        }
    }

    /// Exact lookup by name
    pub fn get(&self, name: &str) -> Option<Area> {
        self.areas.read().get(name).cloned()
    }

    /// Every stored area, in insertion order
    pub fn all(&self) -> Vec<Area> {
        self.areas.read().values().cloned().collect()
    }

    /// Number of stored areas
    pub fn len(&self) -> usize {
        self.areas.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.areas.read().is_empty()
    }
}

impl FactSource for FactStore {
    fn lookup(&self, name: &str) -> Option<Area> {
        self.get(name)
    }

    fn scan<R>(&self, f: impl FnOnce(Box<dyn Iterator<Item = &Area> + '_>) -> R) -> R {
        let areas = self.areas.read();
        f(Box::new(areas.values()))
    }

    fn snapshot(&self) -> Vec<Area> {
        self.all()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

/// A detached snapshot; the first fact with a given name wins on lookup
impl FactSource for [Area] {
    fn lookup(&self, name: &str) -> Option<Area> {
        self.iter().find(|area| area.name.as_str() == name).cloned()
    }

    fn scan<R>(&self, f: impl FnOnce(Box<dyn Iterator<Item = &Area> + '_>) -> R) -> R {
        f(Box::new(self.iter()))
    }
}
