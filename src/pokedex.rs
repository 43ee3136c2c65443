//! The in-memory collection of caught creatures.

use std::collections::BTreeMap;

use crate::models::Pokemon;

/// Caught creatures keyed by name, listed alphabetically.
#[derive(Debug, Clone, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, Pokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `pokemon` under `name`, replacing any earlier record.
    pub fn insert(&mut self, name: impl Into<String>, pokemon: Pokemon) {
        self.caught.insert(name.into(), pokemon);
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.caught.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.caught.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }

    /// Iterates caught creatures in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Pokemon> {
        self.caught.values()
    }
}
