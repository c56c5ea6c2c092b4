//! Directory read cache
//!
//! Household flows read the same constituents and households repeatedly
//! (roster listing, role lookup, post-write verification). The cache keeps
//! those reads local to one registrar instead of in shared state, and is
//! invalidated explicitly after every mutation.

use hearth_domain::{Constituent, HouseholdRecord, RelationshipRecord};
use std::collections::HashMap;

/// Per-registrar cache of directory reads
#[derive(Debug, Default)]
pub struct DirectoryCache {
    constituents: HashMap<i64, Constituent>,
    households: HashMap<i64, HouseholdRecord>,
    relationships: HashMap<i64, Vec<RelationshipRecord>>,
}

impl DirectoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached constituent, if present
    pub fn constituent(&self, id: i64) -> Option<&Constituent> {
        self.constituents.get(&id)
    }

    /// Store a constituent read
    pub fn store_constituent(&mut self, constituent: Constituent) {
        self.constituents.insert(constituent.id, constituent);
    }

    /// Cached household, if present
    pub fn household(&self, id: i64) -> Option<&HouseholdRecord> {
        self.households.get(&id)
    }

    /// Store a household read
    pub fn store_household(&mut self, household: HouseholdRecord) {
        self.households.insert(household.id, household);
    }

    /// Cached relationship list for a constituent, if present
    pub fn relationships(&self, constituent_id: i64) -> Option<&[RelationshipRecord]> {
        self.relationships.get(&constituent_id).map(|r| r.as_slice())
    }

    /// Store a relationship list read
    pub fn store_relationships(&mut self, constituent_id: i64, records: Vec<RelationshipRecord>) {
        self.relationships.insert(constituent_id, records);
    }

    /// Drop one constituent's cached record and relationship list
    pub fn invalidate_constituent(&mut self, id: i64) {
        self.constituents.remove(&id);
        self.relationships.remove(&id);
    }

    /// Drop one constituent's cached relationship list only
    pub fn invalidate_relationships(&mut self, constituent_id: i64) {
        self.relationships.remove(&constituent_id);
    }

    /// Drop one household's cached record
    pub fn invalidate_household(&mut self, id: i64) {
        self.households.remove(&id);
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.constituents.clear();
        self.households.clear();
        self.relationships.clear();
    }
}
