//! # hearth-bloomerang
//!
//! Bloomerang directory integration for the Hearth household engine.
//!
//! This crate implements the lookup, history, and persistence ports from
//! `hearth-domain` against the Bloomerang v2 REST API, and ships an
//! in-memory [`MockExchange`] so orchestration logic can be tested without
//! network access.
//!
//! ## Architecture
//!
//! - [`BloomerangClient`]: production HTTP implementation of all three ports
//! - [`MockExchange`]: in-memory implementation for testing
//! - [`roles`]: the directory's relationship role id table
//! - [`BloomerangError`]: error type shared by both implementations
//!
//! ## Example
//!
//! ```
//! use hearth_bloomerang::MockExchange;
//!
//! let exchange = MockExchange::new();
//! let id = exchange.seed_constituent("Mary", "Jones");
//! assert!(exchange.constituent_snapshot(id).is_some());
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod roles;
mod wire;

pub use client::BloomerangClient;

use hearth_domain::traits::{ConstituentLookup, HouseholdStore, RelationshipHistory};
use hearth_domain::{
    CanonicalNameSet, Constituent, HouseholdRecord, Person, RelationshipOutcome,
    RelationshipRecord,
};
use roles::relationship_role_id;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors that can occur when talking to the directory
#[derive(Error, Debug)]
pub enum BloomerangError {
    /// Network error communicating with the API
    #[error("Communication error: {0}")]
    Communication(String),

    /// The API rejected the request
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, when one was readable
        message: String,
    },

    /// The API key was rejected
    #[error("Authentication rejected: {0}")]
    Auth(String),

    /// The response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The role has no id in the directory's relationship role table
    #[error("No relationship role directory entry for '{0}'")]
    UnknownRole(String),
}

impl From<reqwest::Error> for BloomerangError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            BloomerangError::Communication(format!("Connection failed: {}", e))
        } else if e.is_timeout() {
            BloomerangError::Communication(format!("Request timed out: {}", e))
        } else if e.is_status() {
            BloomerangError::Api {
                status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                message: e.to_string(),
            }
        } else {
            BloomerangError::Communication(e.to_string())
        }
    }
}

#[derive(Debug)]
struct MockState {
    constituents: HashMap<i64, Constituent>,
    households: HashMap<i64, HouseholdRecord>,
    relationships: Vec<RelationshipRecord>,
    next_id: i64,
    next_household_id: i64,
    relationship_submissions: usize,
    drop_attachments: bool,
}

impl MockState {
    /// Register the person if needed and return their directory id
    fn ensure_constituent(&mut self, person: &Person) -> i64 {
        if let Some(id) = person.id {
            if !self.constituents.contains_key(&id) {
                self.constituents.insert(
                    id,
                    Constituent {
                        id,
                        account_number: Some(id),
                        first_name: person.first_name.clone(),
                        last_name: person.last_name.clone(),
                        middle_name: None,
                        gender: None,
                        birthdate: None,
                        household_id: None,
                    },
                );
            }
            return id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.constituents.insert(
            id,
            Constituent {
                id,
                account_number: Some(id),
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                middle_name: None,
                gender: None,
                birthdate: None,
                household_id: None,
            },
        );
        id
    }
}

/// In-memory directory for testing
///
/// Backs all three ports with shared mutable state, so a clone observes the
/// same records as its source. Ids are assigned sequentially from 1000
/// (constituents) and 5000 (households).
#[derive(Debug, Clone)]
pub struct MockExchange {
    state: Arc<Mutex<MockState>>,
}

impl MockExchange {
    /// Create an empty mock directory
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                constituents: HashMap::new(),
                households: HashMap::new(),
                relationships: Vec::new(),
                next_id: 1000,
                next_household_id: 5000,
                relationship_submissions: 0,
                drop_attachments: false,
            })),
        }
    }

    /// Seed one constituent and return the assigned id
    pub fn seed_constituent(&self, first_name: &str, last_name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.constituents.insert(
            id,
            Constituent {
                id,
                account_number: Some(id),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                middle_name: None,
                gender: None,
                birthdate: None,
                household_id: None,
            },
        );
        id
    }

    /// Seed one recorded relationship
    pub fn seed_relationship(
        &self,
        account_id_1: i64,
        role_1: &str,
        account_id_2: i64,
        role_2: &str,
    ) {
        let mut state = self.state.lock().unwrap();
        state.relationships.push(RelationshipRecord {
            account_id_1,
            account_id_2,
            role_1: role_1.to_string(),
            role_2: role_2.to_string(),
        });
    }

    /// Make attachment requests report success without changing any record
    ///
    /// Simulates a directory that accepts the PUT but leaves the constituent
    /// detached, which callers must detect by re-reading the record.
    pub fn drop_attachments(&self) {
        self.state.lock().unwrap().drop_attachments = true;
    }

    /// Current state of one constituent, if present
    pub fn constituent_snapshot(&self, id: i64) -> Option<Constituent> {
        self.state.lock().unwrap().constituents.get(&id).cloned()
    }

    /// Current state of one household, if present
    pub fn household_snapshot(&self, id: i64) -> Option<HouseholdRecord> {
        self.state.lock().unwrap().households.get(&id).cloned()
    }

    /// Every relationship currently on file
    pub fn relationships_snapshot(&self) -> Vec<RelationshipRecord> {
        self.state.lock().unwrap().relationships.clone()
    }

    /// How many relationship submissions were attempted
    pub fn relationship_submissions(&self) -> usize {
        self.state.lock().unwrap().relationship_submissions
    }
}

impl Default for MockExchange {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstituentLookup for MockExchange {
    type Error = BloomerangError;

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Constituent>, BloomerangError> {
        Ok(self
            .matches_by_name(first_name, last_name)
            .await?
            .into_iter()
            .next())
    }

    async fn matches_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Constituent>, BloomerangError> {
        let state = self.state.lock().unwrap();
        let mut matches: Vec<Constituent> = state
            .constituents
            .values()
            .filter(|c| {
                c.first_name.to_lowercase() == first_name.to_lowercase()
                    && c.last_name.to_lowercase() == last_name.to_lowercase()
            })
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; keep results deterministic
        matches.sort_by_key(|c| c.id);
        Ok(matches)
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Constituent>, BloomerangError> {
        let cleaned = account_number.replace('#', "").trim().to_string();
        let state = self.state.lock().unwrap();
        Ok(state
            .constituents
            .values()
            .find(|c| c.account_number.map(|n| n.to_string() == cleaned).unwrap_or(false))
            .cloned())
    }

    async fn constituent(&self, id: i64) -> Result<Option<Constituent>, BloomerangError> {
        Ok(self.state.lock().unwrap().constituents.get(&id).cloned())
    }

    async fn household(&self, id: i64) -> Result<Option<HouseholdRecord>, BloomerangError> {
        Ok(self.state.lock().unwrap().households.get(&id).cloned())
    }
}

impl RelationshipHistory for MockExchange {
    type Error = BloomerangError;

    async fn relationships(
        &self,
        constituent_id: i64,
    ) -> Result<Vec<RelationshipRecord>, BloomerangError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .relationships
            .iter()
            .filter(|r| r.account_id_1 == constituent_id || r.account_id_2 == constituent_id)
            .cloned()
            .collect())
    }
}

impl HouseholdStore for MockExchange {
    type Error = BloomerangError;

    async fn create_household(
        &self,
        names: &CanonicalNameSet,
        head: &Person,
        members: &[Person],
    ) -> Result<HouseholdRecord, BloomerangError> {
        let mut state = self.state.lock().unwrap();

        let household_id = state.next_household_id;
        state.next_household_id += 1;

        let head_id = state.ensure_constituent(head);
        let mut member_ids = vec![head_id];
        for member in members {
            member_ids.push(state.ensure_constituent(member));
        }

        for id in &member_ids {
            if let Some(constituent) = state.constituents.get_mut(id) {
                constituent.household_id = Some(household_id);
            }
        }

        let record = HouseholdRecord {
            id: household_id,
            full_name: names.full_name.clone(),
            head_id: Some(head_id),
            member_ids,
        };
        state.households.insert(household_id, record.clone());
        Ok(record)
    }

    async fn update_household(
        &self,
        household_id: i64,
        names: &CanonicalNameSet,
        head: &Constituent,
        members: &[Constituent],
    ) -> Result<(), BloomerangError> {
        let mut state = self.state.lock().unwrap();
        let mut member_ids = vec![head.id];
        member_ids.extend(members.iter().map(|m| m.id));

        match state.households.get_mut(&household_id) {
            Some(record) => {
                record.full_name = names.full_name.clone();
                record.head_id = Some(head.id);
                record.member_ids = member_ids;
                Ok(())
            }
            None => Err(BloomerangError::Api {
                status: 404,
                message: format!("Household {} not found", household_id),
            }),
        }
    }

    async fn attach_to_household(
        &self,
        household_id: i64,
        member: &Constituent,
    ) -> Result<(), BloomerangError> {
        let mut state = self.state.lock().unwrap();

        if state.drop_attachments {
            // Report success without touching any record
            return Ok(());
        }

        if !state.households.contains_key(&household_id) {
            return Err(BloomerangError::Api {
                status: 404,
                message: format!("Household {} not found", household_id),
            });
        }

        match state.constituents.get_mut(&member.id) {
            Some(constituent) => constituent.household_id = Some(household_id),
            None => {
                return Err(BloomerangError::Api {
                    status: 404,
                    message: format!("Constituent {} not found", member.id),
                })
            }
        }

        if let Some(record) = state.households.get_mut(&household_id) {
            if !record.member_ids.contains(&member.id) {
                record.member_ids.push(member.id);
            }
        }
        Ok(())
    }

    async fn create_relationship(
        &self,
        account_id_1: i64,
        account_id_2: i64,
        role_1: &str,
        role_2: &str,
    ) -> Result<RelationshipOutcome, BloomerangError> {
        if relationship_role_id(role_1).is_none() {
            return Err(BloomerangError::UnknownRole(role_1.to_string()));
        }
        if relationship_role_id(role_2).is_none() {
            return Err(BloomerangError::UnknownRole(role_2.to_string()));
        }

        let mut state = self.state.lock().unwrap();
        state.relationship_submissions += 1;

        let duplicate = state.relationships.iter().any(|r| {
            (r.account_id_1 == account_id_1 && r.account_id_2 == account_id_2)
                || (r.account_id_1 == account_id_2 && r.account_id_2 == account_id_1)
        });
        if duplicate {
            return Ok(RelationshipOutcome::AlreadyExists);
        }

        state.relationships.push(RelationshipRecord {
            account_id_1,
            account_id_2,
            role_1: role_1.trim().to_lowercase(),
            role_2: role_2.trim().to_lowercase(),
        });
        Ok(RelationshipOutcome::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> CanonicalNameSet {
        CanonicalNameSet::new(
            "The John Smith Family",
            "Smith, John and Jane",
            "John and Jane",
            "Mr. and Mrs. Smith",
            "John and Jane Smith",
            "Mr. and Mrs. John and Jane Smith",
        )
    }

    #[tokio::test]
    async fn test_mock_find_by_name_is_case_insensitive() {
        let exchange = MockExchange::new();
        let id = exchange.seed_constituent("Mary", "Jones");

        let found = exchange.find_by_name("mary", "JONES").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(id));

        let missing = exchange.find_by_name("Mary", "Smith").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_mock_find_by_account_number_ignores_hash() {
        let exchange = MockExchange::new();
        let id = exchange.seed_constituent("Mary", "Jones");

        let found = exchange
            .find_by_account_number(&format!("#{}", id))
            .await
            .unwrap();
        assert_eq!(found.map(|c| c.id), Some(id));
    }

    #[tokio::test]
    async fn test_mock_create_household_assigns_ids_and_roster() {
        let exchange = MockExchange::new();
        let head = Person::new("John", "Smith", "husband").unwrap();
        let wife = Person::new("Jane", "Smith", "wife").unwrap();

        let record = exchange
            .create_household(&names(), &head, &[wife])
            .await
            .unwrap();

        assert_eq!(record.full_name, "The John Smith Family");
        assert_eq!(record.member_ids.len(), 2);
        assert_eq!(record.head_id, Some(record.member_ids[0]));

        for id in &record.member_ids {
            let constituent = exchange.constituent_snapshot(*id).unwrap();
            assert_eq!(constituent.household_id, Some(record.id));
        }
    }

    #[tokio::test]
    async fn test_mock_attach_updates_membership() {
        let exchange = MockExchange::new();
        let head = Person::new("John", "Smith", "husband").unwrap();
        let record = exchange.create_household(&names(), &head, &[]).await.unwrap();

        let child_id = exchange.seed_constituent("Amy", "Smith");
        let child = exchange.constituent_snapshot(child_id).unwrap();

        exchange.attach_to_household(record.id, &child).await.unwrap();

        let updated = exchange.constituent_snapshot(child_id).unwrap();
        assert_eq!(updated.household_id, Some(record.id));
        let household = exchange.household_snapshot(record.id).unwrap();
        assert!(household.member_ids.contains(&child_id));
    }

    #[tokio::test]
    async fn test_mock_drop_attachments_leaves_record_detached() {
        let exchange = MockExchange::new();
        let head = Person::new("John", "Smith", "husband").unwrap();
        let record = exchange.create_household(&names(), &head, &[]).await.unwrap();

        let child_id = exchange.seed_constituent("Amy", "Smith");
        let child = exchange.constituent_snapshot(child_id).unwrap();

        exchange.drop_attachments();
        exchange.attach_to_household(record.id, &child).await.unwrap();

        let unchanged = exchange.constituent_snapshot(child_id).unwrap();
        assert_eq!(unchanged.household_id, None);
    }

    #[tokio::test]
    async fn test_mock_duplicate_relationship_reports_already_exists() {
        let exchange = MockExchange::new();
        let a = exchange.seed_constituent("John", "Smith");
        let b = exchange.seed_constituent("Jane", "Smith");

        let first = exchange.create_relationship(a, b, "husband", "wife").await.unwrap();
        assert_eq!(first, RelationshipOutcome::Created);

        // Same pair in reverse order is still a duplicate
        let second = exchange.create_relationship(b, a, "wife", "husband").await.unwrap();
        assert_eq!(second, RelationshipOutcome::AlreadyExists);

        assert_eq!(exchange.relationship_submissions(), 2);
        assert_eq!(exchange.relationships_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_rejects_unknown_roles() {
        let exchange = MockExchange::new();
        let a = exchange.seed_constituent("John", "Smith");
        let b = exchange.seed_constituent("Amy", "Smith");

        let result = exchange.create_relationship(a, b, "spouse", "wife").await;
        assert!(matches!(result, Err(BloomerangError::UnknownRole(role)) if role == "spouse"));
        assert_eq!(exchange.relationship_submissions(), 0);
    }

    #[tokio::test]
    async fn test_mock_relationships_filter_by_participant() {
        let exchange = MockExchange::new();
        let a = exchange.seed_constituent("John", "Smith");
        let b = exchange.seed_constituent("Jane", "Smith");
        let c = exchange.seed_constituent("Amy", "Smith");
        exchange.seed_relationship(a, "husband", b, "wife");
        exchange.seed_relationship(a, "father", c, "daughter");

        let for_b = exchange.relationships(b).await.unwrap();
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].role_2, "wife");

        let for_c = exchange.relationships(c).await.unwrap();
        assert_eq!(for_c.len(), 1);
        assert_eq!(for_c[0].role_1, "father");
    }

    #[tokio::test]
    async fn test_mock_update_household_replaces_names() {
        let exchange = MockExchange::new();
        let head = Person::new("John", "Smith", "husband").unwrap();
        let record = exchange.create_household(&names(), &head, &[]).await.unwrap();

        let head_constituent = exchange
            .constituent_snapshot(record.member_ids[0])
            .unwrap();
        let new_names = CanonicalNameSet::new(
            "The Smith/Doe Family",
            "Smith, John and Jane Doe",
            "John and Jane",
            "Mr. Smith and Mrs. Doe",
            "John Smith and Jane Doe",
            "Mr. John Smith and Mrs. Jane Doe",
        );

        exchange
            .update_household(record.id, &new_names, &head_constituent, &[])
            .await
            .unwrap();

        let updated = exchange.household_snapshot(record.id).unwrap();
        assert_eq!(updated.full_name, "The Smith/Doe Family");

        let missing = exchange
            .update_household(9999, &new_names, &head_constituent, &[])
            .await;
        assert!(matches!(missing, Err(BloomerangError::Api { status: 404, .. })));
    }
}
