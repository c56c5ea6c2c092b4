//! Hearth Registrar
//!
//! Orchestration layer between the household inference engine and the
//! donor directory.
//!
//! # Overview
//!
//! The registrar owns the flows the engine itself stays out of:
//! - **Resolution**: matching typed-in people to directory records by
//!   account number or name, with duplicate-name warnings
//! - **Creation**: planning a household, storing it, recovering ids for
//!   newly created members, and submitting every planned relationship
//! - **Growth**: attaching a child or spouse to an existing household,
//!   with recorded parent roles overriding typed-in ones and spouse
//!   additions renaming the household
//! - **Verification**: re-reading records after attachment, because the
//!   directory can accept an update without applying it
//!
//! # Architecture
//!
//! [`Registrar`] is generic over the directory ports defined in
//! `hearth-domain`, so the same flows run against the live client or an
//! in-memory mock. Reads go through a per-registrar [`DirectoryCache`]
//! rather than shared state; every mutation invalidates the affected
//! entries.
//!
//! # Usage
//!
//! ```no_run
//! use hearth_registrar::{PersonSpec, Registrar};
//! # async fn example<C>(client: C)
//! # where
//! #     C: hearth_domain::traits::ConstituentLookup
//! #         + hearth_domain::traits::RelationshipHistory
//! #         + hearth_domain::traits::HouseholdStore,
//! #     <C as hearth_domain::traits::ConstituentLookup>::Error: std::fmt::Display,
//! #     <C as hearth_domain::traits::RelationshipHistory>::Error: std::fmt::Display,
//! #     <C as hearth_domain::traits::HouseholdStore>::Error: std::fmt::Display,
//! # {
//! let mut registrar = Registrar::default_config(client);
//!
//! let outcome = registrar
//!     .create_household(
//!         PersonSpec::new("John", "Smith", "husband"),
//!         Some(PersonSpec::new("Jane", "Smith", "wife")),
//!         vec![],
//!     )
//!     .await
//!     .unwrap();
//!
//! println!(
//!     "{}: {} relationships recorded",
//!     outcome.household.full_name, outcome.relationships_created
//! );
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod registrar;

pub use cache::DirectoryCache;
pub use error::RegistrarError;
pub use registrar::{
    HouseholdCreation, MemberAddition, PersonSpec, Registrar, RegistrarConfig,
};
