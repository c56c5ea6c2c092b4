//! Hearth Inference Engine
//!
//! Pure household inference: canonical name formatting, head-of-household
//! ordering, pairwise relationship resolution, and relationship graph
//! building. Every operation in this crate is a synchronous, total function
//! of its inputs with no I/O and no shared state, safe to call from any
//! number of concurrent callers without coordination. Lookup and persistence
//! live behind the `hearth_domain::traits` ports and are orchestrated
//! elsewhere.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod naming;
pub mod order;
pub mod resolver;

pub use graph::{plan_household, resolve_insertion, MemberRole};
pub use naming::{FormatRequest, NameFormatter, NamingConfig, SpouseTitle};
pub use order::order_adults;
pub use resolver::{recorded_parent_role, resolve_pair, sibling_pair};
