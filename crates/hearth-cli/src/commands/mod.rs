//! Command implementations.

pub mod add;
pub mod create;
pub mod lookup;
pub mod preview;
pub mod profile;

pub use add::{execute_add_child, execute_add_spouse};
pub use create::execute_create;
pub use lookup::execute_lookup;
pub use preview::execute_preview;
pub use profile::execute_profile;
