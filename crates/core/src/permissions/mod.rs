//! Capability resolution for organization members.
//!
//! Raw permission flags are stored per team member; resolution applies
//! the manager override once, at a single seam, and is default-deny
//! when no record exists.

pub mod resolver;
pub mod types;

pub use resolver::PermissionSet;
pub use types::{Capability, PermissionRecord};
