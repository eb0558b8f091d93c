//! Shared domain types.

pub mod actor;
pub mod id;

pub use actor::{Actor, Role};
pub use id::{MemberId, OrphanId, ReceiptId, SponsorId, TransactionId};
