//! Financial ledger core.
//!
//! This module implements the subsystem with real invariants and
//! failure semantics:
//! - Transaction creation with permission-decided status
//! - The approval/rejection state machine
//! - Receipt issuance for income, with per-orphan allocations
//! - Cached, stale-while-revalidate access to the transaction list
//!
//! # Modules
//!
//! - `types` - Records, inputs, and denormalized views
//! - `error` - Ledger error taxonomy
//! - `validation` - Rules enforced before any store call
//! - `store` - Persistence contract
//! - `compose` - Denormalized view assembly
//! - `feed` - Stale-while-revalidate read accessor
//! - `service` - Transaction lifecycle state machine

pub mod compose;
pub mod error;
pub mod feed;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use compose::compose_views;
pub use error::LedgerError;
pub use feed::{
    FeedSnapshot, RefreshObserver, TracingObserver, TransactionFeed, TRANSACTIONS_CACHE_KEY,
};
pub use service::LedgerService;
pub use store::LedgerStore;
pub use types::{
    AllocationInput, CreateTransactionInput, DonationCategory, MemberRecord, MemberRef,
    ReceiptAllocationRecord, ReceiptBundle, ReceiptInput, ReceiptRecord, ReceiptView,
    SponsorRecord, TransactionPatch, TransactionRecord, TransactionStatus, TransactionType,
    TransactionView,
};
