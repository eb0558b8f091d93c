//! Core ledger business logic for Amana.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Persistence is consumed through the [`ledger::LedgerStore`]
//! trait; the concrete store lives elsewhere.
//!
//! # Modules
//!
//! - `cache` - TTL cache with lazy eviction
//! - `permissions` - Capability resolution with manager override
//! - `ledger` - Transaction lifecycle, receipt issuance, and the
//!   stale-while-revalidate transaction feed

pub mod cache;
pub mod ledger;
pub mod permissions;
