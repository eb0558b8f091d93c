//! In-memory ledger store for Amana.
//!
//! Implements the `amana-core` persistence contract against plain
//! in-process tables. Serves as the reference store implementation and
//! as the test double for exercising the lifecycle service and the
//! stale-while-revalidate feed, including failure injection and
//! response delays.

pub mod memory;

pub use memory::MemoryLedgerStore;
