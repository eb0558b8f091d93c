//! Persistence contract for the ledger core.
//!
//! One logical contract the core depends on, independent of the
//! concrete store product. Implemented by `amana-store` (in-memory)
//! and by the remote store adapter outside this workspace. The actor's
//! identity rides out-of-band on every call; the store is the arbiter
//! of write ordering, and each mutating call is a single atomic remote
//! operation.

use std::future::Future;

use amana_shared::types::{MemberId, TransactionId};

use super::error::LedgerError;
use super::types::{
    MemberRecord, ReceiptAllocationRecord, ReceiptBundle, ReceiptRecord, SponsorRecord,
    TransactionPatch, TransactionRecord,
};
use crate::permissions::PermissionRecord;

/// Repository trait for ledger persistence.
pub trait LedgerStore: Send + Sync + 'static {
    /// Lists all transactions, newest date first.
    fn list_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<TransactionRecord>, LedgerError>> + Send;

    /// Lists all receipts.
    fn list_receipts(&self)
        -> impl Future<Output = Result<Vec<ReceiptRecord>, LedgerError>> + Send;

    /// Lists all receipt allocation rows.
    fn list_allocations(
        &self,
    ) -> impl Future<Output = Result<Vec<ReceiptAllocationRecord>, LedgerError>> + Send;

    /// Lists all members (for display-name denormalization).
    fn list_members(&self) -> impl Future<Output = Result<Vec<MemberRecord>, LedgerError>> + Send;

    /// Finds a transaction by ID.
    fn find_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<Option<TransactionRecord>, LedgerError>> + Send;

    /// Finds a sponsor by exact name.
    fn find_sponsor_by_name(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Option<SponsorRecord>, LedgerError>> + Send;

    /// Finds the raw permission record for a member, if any.
    fn find_permissions(
        &self,
        member_id: MemberId,
    ) -> impl Future<Output = Result<Option<PermissionRecord>, LedgerError>> + Send;

    /// Inserts a transaction, with its receipt and allocation rows as
    /// one logical operation. Nothing persists if any part fails.
    fn create_transaction(
        &self,
        transaction: TransactionRecord,
        receipt: Option<ReceiptBundle>,
    ) -> impl Future<Output = Result<TransactionRecord, LedgerError>> + Send;

    /// Applies a workflow patch to a transaction and returns the
    /// affected row.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if no row matches.
    fn update_transaction(
        &self,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> impl Future<Output = Result<TransactionRecord, LedgerError>> + Send;

    /// Hard-deletes a transaction; the store cascades to any attached
    /// receipt and its allocation rows.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if no row matches.
    fn delete_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;
}
