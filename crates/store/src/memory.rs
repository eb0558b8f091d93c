//! In-memory tables behind the ledger store contract.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use amana_core::ledger::{
    LedgerError, LedgerStore, MemberRecord, ReceiptAllocationRecord, ReceiptBundle, ReceiptRecord,
    SponsorRecord, TransactionPatch, TransactionRecord,
};
use amana_core::permissions::PermissionRecord;
use amana_shared::types::{MemberId, TransactionId};

#[derive(Default)]
struct Tables {
    transactions: Vec<TransactionRecord>,
    receipts: Vec<ReceiptRecord>,
    allocations: Vec<ReceiptAllocationRecord>,
    members: Vec<MemberRecord>,
    sponsors: Vec<SponsorRecord>,
    permissions: HashMap<MemberId, PermissionRecord>,
}

/// In-memory implementation of [`LedgerStore`].
///
/// Each mutating call is atomic under one table lock, mirroring the
/// remote store's single-operation write semantics. Cascading deletes
/// remove receipt and allocation rows together with their transaction.
///
/// Test hooks: listing can be made to fail, and responses can be
/// delayed while still returning the data as it was when the call
/// arrived (a slow response carrying an old snapshot).
#[derive(Default)]
pub struct MemoryLedgerStore {
    tables: Mutex<Tables>,
    fail_listing: AtomicBool,
    list_delay: Mutex<Option<Duration>>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a member row.
    pub fn add_member(&self, member: MemberRecord) {
        self.lock_tables().members.push(member);
    }

    /// Seeds a sponsor row.
    pub fn add_sponsor(&self, sponsor: SponsorRecord) {
        self.lock_tables().sponsors.push(sponsor);
    }

    /// Seeds or replaces a member's permission record.
    pub fn set_permissions(&self, record: PermissionRecord) {
        self.lock_tables()
            .permissions
            .insert(record.member_id, record);
    }

    /// Makes every subsequent transaction listing fail until reset.
    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Delays every subsequent listing response by `delay`.
    ///
    /// The rows returned are snapshotted before the delay, so a slow
    /// response carries the data as of the moment the call arrived.
    pub fn set_list_delay(&self, delay: Option<Duration>) {
        *self.list_delay.lock().expect("store mutex poisoned") = delay;
    }

    /// Number of transaction rows currently persisted.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.lock_tables().transactions.len()
    }

    /// Number of receipt rows currently persisted.
    #[must_use]
    pub fn receipt_count(&self) -> usize {
        self.lock_tables().receipts.len()
    }

    /// Number of allocation rows currently persisted.
    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.lock_tables().allocations.len()
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("store mutex poisoned")
    }

    async fn apply_list_delay(&self) {
        let delay = *self.list_delay.lock().expect("store mutex poisoned");
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl LedgerStore for MemoryLedgerStore {
    async fn list_transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(LedgerError::Store("injected listing failure".to_string()));
        }
        // Snapshot before the simulated latency.
        let mut rows = self.lock_tables().transactions.clone();
        self.apply_list_delay().await;
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn list_receipts(&self) -> Result<Vec<ReceiptRecord>, LedgerError> {
        let rows = self.lock_tables().receipts.clone();
        self.apply_list_delay().await;
        Ok(rows)
    }

    async fn list_allocations(&self) -> Result<Vec<ReceiptAllocationRecord>, LedgerError> {
        let rows = self.lock_tables().allocations.clone();
        self.apply_list_delay().await;
        Ok(rows)
    }

    async fn list_members(&self) -> Result<Vec<MemberRecord>, LedgerError> {
        Ok(self.lock_tables().members.clone())
    }

    async fn find_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, LedgerError> {
        Ok(self
            .lock_tables()
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_sponsor_by_name(
        &self,
        name: String,
    ) -> Result<Option<SponsorRecord>, LedgerError> {
        Ok(self
            .lock_tables()
            .sponsors
            .iter()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn find_permissions(
        &self,
        member_id: MemberId,
    ) -> Result<Option<PermissionRecord>, LedgerError> {
        Ok(self.lock_tables().permissions.get(&member_id).cloned())
    }

    async fn create_transaction(
        &self,
        transaction: TransactionRecord,
        receipt: Option<ReceiptBundle>,
    ) -> Result<TransactionRecord, LedgerError> {
        let mut tables = self.lock_tables();
        tables.transactions.push(transaction.clone());
        if let Some(bundle) = receipt {
            tables.receipts.push(bundle.receipt);
            tables.allocations.extend(bundle.allocations);
        }
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<TransactionRecord, LedgerError> {
        let mut tables = self.lock_tables();
        let row = tables
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LedgerError::TransactionNotFound(id))?;

        row.status = patch.status;
        row.approved_by = patch.approved_by;
        row.rejected_by = patch.rejected_by;
        row.rejection_reason = patch.rejection_reason;
        Ok(row.clone())
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), LedgerError> {
        let mut tables = self.lock_tables();
        let before = tables.transactions.len();
        tables.transactions.retain(|t| t.id != id);
        if tables.transactions.len() == before {
            return Err(LedgerError::TransactionNotFound(id));
        }

        // Cascade: receipt rows for the transaction, then their
        // allocation rows.
        let receipt_ids: Vec<_> = tables
            .receipts
            .iter()
            .filter(|r| r.transaction_id == id)
            .map(|r| r.id)
            .collect();
        tables.receipts.retain(|r| r.transaction_id != id);
        tables
            .allocations
            .retain(|a| !receipt_ids.contains(&a.receipt_id));
        Ok(())
    }
}
