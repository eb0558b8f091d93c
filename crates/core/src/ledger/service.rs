//! Transaction lifecycle service.
//!
//! Owns the state machine for a transaction: creation (status decided
//! by permission), approval, rejection, deletion. Every mutation
//! authorizes against a permission snapshot resolved at call time,
//! performs a single atomic store mutation, and then invalidates the
//! feed and forces a non-cached refetch so the denormalized list is
//! always store-derived truth.

use std::sync::Arc;

use amana_shared::types::{Actor, TransactionId};

use super::compose::compose_views;
use super::error::LedgerError;
use super::feed::TransactionFeed;
use super::store::LedgerStore;
use super::types::{
    CreateTransactionInput, MemberRecord, ReceiptAllocationRecord, ReceiptBundle, ReceiptRecord,
    TransactionPatch, TransactionRecord, TransactionStatus, TransactionType, TransactionView,
};
use super::validation::{validate_create, validate_rejection_reason};
use crate::permissions::{Capability, PermissionSet};
use amana_shared::types::ReceiptId;

/// Lifecycle manager for ledger transactions.
pub struct LedgerService<S: LedgerStore> {
    store: Arc<S>,
    feed: Arc<TransactionFeed<S>>,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a service over the given store and feed.
    #[must_use]
    pub fn new(store: Arc<S>, feed: Arc<TransactionFeed<S>>) -> Self {
        Self { store, feed }
    }

    /// The read accessor exposed to UI collaborators.
    #[must_use]
    pub fn feed(&self) -> Arc<TransactionFeed<S>> {
        Arc::clone(&self.feed)
    }

    /// Resolves the actor's effective capabilities at call time.
    pub async fn permission_snapshot(&self, actor: &Actor) -> Result<PermissionSet, LedgerError> {
        let record = self.store.find_permissions(actor.id).await?;
        Ok(PermissionSet::resolve(record.as_ref()))
    }

    /// Advisory predicate for rendering approve/reject actions.
    ///
    /// The UI may hide buttons based on this, but enforcement lives in
    /// the mutation guards.
    pub async fn can_approve_expense(&self, actor: &Actor) -> Result<bool, LedgerError> {
        Ok(self.permission_snapshot(actor).await?.can_approve_expense)
    }

    /// Advisory predicate for rendering the delete action.
    pub async fn can_edit_transactions(&self, actor: &Actor) -> Result<bool, LedgerError> {
        Ok(self.permission_snapshot(actor).await?.can_edit_transactions)
    }

    /// Advisory predicate: whether the actor's expenses complete
    /// without approval.
    pub async fn can_create_expense_directly(&self, actor: &Actor) -> Result<bool, LedgerError> {
        Ok(self.permission_snapshot(actor).await?.can_create_expense)
    }

    /// Creates a transaction, with receipt issuance for income.
    ///
    /// Status rule: income is always `Completed` (it records money
    /// already received); an expense is `Completed` iff the actor may
    /// create expenses directly, else `Pending`. An income receipt
    /// naming an unknown sponsor fails the whole creation; no partial
    /// rows persist.
    ///
    /// Returns the fully composed view of the new transaction.
    ///
    /// # Errors
    ///
    /// Validation failures, `SponsorNotFound`, or store failures.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateTransactionInput,
    ) -> Result<TransactionView, LedgerError> {
        validate_create(&input)?;
        let permissions = self.permission_snapshot(actor).await?;

        let CreateTransactionInput {
            date,
            description,
            amount,
            tx_type,
            orphan_id,
            receipt,
        } = input;

        let status = match tx_type {
            TransactionType::Income => TransactionStatus::Completed,
            TransactionType::Expense if permissions.can_create_expense => {
                TransactionStatus::Completed
            }
            TransactionType::Expense => TransactionStatus::Pending,
        };

        let transaction_id = TransactionId::new();

        // Resolve the sponsor before touching the store's transaction
        // table; an income without its receipt is not an acceptable
        // outcome.
        let bundle = match receipt {
            Some(payload) => {
                let sponsor = self
                    .store
                    .find_sponsor_by_name(payload.sponsor_name.clone())
                    .await?
                    .ok_or_else(|| LedgerError::SponsorNotFound(payload.sponsor_name.clone()))?;

                let receipt_id = ReceiptId::new();
                let allocations = payload
                    .allocations
                    .iter()
                    .map(|a| ReceiptAllocationRecord {
                        receipt_id,
                        orphan_id: a.orphan_id,
                        amount: a.amount,
                    })
                    .collect();

                Some(ReceiptBundle {
                    receipt: ReceiptRecord {
                        id: receipt_id,
                        transaction_id,
                        sponsor_id: sponsor.id,
                        sponsor_name: sponsor.name,
                        category: payload.category,
                        amount: payload.amount,
                        date,
                        description: payload.description,
                    },
                    allocations,
                })
            }
            None => None,
        };

        let record = TransactionRecord {
            id: transaction_id,
            date,
            description,
            created_by: actor.id,
            amount,
            tx_type,
            status,
            orphan_id,
            approved_by: None,
            rejected_by: None,
            rejection_reason: None,
        };

        let created = self
            .store
            .create_transaction(record, bundle.clone())
            .await?;
        tracing::debug!(id = %created.id, tx_type = %created.tx_type, "transaction created");

        let views = self.resync().await;
        if let Some(view) = views.into_iter().find(|v| v.id == created.id) {
            return Ok(view);
        }

        // The resync failed or lagged; compose locally from what we
        // just persisted so the caller still gets the full record.
        Ok(Self::compose_created(actor, &created, bundle.as_ref()))
    }

    /// Approves a transaction, overwriting any prior rejection.
    ///
    /// Idempotent in effect: approving an already-completed
    /// transaction re-stamps the approver and nothing else.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` without `can_approve_expense`;
    /// `TransactionNotFound` if the row is gone.
    pub async fn approve(&self, actor: &Actor, id: TransactionId) -> Result<(), LedgerError> {
        let permissions = self.permission_snapshot(actor).await?;
        if !permissions.can_approve_expense {
            return Err(LedgerError::PermissionDenied {
                capability: Capability::ApproveExpense,
            });
        }

        let patch = TransactionPatch {
            status: TransactionStatus::Completed,
            approved_by: Some(actor.id),
            rejected_by: None,
            rejection_reason: None,
        };
        self.store.update_transaction(id, patch).await?;
        tracing::debug!(%id, "transaction approved");

        self.resync().await;
        Ok(())
    }

    /// Rejects a transaction with a mandatory reason, overwriting any
    /// prior approval.
    ///
    /// # Errors
    ///
    /// `RejectionReasonRequired` for a blank reason (before any store
    /// call); `PermissionDenied` without `can_approve_expense`;
    /// `TransactionNotFound` if the row is gone.
    pub async fn reject(
        &self,
        actor: &Actor,
        id: TransactionId,
        reason: &str,
    ) -> Result<(), LedgerError> {
        validate_rejection_reason(reason)?;

        let permissions = self.permission_snapshot(actor).await?;
        if !permissions.can_approve_expense {
            return Err(LedgerError::PermissionDenied {
                capability: Capability::ApproveExpense,
            });
        }

        let patch = TransactionPatch {
            status: TransactionStatus::Rejected,
            approved_by: None,
            rejected_by: Some(actor.id),
            rejection_reason: Some(reason.trim().to_string()),
        };
        self.store.update_transaction(id, patch).await?;
        tracing::debug!(%id, "transaction rejected");

        self.resync().await;
        Ok(())
    }

    /// Hard-deletes a transaction; the store cascades to the receipt
    /// and allocation rows.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` without `can_edit_transactions`;
    /// `TransactionNotFound` if the row is gone.
    pub async fn delete(&self, actor: &Actor, id: TransactionId) -> Result<(), LedgerError> {
        let permissions = self.permission_snapshot(actor).await?;
        if !permissions.can_edit_transactions {
            return Err(LedgerError::PermissionDenied {
                capability: Capability::EditTransactions,
            });
        }

        self.store.delete_transaction(id).await?;
        tracing::debug!(%id, "transaction deleted");

        self.resync().await;
        Ok(())
    }

    /// Invalidates the cached list and forces a fresh fetch.
    ///
    /// A refetch failure does not fail the mutation that triggered it;
    /// the store already holds the truth and the feed carries the
    /// error.
    async fn resync(&self) -> Vec<TransactionView> {
        self.feed.invalidate();
        match self.feed.force_refresh().await {
            Ok(views) => views,
            Err(error) => {
                tracing::warn!(%error, "post-mutation refresh failed");
                Vec::new()
            }
        }
    }

    fn compose_created(
        actor: &Actor,
        record: &TransactionRecord,
        bundle: Option<&ReceiptBundle>,
    ) -> TransactionView {
        let members = vec![MemberRecord {
            id: actor.id,
            display_name: actor.display_name.clone(),
            role: actor.role,
        }];
        let receipts: Vec<_> = bundle.map(|b| b.receipt.clone()).into_iter().collect();
        let allocations: Vec<_> = bundle.map(|b| b.allocations.clone()).unwrap_or_default();

        let mut views = compose_views(
            std::slice::from_ref(record),
            &receipts,
            &allocations,
            &members,
        );
        views.remove(0)
    }
}
