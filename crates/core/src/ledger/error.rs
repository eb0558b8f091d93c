//! Ledger error types.
//!
//! The taxonomy every ledger operation reports through: permission
//! denials (structured, recoverable), missing references, validation
//! failures caught before any store call, and store failures.

use rust_decimal::Decimal;
use thiserror::Error;

use amana_shared::types::TransactionId;

use crate::permissions::Capability;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Actor lacks the capability required for the operation.
    #[error("Permission denied: requires {capability}")]
    PermissionDenied {
        /// The capability that was missing.
        capability: Capability,
    },

    /// Transaction not found.
    #[error("Transaction {0} not found")]
    TransactionNotFound(TransactionId),

    /// No sponsor record matches the receipt's sponsor name.
    #[error("Sponsor \"{0}\" not found")]
    SponsorNotFound(String),

    /// Amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    AmountNotPositive,

    /// Description is required but blank.
    #[error("Description is required")]
    DescriptionRequired,

    /// Rejection reason is required but blank.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// A receipt was supplied on a non-income transaction.
    #[error("Receipts can only be attached to income transactions")]
    ReceiptOnExpense,

    /// Allocation rows sum past the receipt amount.
    #[error("Allocations total {allocated} exceeds receipt amount {total}")]
    OverAllocatedReceipt {
        /// Sum of per-orphan allocation amounts.
        allocated: Decimal,
        /// The receipt amount.
        total: Decimal,
    },

    /// Remote store failure.
    #[error("Store error: {0}")]
    Store(String),
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PermissionDenied { .. } => 403,
            Self::TransactionNotFound(_) | Self::SponsorNotFound(_) => 404,
            Self::AmountNotPositive
            | Self::DescriptionRequired
            | Self::RejectionReasonRequired
            | Self::ReceiptOnExpense
            | Self::OverAllocatedReceipt { .. } => 400,
            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::SponsorNotFound(_) => "SPONSOR_NOT_FOUND",
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::DescriptionRequired => "DESCRIPTION_REQUIRED",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::ReceiptOnExpense => "RECEIPT_ON_EXPENSE",
            Self::OverAllocatedReceipt { .. } => "OVER_ALLOCATED_RECEIPT",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}
