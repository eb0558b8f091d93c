//! Validation rules for ledger inputs.
//!
//! All rules run before any store call is attempted, so a validation
//! failure never leaves partial state behind.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{CreateTransactionInput, ReceiptInput, TransactionType};

/// Validates a creation input.
///
/// Rules:
/// 1. Amount is strictly positive.
/// 2. Description is non-blank.
/// 3. Receipts attach only to income transactions.
/// 4. Receipt allocations (if any) are each positive and their sum
///    does not exceed the receipt amount.
///
/// # Errors
///
/// Returns the first violated rule as a [`LedgerError`].
pub fn validate_create(input: &CreateTransactionInput) -> Result<(), LedgerError> {
    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::AmountNotPositive);
    }
    if input.description.trim().is_empty() {
        return Err(LedgerError::DescriptionRequired);
    }

    if let Some(receipt) = &input.receipt {
        if input.tx_type == TransactionType::Expense {
            return Err(LedgerError::ReceiptOnExpense);
        }
        validate_receipt(receipt)?;
    }

    Ok(())
}

/// Validates a receipt payload.
fn validate_receipt(receipt: &ReceiptInput) -> Result<(), LedgerError> {
    if receipt.amount <= Decimal::ZERO {
        return Err(LedgerError::AmountNotPositive);
    }

    let mut allocated = Decimal::ZERO;
    for allocation in &receipt.allocations {
        if allocation.amount <= Decimal::ZERO {
            return Err(LedgerError::AmountNotPositive);
        }
        allocated += allocation.amount;
    }

    if allocated > receipt.amount {
        return Err(LedgerError::OverAllocatedReceipt {
            allocated,
            total: receipt.amount,
        });
    }

    Ok(())
}

/// Validates a rejection reason.
///
/// # Errors
///
/// Returns [`LedgerError::RejectionReasonRequired`] if the reason is
/// blank.
pub fn validate_rejection_reason(reason: &str) -> Result<(), LedgerError> {
    if reason.trim().is_empty() {
        return Err(LedgerError::RejectionReasonRequired);
    }
    Ok(())
}
