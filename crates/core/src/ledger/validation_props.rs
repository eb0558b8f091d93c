//! Property-based tests for ledger input validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use amana_shared::types::OrphanId;

use super::error::LedgerError;
use super::types::{
    AllocationInput, CreateTransactionInput, DonationCategory, ReceiptInput, TransactionType,
};
use super::validation::validate_create;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a non-positive amount (<= 0).
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn transaction_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Income),
        Just(TransactionType::Expense)
    ]
}

fn make_input(tx_type: TransactionType, amount: Decimal) -> CreateTransactionInput {
    CreateTransactionInput {
        date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        description: "Monthly support".to_string(),
        amount,
        tx_type,
        orphan_id: None,
        receipt: None,
    }
}

fn make_receipt(amount: Decimal, allocations: Vec<Decimal>) -> ReceiptInput {
    ReceiptInput {
        sponsor_name: "Hassan Foundation".to_string(),
        category: DonationCategory::Sponsorship,
        amount,
        description: None,
        allocations: allocations
            .into_iter()
            .map(|amount| AllocationInput {
                orphan_id: OrphanId::new(),
                amount,
            })
            .collect(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any strictly positive amount with a non-blank description passes.
    #[test]
    fn prop_positive_amount_accepted(
        tx_type in transaction_type(),
        amount in positive_amount(),
    ) {
        let input = make_input(tx_type, amount);
        prop_assert!(validate_create(&input).is_ok());
    }

    /// Any non-positive amount is rejected before reaching the store.
    #[test]
    fn prop_non_positive_amount_rejected(
        tx_type in transaction_type(),
        amount in non_positive_amount(),
    ) {
        let input = make_input(tx_type, amount);
        prop_assert!(matches!(
            validate_create(&input),
            Err(LedgerError::AmountNotPositive)
        ));
    }

    /// Allocations that stay within the receipt amount always pass.
    #[test]
    fn prop_allocations_within_total_accepted(
        shares in proptest::collection::vec(1i64..1_000_000i64, 0..6),
    ) {
        let total: i64 = shares.iter().sum::<i64>().max(1);
        let allocations: Vec<Decimal> = shares.iter().map(|&c| Decimal::new(c, 2)).collect();
        let mut input = make_input(TransactionType::Income, Decimal::new(total, 2));
        input.receipt = Some(make_receipt(Decimal::new(total, 2), allocations));
        prop_assert!(validate_create(&input).is_ok());
    }

    /// Allocations that exceed the receipt amount are always rejected.
    #[test]
    fn prop_over_allocation_rejected(
        shares in proptest::collection::vec(1i64..1_000_000i64, 1..6),
        deficit in 1i64..100i64,
    ) {
        let allocated: i64 = shares.iter().sum();
        let total = allocated - deficit;
        prop_assume!(total > 0);

        let allocations: Vec<Decimal> = shares.iter().map(|&c| Decimal::new(c, 2)).collect();
        let mut input = make_input(TransactionType::Income, Decimal::new(total, 2));
        input.receipt = Some(make_receipt(Decimal::new(total, 2), allocations));
        prop_assert!(
            matches!(
                validate_create(&input),
                Err(LedgerError::OverAllocatedReceipt { .. })
            ),
            "expected Err(LedgerError::OverAllocatedReceipt)"
        );
    }

    /// A receipt on an expense never validates, whatever the amounts.
    #[test]
    fn prop_receipt_on_expense_rejected(
        amount in positive_amount(),
        receipt_amount in positive_amount(),
    ) {
        let mut input = make_input(TransactionType::Expense, amount);
        input.receipt = Some(make_receipt(receipt_amount, vec![]));
        prop_assert!(matches!(
            validate_create(&input),
            Err(LedgerError::ReceiptOnExpense)
        ));
    }
}
