//! Assembly of denormalized transaction views.
//!
//! Joins normalized rows (transactions, receipts, allocations, members)
//! into the shape UI collaborators consume. Pure functions, no store
//! access.

use std::collections::HashMap;

use amana_shared::types::{MemberId, ReceiptId, TransactionId};

use super::types::{
    MemberRecord, MemberRef, ReceiptAllocationRecord, ReceiptRecord, ReceiptView,
    TransactionRecord, TransactionView,
};

/// Display name used when a member row is no longer present.
const UNKNOWN_MEMBER: &str = "unknown member";

/// Composes denormalized views from normalized rows.
///
/// Output is ordered newest transaction date first; rows sharing a
/// date keep their input order.
#[must_use]
pub fn compose_views(
    transactions: &[TransactionRecord],
    receipts: &[ReceiptRecord],
    allocations: &[ReceiptAllocationRecord],
    members: &[MemberRecord],
) -> Vec<TransactionView> {
    let names: HashMap<MemberId, &str> = members
        .iter()
        .map(|m| (m.id, m.display_name.as_str()))
        .collect();

    let mut orphans_by_receipt: HashMap<ReceiptId, Vec<_>> = HashMap::new();
    for allocation in allocations {
        orphans_by_receipt
            .entry(allocation.receipt_id)
            .or_default()
            .push(allocation.orphan_id);
    }

    let receipt_by_transaction: HashMap<TransactionId, &ReceiptRecord> =
        receipts.iter().map(|r| (r.transaction_id, r)).collect();

    let mut views: Vec<TransactionView> = transactions
        .iter()
        .map(|tx| {
            let receipt = receipt_by_transaction.get(&tx.id).map(|r| ReceiptView {
                id: r.id,
                sponsor_name: r.sponsor_name.clone(),
                category: r.category,
                amount: r.amount,
                related_orphan_ids: orphans_by_receipt.get(&r.id).cloned().unwrap_or_default(),
            });

            TransactionView {
                id: tx.id,
                date: tx.date,
                description: tx.description.clone(),
                amount: tx.amount,
                tx_type: tx.tx_type,
                status: tx.status,
                orphan_id: tx.orphan_id,
                created_by: member_ref(&names, tx.created_by),
                approved_by: tx.approved_by.map(|id| member_ref(&names, id)),
                rejected_by: tx.rejected_by.map(|id| member_ref(&names, id)),
                rejection_reason: tx.rejection_reason.clone(),
                receipt,
            }
        })
        .collect();

    views.sort_by(|a, b| b.date.cmp(&a.date));
    views
}

fn member_ref(names: &HashMap<MemberId, &str>, id: MemberId) -> MemberRef {
    MemberRef {
        id,
        display_name: names
            .get(&id)
            .map_or_else(|| UNKNOWN_MEMBER.to_string(), ToString::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{DonationCategory, TransactionStatus, TransactionType};
    use amana_shared::types::{OrphanId, Role, SponsorId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn member(name: &str) -> MemberRecord {
        MemberRecord {
            id: MemberId::new(),
            display_name: name.to_string(),
            role: Role::TeamMember,
        }
    }

    fn transaction(created_by: MemberId, date: NaiveDate) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new(),
            date,
            description: "Donation".to_string(),
            created_by,
            amount: dec!(500),
            tx_type: TransactionType::Income,
            status: TransactionStatus::Completed,
            orphan_id: None,
            approved_by: None,
            rejected_by: None,
            rejection_reason: None,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn test_compose_resolves_member_names() {
        let creator = member("Amal");
        let approver = member("Karim");
        let mut tx = transaction(creator.id, date(1));
        tx.approved_by = Some(approver.id);

        let views = compose_views(&[tx], &[], &[], &[creator.clone(), approver.clone()]);

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].created_by.display_name, "Amal");
        assert_eq!(
            views[0].approved_by.as_ref().unwrap().display_name,
            "Karim"
        );
        assert!(views[0].rejected_by.is_none());
    }

    #[test]
    fn test_compose_unknown_member_fallback() {
        let tx = transaction(MemberId::new(), date(1));
        let views = compose_views(&[tx], &[], &[], &[]);
        assert_eq!(views[0].created_by.display_name, UNKNOWN_MEMBER);
    }

    #[test]
    fn test_compose_attaches_receipt_and_orphans() {
        let creator = member("Amal");
        let tx = transaction(creator.id, date(1));
        let receipt = ReceiptRecord {
            id: ReceiptId::new(),
            transaction_id: tx.id,
            sponsor_id: SponsorId::new(),
            sponsor_name: "Hassan Foundation".to_string(),
            category: DonationCategory::Sponsorship,
            amount: dec!(500),
            date: tx.date,
            description: None,
        };
        let orphan_a = OrphanId::new();
        let orphan_b = OrphanId::new();
        let allocations = vec![
            ReceiptAllocationRecord {
                receipt_id: receipt.id,
                orphan_id: orphan_a,
                amount: dec!(300),
            },
            ReceiptAllocationRecord {
                receipt_id: receipt.id,
                orphan_id: orphan_b,
                amount: dec!(200),
            },
        ];

        let views = compose_views(&[tx], &[receipt.clone()], &allocations, &[creator]);

        let view_receipt = views[0].receipt.as_ref().unwrap();
        assert_eq!(view_receipt.id, receipt.id);
        assert_eq!(view_receipt.sponsor_name, "Hassan Foundation");
        assert_eq!(view_receipt.related_orphan_ids, vec![orphan_a, orphan_b]);
    }

    #[test]
    fn test_compose_no_receipt_for_unrelated_transaction() {
        let creator = member("Amal");
        let tx_with = transaction(creator.id, date(1));
        let tx_without = transaction(creator.id, date(2));
        let receipt = ReceiptRecord {
            id: ReceiptId::new(),
            transaction_id: tx_with.id,
            sponsor_id: SponsorId::new(),
            sponsor_name: "Hassan Foundation".to_string(),
            category: DonationCategory::General,
            amount: dec!(500),
            date: tx_with.date,
            description: None,
        };

        let views = compose_views(
            &[tx_with.clone(), tx_without.clone()],
            &[receipt],
            &[],
            &[creator],
        );

        let with = views.iter().find(|v| v.id == tx_with.id).unwrap();
        let without = views.iter().find(|v| v.id == tx_without.id).unwrap();
        assert!(with.receipt.is_some());
        assert!(without.receipt.is_none());
    }

    #[test]
    fn test_compose_orders_newest_first() {
        let creator = member("Amal");
        let old = transaction(creator.id, date(1));
        let newer = transaction(creator.id, date(15));
        let newest = transaction(creator.id, date(28));

        let views = compose_views(
            &[old.clone(), newest.clone(), newer.clone()],
            &[],
            &[],
            &[creator],
        );

        let ids: Vec<_> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![newest.id, newer.id, old.id]);
    }

    #[test]
    fn test_compose_same_date_keeps_input_order() {
        let creator = member("Amal");
        let first = transaction(creator.id, date(10));
        let second = transaction(creator.id, date(10));

        let views = compose_views(&[first.clone(), second.clone()], &[], &[], &[creator]);

        assert_eq!(views[0].id, first.id);
        assert_eq!(views[1].id, second.id);
    }

    #[test]
    fn test_compose_carries_rejection_metadata() {
        let creator = member("Amal");
        let rejecter = member("Karim");
        let mut tx = transaction(creator.id, date(5));
        tx.status = TransactionStatus::Rejected;
        tx.rejected_by = Some(rejecter.id);
        tx.rejection_reason = Some("missing documentation".to_string());

        let views = compose_views(&[tx], &[], &[], &[creator, rejecter]);

        assert_eq!(views[0].status, TransactionStatus::Rejected);
        assert_eq!(
            views[0].rejection_reason.as_deref(),
            Some("missing documentation")
        );
        assert_eq!(
            views[0].rejected_by.as_ref().unwrap().display_name,
            "Karim"
        );
    }
}
