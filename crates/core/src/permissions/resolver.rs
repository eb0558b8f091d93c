//! Resolution of raw permission records into effective capabilities.

use serde::{Deserialize, Serialize};

use super::types::{Capability, PermissionRecord};

/// Effective capabilities for an actor.
///
/// Computed once per permission-set load: each predicate is the stored
/// flag OR the manager override, so the override cannot drift between
/// call sites. Resolving the absence of a record yields default-deny.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// May edit orphan records.
    pub can_edit_orphans: bool,
    /// May edit sponsor records.
    pub can_edit_sponsors: bool,
    /// May edit or delete transactions.
    pub can_edit_transactions: bool,
    /// May create expenses that complete without approval.
    pub can_create_expense: bool,
    /// May approve or reject pending expenses.
    pub can_approve_expense: bool,
    /// May view financial data.
    pub can_view_financials: bool,
    /// Whether the manager override was in effect at resolution time.
    pub is_manager: bool,
}

impl PermissionSet {
    /// Resolves a raw record (or its absence) into effective capabilities.
    #[must_use]
    pub fn resolve(record: Option<&PermissionRecord>) -> Self {
        let Some(record) = record else {
            return Self::default();
        };

        let manager = record.is_manager;
        Self {
            can_edit_orphans: record.can_edit_orphans || manager,
            can_edit_sponsors: record.can_edit_sponsors || manager,
            can_edit_transactions: record.can_edit_transactions || manager,
            can_create_expense: record.can_create_expense || manager,
            can_approve_expense: record.can_approve_expense || manager,
            can_view_financials: record.can_view_financials || manager,
            is_manager: manager,
        }
    }

    /// Returns true if the set grants the given capability.
    #[must_use]
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::EditOrphans => self.can_edit_orphans,
            Capability::EditSponsors => self.can_edit_sponsors,
            Capability::EditTransactions => self.can_edit_transactions,
            Capability::CreateExpense => self.can_create_expense,
            Capability::ApproveExpense => self.can_approve_expense,
            Capability::ViewFinancials => self.can_view_financials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amana_shared::types::MemberId;
    use rstest::rstest;

    #[test]
    fn test_absent_record_denies_everything() {
        let set = PermissionSet::resolve(None);
        assert_eq!(set, PermissionSet::default());
        assert!(!set.can_view_financials);
        assert!(!set.is_manager);
    }

    #[rstest]
    #[case(Capability::EditOrphans)]
    #[case(Capability::EditSponsors)]
    #[case(Capability::EditTransactions)]
    #[case(Capability::CreateExpense)]
    #[case(Capability::ApproveExpense)]
    #[case(Capability::ViewFinancials)]
    fn test_manager_override_wins_over_explicit_false(#[case] capability: Capability) {
        // Every stored flag is explicitly false; only the override is set.
        let record = PermissionRecord::manager(MemberId::new());
        let set = PermissionSet::resolve(Some(&record));
        assert!(set.allows(capability));
        assert!(set.is_manager);
    }

    #[test]
    fn test_individual_flags_pass_through_without_override() {
        let record = PermissionRecord {
            can_approve_expense: true,
            can_view_financials: true,
            ..PermissionRecord::none(MemberId::new())
        };
        let set = PermissionSet::resolve(Some(&record));

        assert!(set.can_approve_expense);
        assert!(set.can_view_financials);
        assert!(!set.can_edit_orphans);
        assert!(!set.can_edit_transactions);
        assert!(!set.can_create_expense);
        assert!(!set.is_manager);
    }

    #[test]
    fn test_all_false_record_resolves_to_default_deny() {
        let record = PermissionRecord::none(MemberId::new());
        let set = PermissionSet::resolve(Some(&record));
        assert_eq!(set, PermissionSet::default());
    }

    #[test]
    fn test_allows_maps_each_capability_to_its_flag() {
        let set = PermissionSet {
            can_edit_transactions: true,
            ..PermissionSet::default()
        };
        assert!(set.allows(Capability::EditTransactions));
        assert!(!set.allows(Capability::ApproveExpense));
    }
}
