//! Permission domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

use amana_shared::types::MemberId;

/// Raw permission flags as persisted, one record per team member.
///
/// Absence of a record is equivalent to every flag being false. The
/// stored flags are never consulted directly by callers; they are
/// resolved into a [`super::PermissionSet`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// The member this record belongs to.
    pub member_id: MemberId,
    /// May edit orphan records.
    pub can_edit_orphans: bool,
    /// May edit sponsor records.
    pub can_edit_sponsors: bool,
    /// May edit (including delete) transactions.
    pub can_edit_transactions: bool,
    /// May create expenses that complete without approval.
    pub can_create_expense: bool,
    /// May approve or reject pending expenses.
    pub can_approve_expense: bool,
    /// May view financial data.
    pub can_view_financials: bool,
    /// Manager override: implies every other flag at resolution time.
    /// Never expanded into the stored flags.
    pub is_manager: bool,
}

impl PermissionRecord {
    /// Creates an all-false record for a member.
    #[must_use]
    pub fn none(member_id: MemberId) -> Self {
        Self {
            member_id,
            can_edit_orphans: false,
            can_edit_sponsors: false,
            can_edit_transactions: false,
            can_create_expense: false,
            can_approve_expense: false,
            can_view_financials: false,
            is_manager: false,
        }
    }

    /// Creates a manager record with every stored flag false.
    #[must_use]
    pub fn manager(member_id: MemberId) -> Self {
        Self {
            is_manager: true,
            ..Self::none(member_id)
        }
    }
}

/// A fine-grained capability checked before a mutation.
///
/// Used in structured `PermissionDenied` errors so callers can render
/// which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Edit orphan records.
    EditOrphans,
    /// Edit sponsor records.
    EditSponsors,
    /// Edit or delete transactions.
    EditTransactions,
    /// Create expenses that complete without approval.
    CreateExpense,
    /// Approve or reject pending expenses.
    ApproveExpense,
    /// View financial data.
    ViewFinancials,
}

impl Capability {
    /// Returns the string representation of the capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditOrphans => "edit_orphans",
            Self::EditSponsors => "edit_sponsors",
            Self::EditTransactions => "edit_transactions",
            Self::CreateExpense => "create_expense",
            Self::ApproveExpense => "approve_expense",
            Self::ViewFinancials => "view_financials",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
