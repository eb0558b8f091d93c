//! Ledger domain types.
//!
//! Store-shaped records (normalized rows), creation inputs, and the
//! denormalized view entities assembled for presentation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use amana_shared::types::{MemberId, OrphanId, ReceiptId, Role, SponsorId, TransactionId};

/// Kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received. Represents a fact already on hand, so income is
    /// always auto-completed and never pending.
    Income,
    /// Money spent. Completes directly or waits for approval.
    Expense,
}

impl TransactionType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction status in the approval workflow.
///
/// Valid transitions (expenses only; income starts and stays Completed):
/// - Pending → Completed (approve)
/// - Pending → Rejected (reject)
/// - Rejected → Completed (approve, overwriting rejection metadata)
/// - Completed → Rejected (reject, overwriting approval metadata)
///
/// Deletion is terminal from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Expense awaiting approval.
    Pending,
    /// Completed income or approved expense.
    Completed,
    /// Rejected expense, with reason recorded.
    Rejected,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Donation category recorded on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationCategory {
    /// Unrestricted donation.
    General,
    /// Zakat donation.
    Zakat,
    /// Sadaqah donation.
    Sadaqah,
    /// Sponsorship distributed across named orphans.
    Sponsorship,
}

impl DonationCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Zakat => "zakat",
            Self::Sadaqah => "sadaqah",
            Self::Sponsorship => "sponsorship",
        }
    }
}

impl fmt::Display for DonationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction row as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier.
    pub id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Member who created the transaction.
    pub created_by: MemberId,
    /// Amount, always non-negative.
    pub amount: Decimal,
    /// Income or expense.
    pub tx_type: TransactionType,
    /// Workflow status.
    pub status: TransactionStatus,
    /// Optional orphan this transaction relates to.
    pub orphan_id: Option<OrphanId>,
    /// Member who approved, set only while Completed via approval.
    pub approved_by: Option<MemberId>,
    /// Member who rejected, set iff status is Rejected.
    pub rejected_by: Option<MemberId>,
    /// Rejection reason, set iff status is Rejected.
    pub rejection_reason: Option<String>,
}

/// A donation receipt row, attached only to income transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Unique identifier.
    pub id: ReceiptId,
    /// The income transaction this receipt belongs to.
    pub transaction_id: TransactionId,
    /// The resolved sponsor.
    pub sponsor_id: SponsorId,
    /// Sponsor name as issued on the receipt.
    pub sponsor_name: String,
    /// Donation category.
    pub category: DonationCategory,
    /// Receipt amount.
    pub amount: Decimal,
    /// Issuance date.
    pub date: NaiveDate,
    /// Optional description.
    pub description: Option<String>,
}

/// A per-orphan allocation row under a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptAllocationRecord {
    /// The receipt this allocation belongs to.
    pub receipt_id: ReceiptId,
    /// The orphan receiving this share.
    pub orphan_id: OrphanId,
    /// Allocated amount.
    pub amount: Decimal,
}

/// A receipt and its allocation rows, persisted as one logical operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptBundle {
    /// The receipt row.
    pub receipt: ReceiptRecord,
    /// Its per-orphan allocation rows.
    pub allocations: Vec<ReceiptAllocationRecord>,
}

/// A member directory row, backing denormalized display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Unique identifier.
    pub id: MemberId,
    /// Display name.
    pub display_name: String,
    /// Role in the organization.
    pub role: Role,
}

/// A sponsor directory row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorRecord {
    /// Unique identifier.
    pub id: SponsorId,
    /// Sponsor name, unique within the organization.
    pub name: String,
}

/// Overwrite patch for the workflow fields of a transaction.
///
/// Approve and reject each set all four fields, so the patch always
/// carries the full set and the two operations overwrite rather than
/// merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    /// New status.
    pub status: TransactionStatus,
    /// New approver, or None to clear.
    pub approved_by: Option<MemberId>,
    /// New rejecter, or None to clear.
    pub rejected_by: Option<MemberId>,
    /// New rejection reason, or None to clear.
    pub rejection_reason: Option<String>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionInput {
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Amount, must be strictly positive.
    pub amount: Decimal,
    /// Income or expense.
    pub tx_type: TransactionType,
    /// Optional orphan this transaction relates to.
    pub orphan_id: Option<OrphanId>,
    /// Receipt payload, income only.
    pub receipt: Option<ReceiptInput>,
}

/// Receipt payload carried by an income creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptInput {
    /// Sponsor name; must resolve to an existing sponsor record.
    pub sponsor_name: String,
    /// Donation category.
    pub category: DonationCategory,
    /// Receipt amount.
    pub amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
    /// Per-orphan allocations; their sum must not exceed the amount.
    pub allocations: Vec<AllocationInput>,
}

/// One per-orphan allocation in a receipt payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    /// The orphan receiving this share.
    pub orphan_id: OrphanId,
    /// Allocated amount, must be strictly positive.
    pub amount: Decimal,
}

/// A member reference denormalized into a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    /// Member ID.
    pub id: MemberId,
    /// Display name at composition time.
    pub display_name: String,
}

/// A receipt denormalized into a transaction view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptView {
    /// Receipt ID.
    pub id: ReceiptId,
    /// Sponsor name as issued.
    pub sponsor_name: String,
    /// Donation category.
    pub category: DonationCategory,
    /// Receipt amount.
    pub amount: Decimal,
    /// Orphans this receipt distributes to.
    pub related_orphan_ids: Vec<OrphanId>,
}

/// A denormalized transaction as presented to UI collaborators.
///
/// Assembled from transaction, receipt, allocation, and member rows;
/// never persisted in this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    /// Transaction ID.
    pub id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Income or expense.
    pub tx_type: TransactionType,
    /// Workflow status.
    pub status: TransactionStatus,
    /// Optional related orphan.
    pub orphan_id: Option<OrphanId>,
    /// Who created the transaction.
    pub created_by: MemberRef,
    /// Who approved it, if approved.
    pub approved_by: Option<MemberRef>,
    /// Who rejected it, if rejected.
    pub rejected_by: Option<MemberRef>,
    /// Why it was rejected, if rejected.
    pub rejection_reason: Option<String>,
    /// Attached receipt, income only.
    pub receipt: Option<ReceiptView>,
}
