//! Lifecycle policies, one named predicate each.
//!
//! Two of these encode behavior that has been flagged for product review (the
//! application active-set and the deletion disjunction). They are isolated
//! here so a ruling changes exactly one function and its tests, nothing else.

use super::application::ApplicationStatus;
use super::contract::ContractStatus;
use super::transaction::TransactionStatus;

/// Transaction statuses whose presence marks a contract as active.
pub const ACTIVITY_TRANSACTION_STATUSES: &[TransactionStatus] =
    &[TransactionStatus::Hold, TransactionStatus::Completed];

/// Terminal contracts are never touched again by the sweep.
pub fn contract_is_terminal(status: &ContractStatus) -> bool {
    matches!(status, ContractStatus::Cancelled | ContractStatus::Completed)
}

/// Whether a contract keeps its event alive. Anything outside the four known
/// statuses is unknown to this service and deliberately counts as active.
pub fn contract_counts_active_for_event(status: &ContractStatus) -> bool {
    !matches!(
        status,
        ContractStatus::Cancelled
            | ContractStatus::Completed
            | ContractStatus::Approved
            | ContractStatus::Pending
    )
}

/// Whether an application keeps its event alive.
///
/// Approved and Pending applications do NOT count as active here, which reads
/// inverted. This matches current production behavior and is flagged for
/// product review; do not "fix" it without a ruling.
pub fn application_counts_active(status: &ApplicationStatus) -> bool {
    !matches!(
        status,
        ApplicationStatus::Approved | ApplicationStatus::Pending
    )
}

/// Whether an expired event may be deleted, given its active children counts.
///
/// Deliberately a disjunction (either side empty suffices). The likelier
/// intent is a conjunction (truly no active children of either kind); flagged
/// for product review, preserved as-is until then.
pub fn event_is_deletable(active_contracts: usize, active_applications: usize) -> bool {
    active_contracts == 0 || active_applications == 0
}
