//! Status resolution
//!
//! Derives one canonical ("effective") status from a transfer record's
//! layered signals. The remote flow status, when present, supersedes the
//! local lifecycle status. All predicates and the user-facing label table
//! are expressed in terms of `effective_status` so there is exactly one
//! source of truth.

use crate::tracking::types::{FlowStatus, TransferRecord, TxStatus};

/// Derive the canonical status for a transfer record
///
/// Precedence: the remote flow status, when present, is mapped onto the
/// local status space; otherwise the local status is returned unchanged.
/// A pending flow reads as `Broadcasted` once any chain has a confirmed
/// stage, `Submitting` before that.
pub fn effective_status(record: &TransferRecord) -> TxStatus {
    match &record.polling_state {
        Some(ps) => match ps.flow_status {
            FlowStatus::Success => TxStatus::Finalized,
            FlowStatus::TxError => TxStatus::Error,
            FlowStatus::PollingError | FlowStatus::PollingTimeout | FlowStatus::Cancelled => {
                TxStatus::Undetermined
            }
            FlowStatus::UserActionRequired => TxStatus::UserActionRequired,
            FlowStatus::Pending => {
                if ps.has_confirmed_stage() {
                    TxStatus::Broadcasted
                } else {
                    TxStatus::Submitting
                }
            }
        },
        None => record.status,
    }
}

/// In-progress means the transfer still needs polling or user attention
pub fn is_in_progress(record: &TransferRecord) -> bool {
    matches!(
        effective_status(record),
        TxStatus::Submitting
            | TxStatus::Broadcasted
            | TxStatus::Building
            | TxStatus::Signing
            | TxStatus::ConnectingWallet
            | TxStatus::UserActionRequired
    )
}

pub fn is_completed(record: &TransferRecord) -> bool {
    effective_status(record).is_terminal()
}

pub fn is_success(record: &TransferRecord) -> bool {
    effective_status(record) == TxStatus::Finalized
}

pub fn is_error(record: &TransferRecord) -> bool {
    effective_status(record) == TxStatus::Error
}

pub fn has_client_timeout(record: &TransferRecord) -> bool {
    record.client_timeout_at.is_some()
}

/// User-facing label for an effective status
///
/// Single source of truth for labeling; must not be duplicated elsewhere.
pub fn status_label(status: TxStatus) -> &'static str {
    match status {
        TxStatus::Idle => "Not Started",
        TxStatus::ConnectingWallet => "Connecting Wallet",
        TxStatus::Building => "Preparing Transaction",
        TxStatus::Signing => "Awaiting Signature",
        TxStatus::Submitting => "Submitting",
        TxStatus::Broadcasted => "In Progress",
        TxStatus::Finalized => "Completed",
        TxStatus::Error => "Failed",
        TxStatus::Undetermined => "Status Unknown",
        TxStatus::UserActionRequired => "Action Required",
    }
}

/// Baseline progress per status, used when no remote stage data exists
///
/// Zero is reserved for errored transfers, so `Idle` keeps a small nonzero
/// floor. `Undetermined` keeps a mid-flight value: the flow stalled without
/// a definitive answer, which is neither zero progress nor completion.
pub fn base_progress(status: TxStatus) -> u8 {
    match status {
        TxStatus::Idle => 5,
        TxStatus::ConnectingWallet => 10,
        TxStatus::Building => 20,
        TxStatus::Signing => 25,
        TxStatus::Submitting => 30,
        TxStatus::Broadcasted => 60,
        TxStatus::UserActionRequired => 75,
        TxStatus::Undetermined => 40,
        TxStatus::Finalized => 100,
        TxStatus::Error => 0,
    }
}
