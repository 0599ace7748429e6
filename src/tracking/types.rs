//! Core types for cross-chain transfer tracking
//!
//! This module defines the persisted transfer record and the layered status
//! signals it carries (local lifecycle, remote flow status, per-chain stages).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Transfer direction relative to the local chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Deposit,
    Send,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Deposit => "deposit",
            Direction::Send => "send",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "deposit" => Some(Direction::Deposit),
            "send" => Some(Direction::Send),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse local transaction lifecycle
///
/// `UserActionRequired` never appears as a stored local status; it only
/// surfaces as an effective status derived from the remote flow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Idle,
    ConnectingWallet,
    Building,
    Signing,
    Submitting,
    Broadcasted,
    Finalized,
    Error,
    Undetermined,
    UserActionRequired,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Idle => "idle",
            TxStatus::ConnectingWallet => "connecting_wallet",
            TxStatus::Building => "building",
            TxStatus::Signing => "signing",
            TxStatus::Submitting => "submitting",
            TxStatus::Broadcasted => "broadcasted",
            TxStatus::Finalized => "finalized",
            TxStatus::Error => "error",
            TxStatus::Undetermined => "undetermined",
            TxStatus::UserActionRequired => "user_action_required",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(TxStatus::Idle),
            "connecting_wallet" => Some(TxStatus::ConnectingWallet),
            "building" => Some(TxStatus::Building),
            "signing" => Some(TxStatus::Signing),
            "submitting" => Some(TxStatus::Submitting),
            "broadcasted" => Some(TxStatus::Broadcasted),
            "finalized" => Some(TxStatus::Finalized),
            "error" => Some(TxStatus::Error),
            "undetermined" => Some(TxStatus::Undetermined),
            "user_action_required" => Some(TxStatus::UserActionRequired),
            _ => None,
        }
    }

    /// Check if this is a terminal local state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TxStatus::Finalized | TxStatus::Error | TxStatus::Undetermined
        )
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remote tracking flow status as recorded on the transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    Pending,
    Success,
    TxError,
    PollingError,
    PollingTimeout,
    Cancelled,
    UserActionRequired,
}

impl FlowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStatus::Pending => "pending",
            FlowStatus::Success => "success",
            FlowStatus::TxError => "tx_error",
            FlowStatus::PollingError => "polling_error",
            FlowStatus::PollingTimeout => "polling_timeout",
            FlowStatus::Cancelled => "cancelled",
            FlowStatus::UserActionRequired => "user_action_required",
        }
    }

    /// Terminal from the remote's perspective (no further polling useful)
    pub fn is_remote_terminal(&self) -> bool {
        matches!(self, FlowStatus::Success | FlowStatus::TxError)
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single stage within one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Pending,
    Confirmed,
    Failed,
}

impl StageStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StageStatus::Confirmed | StageStatus::Failed)
    }
}

/// Metadata attached to a stage, validated where remote status is parsed
///
/// `OnChainBlock` carries the block height and block timestamp (epoch
/// seconds) reported by the chain. `Ephemeral` marks client-observed
/// checkpoints with no on-chain anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageMetadata {
    OnChainBlock { height: u64, timestamp: i64 },
    Ephemeral,
}

impl StageMetadata {
    /// Block timestamp in epoch milliseconds, if this stage has one
    pub fn block_timestamp_ms(&self) -> Option<i64> {
        match self {
            StageMetadata::OnChainBlock { timestamp, .. } => Some(timestamp * 1000),
            StageMetadata::Ephemeral => None,
        }
    }
}

impl Default for StageMetadata {
    fn default() -> Self {
        StageMetadata::Ephemeral
    }
}

/// A named checkpoint within one chain's processing of a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub stage: String,
    pub status: StageStatus,
    /// Client-observed time (epoch ms)
    pub occurred_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub metadata: StageMetadata,
}

impl Stage {
    pub fn new(stage: &str, status: StageStatus, occurred_at: i64) -> Self {
        Self {
            stage: stage.to_string(),
            status,
            occurred_at,
            tx_hash: None,
            metadata: StageMetadata::Ephemeral,
        }
    }
}

/// Per-chain progress within the tracked flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProgress {
    pub status: String,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Remote tracking state, present once a flow is registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingState {
    pub flow_type: String,
    pub current_chain: String,
    pub flow_status: FlowStatus,
    #[serde(default)]
    pub chain_status: HashMap<String, ChainProgress>,
    pub last_updated_at: i64,
}

impl PollingState {
    pub fn new(flow_type: &str, current_chain: &str, now_ms: i64) -> Self {
        Self {
            flow_type: flow_type.to_string(),
            current_chain: current_chain.to_string(),
            flow_status: FlowStatus::Pending,
            chain_status: HashMap::new(),
            last_updated_at: now_ms,
        }
    }

    /// True if any chain reports a confirmed stage
    pub fn has_confirmed_stage(&self) -> bool {
        self.chain_status
            .values()
            .any(|cp| cp.stages.iter().any(|s| s.status == StageStatus::Confirmed))
    }
}

/// Persisted transfer record, one per transfer attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Opaque, stable identity for the record's lifetime
    pub id: String,
    /// Creation timestamp (epoch ms); absent only for legacy records
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Last update timestamp (epoch ms), stamped by the store on save
    pub updated_at: i64,
    pub direction: Direction,
    /// Origin/destination chain key
    pub chain: String,
    /// Coarse local lifecycle status
    pub status: TxStatus,
    /// Primary on-chain transaction hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Assigned once a remote tracking flow is registered; write-once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    /// Set when local polling gave up while the remote may still progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_timeout_at: Option<i64>,
    /// Locally observed checkpoints invisible to remote tracking
    #[serde(default)]
    pub client_stages: Vec<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_state: Option<PollingState>,
    // Display details, opaque to the tracking core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_name: Option<String>,
}

impl TransferRecord {
    /// Create a new record at submission time
    pub fn new(id: &str, direction: Direction, chain: &str) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: id.to_string(),
            created_at: Some(now),
            updated_at: now,
            direction,
            chain: chain.to_string(),
            status: TxStatus::Building,
            hash: None,
            error_message: None,
            flow_id: None,
            client_timeout_at: None,
            client_stages: Vec::new(),
            polling_state: None,
            amount: None,
            destination: None,
            chain_name: None,
        }
    }

    /// True if any chain in the polling state reports a confirmed stage
    pub fn has_confirmed_stage(&self) -> bool {
        self.polling_state
            .as_ref()
            .map(|ps| ps.has_confirmed_stage())
            .unwrap_or(false)
    }

    /// Record a locally observed checkpoint (e.g. "signed")
    pub fn push_client_stage(&mut self, stage: Stage) {
        self.client_stages.push(stage);
    }
}
