//! Transfer tracking module - main module file
//!
//! This module provides the cross-chain transfer status tracking core:
//! durable record store, status resolution, stage timeline, and the
//! per-transfer polling orchestrator.

pub mod cache;
pub mod errors;
pub mod fetcher;
pub mod orchestrator;
pub mod status;
pub mod store;
pub mod timeline;
pub mod types;

// Re-export commonly used types
pub use cache::StatusCache;
pub use errors::TrackError;
pub use fetcher::{FlowStatusFetcher, FlowStatusResponse, HttpFlowStatusFetcher, MockFetcher};
pub use orchestrator::{PollerConfig, PollingOrchestrator};
pub use store::TransactionStore;
pub use timeline::{StageConfig, TimedStage, TotalDuration};
pub use types::{
    ChainProgress, Direction, FlowStatus, PollingState, Stage, StageMetadata, StageStatus,
    TransferRecord, TxStatus,
};
