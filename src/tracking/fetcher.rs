//! Remote flow-status fetch seam
//!
//! The orchestrator talks to remote tracking through the `FlowStatusFetcher`
//! trait. Fetches MUST be idempotent and side-effect-free: the same flow id
//! queried twice returns independent snapshots of remote state.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::tracking::errors::TrackError;
use crate::tracking::types::Stage;

/// Flow status as reported by the remote tracking service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFlowStatus {
    Pending,
    Completed,
    Failed,
    Undetermined,
}

/// Per-chain stage list from the remote payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteChainProgress {
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// One snapshot of remote tracking state for a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStatusResponse {
    pub status: RemoteFlowStatus,
    #[serde(default)]
    pub chain_progress: HashMap<String, RemoteChainProgress>,
    pub last_updated: i64,
}

/// Parse and validate a raw remote payload
///
/// This is the boundary where loosely-typed remote data becomes typed:
/// unknown status values or malformed stage metadata are rejected here as
/// `RemoteProtocol` errors, never stored.
pub fn parse_flow_status(body: &str) -> Result<FlowStatusResponse, TrackError> {
    serde_json::from_str(body).map_err(|e| TrackError::RemoteProtocol(e.to_string()))
}

#[async_trait]
pub trait FlowStatusFetcher: Send + Sync {
    /// Fetch the current remote status for a flow
    async fn fetch_flow_status(&self, flow_id: &str) -> Result<FlowStatusResponse, TrackError>;

    /// Fetcher name for logging
    fn name(&self) -> &str;
}

/// HTTP fetcher against the remote tracking API
pub struct HttpFlowStatusFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFlowStatusFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FlowStatusFetcher for HttpFlowStatusFetcher {
    async fn fetch_flow_status(&self, flow_id: &str) -> Result<FlowStatusResponse, TrackError> {
        let url = format!("{}/flows/{}/status", self.base_url, flow_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TrackError::NetworkFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| TrackError::NetworkFetch(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| TrackError::NetworkFetch(e.to_string()))?;

        parse_flow_status(&body)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Mock fetcher for tests
///
/// Scripted per-flow results are consumed in order; the last scripted result
/// sticks. An optional artificial delay simulates a slow in-flight fetch.
pub struct MockFetcher {
    results: parking_lot::Mutex<HashMap<String, Vec<Result<FlowStatusResponse, TrackError>>>>,
    default_result: parking_lot::Mutex<Result<FlowStatusResponse, TrackError>>,
    delay_ms: std::sync::atomic::AtomicU64,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            results: parking_lot::Mutex::new(HashMap::new()),
            default_result: parking_lot::Mutex::new(Ok(FlowStatusResponse {
                status: RemoteFlowStatus::Pending,
                chain_progress: HashMap::new(),
                last_updated: 0,
            })),
            delay_ms: std::sync::atomic::AtomicU64::new(0),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Queue a result for a specific flow (consumed in push order)
    pub fn push_result(&self, flow_id: &str, result: Result<FlowStatusResponse, TrackError>) {
        self.results
            .lock()
            .entry(flow_id.to_string())
            .or_default()
            .push(result);
    }

    /// Set the result returned when no scripted result remains
    pub fn set_default_result(&self, result: Result<FlowStatusResponse, TrackError>) {
        *self.default_result.lock() = result;
    }

    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms
            .store(delay_ms, std::sync::atomic::Ordering::Relaxed);
    }

    /// Total number of fetches performed
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::Relaxed)
    }

    fn next_result(&self, flow_id: &str) -> Result<FlowStatusResponse, TrackError> {
        let mut results = self.results.lock();
        if let Some(queue) = results.get_mut(flow_id) {
            if queue.len() > 1 {
                return queue.remove(0);
            }
            if let Some(last) = queue.first() {
                return last.clone();
            }
        }
        self.default_result.lock().clone()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlowStatusFetcher for MockFetcher {
    async fn fetch_flow_status(&self, flow_id: &str) -> Result<FlowStatusResponse, TrackError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let delay = self.delay_ms.load(std::sync::atomic::Ordering::Relaxed);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        log::debug!("[mock] fetch_flow_status({})", flow_id);
        self.next_result(flow_id)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::types::{StageMetadata, StageStatus};

    #[test]
    fn test_parse_valid_payload() {
        let body = r#"{
            "status": "pending",
            "chain_progress": {
                "origin": {
                    "stages": [
                        {
                            "stage": "deposit_confirmed",
                            "status": "confirmed",
                            "occurred_at": 1000000,
                            "tx_hash": "0xabc",
                            "metadata": {"kind": "on_chain_block", "height": 42, "timestamp": 1000}
                        }
                    ]
                }
            },
            "last_updated": 1000500
        }"#;

        let parsed = parse_flow_status(body).unwrap();
        assert_eq!(parsed.status, RemoteFlowStatus::Pending);
        let stage = &parsed.chain_progress["origin"].stages[0];
        assert_eq!(stage.status, StageStatus::Confirmed);
        assert_eq!(
            stage.metadata,
            StageMetadata::OnChainBlock {
                height: 42,
                timestamp: 1000
            }
        );
    }

    #[test]
    fn test_parse_malformed_payload_is_protocol_error() {
        let err = parse_flow_status(r#"{"status": "exploded"}"#).unwrap_err();
        assert_eq!(err.error_code(), "REMOTE_PROTOCOL_ERROR");

        let err = parse_flow_status("not json at all").unwrap_err();
        assert_eq!(err.error_code(), "REMOTE_PROTOCOL_ERROR");
    }

    #[test]
    fn test_parse_missing_progress_defaults_empty() {
        let parsed = parse_flow_status(r#"{"status": "completed", "last_updated": 7}"#).unwrap();
        assert_eq!(parsed.status, RemoteFlowStatus::Completed);
        assert!(parsed.chain_progress.is_empty());
    }

    #[tokio::test]
    async fn test_mock_scripted_results() {
        let mock = MockFetcher::new();
        mock.push_result(
            "flow-1",
            Err(TrackError::NetworkFetch("refused".to_string())),
        );
        mock.push_result(
            "flow-1",
            Ok(FlowStatusResponse {
                status: RemoteFlowStatus::Completed,
                chain_progress: HashMap::new(),
                last_updated: 5,
            }),
        );

        assert!(mock.fetch_flow_status("flow-1").await.is_err());
        // Last scripted result sticks
        assert_eq!(
            mock.fetch_flow_status("flow-1").await.unwrap().status,
            RemoteFlowStatus::Completed
        );
        assert_eq!(
            mock.fetch_flow_status("flow-1").await.unwrap().status,
            RemoteFlowStatus::Completed
        );
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn test_mock_default_result() {
        let mock = MockFetcher::new();
        let response = mock.fetch_flow_status("unknown").await.unwrap();
        assert_eq!(response.status, RemoteFlowStatus::Pending);
    }
}
