//! Polling orchestrator
//!
//! Runs one resumable, timeout-bounded polling job per in-flight transfer.
//! Jobs are cooperative tokio tasks keyed by flow id in a single
//! authoritative map; starting a job is insert-if-absent, so repeated
//! start/rescan calls never produce two pollers for the same flow.
//!
//! Jobs never touch the store. They push `{flow_id, outcome}` events into a
//! bounded channel consumed by one reconciliation loop, which performs every
//! read-merge-write against the store and releases job handles on terminal
//! outcomes. The store write always precedes any visible state change, and
//! events for a flow that is no longer tracked (cancelled, already released)
//! are discarded on arrival.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::tracking::cache::StatusCache;
use crate::tracking::errors::TrackError;
use crate::tracking::fetcher::{FlowStatusFetcher, FlowStatusResponse, RemoteFlowStatus};
use crate::tracking::status;
use crate::tracking::store::TransactionStore;
use crate::tracking::types::{
    ChainProgress, Direction, FlowStatus, PollingState, StageStatus, TransferRecord, TxStatus,
};

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between poll ticks (ms)
    pub poll_interval_ms: u64,
    /// System default polling timeout (ms)
    pub default_timeout_ms: u64,
    /// Per-chain or per-"direction:chain" timeout overrides (ms)
    pub chain_timeout_ms: HashMap<String, u64>,
    /// Capacity of the poll-event channel
    pub event_capacity: usize,
    /// Lifetime of cached remote statuses (secs)
    pub cache_ttl_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            default_timeout_ms: 30 * 60 * 1000, // 30 minutes
            chain_timeout_ms: HashMap::new(),
            event_capacity: 256,
            cache_ttl_secs: 300,
        }
    }
}

impl PollerConfig {
    /// Timeout for a transfer, most specific key first:
    /// "direction:chain", then "chain", then the system default
    pub fn timeout_for(&self, direction: Direction, chain: &str) -> u64 {
        let scoped = format!("{}:{}", direction.as_str(), chain);
        self.chain_timeout_ms
            .get(&scoped)
            .or_else(|| self.chain_timeout_ms.get(chain))
            .copied()
            .unwrap_or(self.default_timeout_ms)
    }
}

/// What a polling job observed on one tick
#[derive(Debug)]
enum JobOutcome {
    /// A well-formed remote status snapshot
    Update(FlowStatusResponse),
    /// The remote answered with a payload we could not parse
    ProtocolError(String),
    /// The job hit its deadline; `last` carries the final fetch result or
    /// the cached status, if either was available
    TimedOut { last: Option<FlowStatusResponse> },
}

#[derive(Debug)]
struct PollEvent {
    flow_id: String,
    outcome: JobOutcome,
}

struct JobHandle {
    cancel: Arc<AtomicBool>,
    join: tokio::task::JoinHandle<()>,
}

/// Map a remote flow status onto the recorded flow status
fn map_remote_status(status: RemoteFlowStatus) -> FlowStatus {
    match status {
        RemoteFlowStatus::Pending => FlowStatus::Pending,
        RemoteFlowStatus::Completed => FlowStatus::Success,
        RemoteFlowStatus::Failed => FlowStatus::TxError,
        // The remote itself is unsure: surfaced as a polling error, which
        // reads as undetermined
        RemoteFlowStatus::Undetermined => FlowStatus::PollingError,
    }
}

/// Merge a remote snapshot into a record (idempotent by stage identity)
///
/// Safe under duplicate or out-of-order delivery: a confirmed stage is never
/// replaced, so the earliest confirmation wins, and re-applying the same
/// snapshot is a no-op. Terminal flow statuses also settle the local status
/// so the record lands in the completed view.
pub fn merge_remote(record: &mut TransferRecord, response: &FlowStatusResponse, now_ms: i64) {
    let flow_type = record.direction.as_str();
    let ps = record
        .polling_state
        .get_or_insert_with(|| PollingState::new(flow_type, &record.chain, now_ms));

    ps.flow_status = map_remote_status(response.status);
    ps.last_updated_at = now_ms;

    for (chain, remote) in &response.chain_progress {
        let progress = ps
            .chain_status
            .entry(chain.clone())
            .or_insert_with(|| ChainProgress {
                status: "pending".to_string(),
                stages: Vec::new(),
                error_message: None,
            });

        for incoming in &remote.stages {
            match progress
                .stages
                .iter_mut()
                .find(|s| s.stage == incoming.stage)
            {
                Some(existing) => {
                    if existing.status != StageStatus::Confirmed {
                        *existing = incoming.clone();
                    }
                }
                None => progress.stages.push(incoming.clone()),
            }
        }

        let all_confirmed = !progress.stages.is_empty()
            && progress
                .stages
                .iter()
                .all(|s| s.status == StageStatus::Confirmed);
        progress.status = if all_confirmed {
            "completed".to_string()
        } else {
            "pending".to_string()
        };
    }

    // Current chain is wherever the most recent stage activity happened
    if let Some((chain, _)) = ps
        .chain_status
        .iter()
        .flat_map(|(chain, cp)| cp.stages.iter().map(move |s| (chain, s.occurred_at)))
        .max_by_key(|(_, at)| *at)
    {
        ps.current_chain = chain.clone();
    }

    let flow_status = ps.flow_status;
    let chain_error = ps
        .chain_status
        .values()
        .find_map(|cp| cp.error_message.clone());

    match flow_status {
        FlowStatus::Success => {
            record.status = TxStatus::Finalized;
            record.error_message = None;
        }
        FlowStatus::TxError => {
            record.status = TxStatus::Error;
            record.error_message =
                chain_error.or_else(|| Some("Transfer failed on chain".to_string()));
        }
        _ => {}
    }

    // A successful resume clears the local give-up marker
    record.client_timeout_at = None;
}

/// Record a malformed-payload observation without stopping the job
fn mark_polling_error(record: &mut TransferRecord, message: &str, now_ms: i64) {
    let flow_type = record.direction.as_str();
    let ps = record
        .polling_state
        .get_or_insert_with(|| PollingState::new(flow_type, &record.chain, now_ms));
    ps.flow_status = FlowStatus::PollingError;
    ps.last_updated_at = now_ms;
    record.error_message = Some(message.to_string());
}

/// Local polling gave up; the remote may still be progressing
fn mark_polling_timeout(record: &mut TransferRecord, now_ms: i64) {
    let flow_type = record.direction.as_str();
    let ps = record
        .polling_state
        .get_or_insert_with(|| PollingState::new(flow_type, &record.chain, now_ms));
    ps.flow_status = FlowStatus::PollingTimeout;
    ps.last_updated_at = now_ms;
    record.status = TxStatus::Undetermined;
    record.client_timeout_at = Some(now_ms);
}

fn mark_cancelled(record: &mut TransferRecord, now_ms: i64) {
    let flow_type = record.direction.as_str();
    let ps = record
        .polling_state
        .get_or_insert_with(|| PollingState::new(flow_type, &record.chain, now_ms));
    ps.flow_status = FlowStatus::Cancelled;
    ps.last_updated_at = now_ms;
    record.status = TxStatus::Undetermined;
}

/// One polling job: fetch, report, sleep, until terminal/timeout/cancelled
async fn run_job(
    flow_id: String,
    fetcher: Arc<dyn FlowStatusFetcher>,
    cache: Arc<StatusCache>,
    cancel: Arc<AtomicBool>,
    interval: Duration,
    deadline: Instant,
    tx: mpsc::Sender<PollEvent>,
) {
    loop {
        if cancel.load(Ordering::Relaxed) {
            return;
        }

        if Instant::now() >= deadline {
            // Exactly one last-gasp fetch; fall back to the cached status
            let last = match fetcher.fetch_flow_status(&flow_id).await {
                Ok(response) => Some(response),
                Err(e) => {
                    log::warn!("Final fetch for {} failed: {}", flow_id, e);
                    cache.get(&flow_id)
                }
            };
            if !cancel.load(Ordering::Relaxed) {
                let _ = tx
                    .send(PollEvent {
                        flow_id: flow_id.clone(),
                        outcome: JobOutcome::TimedOut { last },
                    })
                    .await;
            }
            return;
        }

        match fetcher.fetch_flow_status(&flow_id).await {
            Ok(response) => {
                cache.put(&flow_id, response.clone());
                let terminal = matches!(
                    response.status,
                    RemoteFlowStatus::Completed | RemoteFlowStatus::Failed
                );
                if tx
                    .send(PollEvent {
                        flow_id: flow_id.clone(),
                        outcome: JobOutcome::Update(response),
                    })
                    .await
                    .is_err()
                {
                    return; // reconciliation loop gone
                }
                if terminal {
                    return;
                }
            }
            Err(TrackError::RemoteProtocol(msg)) => {
                let _ = tx
                    .send(PollEvent {
                        flow_id: flow_id.clone(),
                        outcome: JobOutcome::ProtocolError(msg),
                    })
                    .await;
            }
            Err(e) => {
                // Transient failure: retried on the next tick
                log::warn!("Status fetch for {} failed: {} (will retry)", flow_id, e);
            }
        }

        tokio::time::sleep(interval).await;
    }
}

/// Polling orchestrator: one job per in-progress transfer, one
/// reconciliation loop for all store writes
pub struct PollingOrchestrator {
    store: Arc<TransactionStore>,
    fetcher: Arc<dyn FlowStatusFetcher>,
    cache: Arc<StatusCache>,
    config: PollerConfig,
    jobs: Mutex<HashMap<String, JobHandle>>,
    event_tx: mpsc::Sender<PollEvent>,
    event_rx: Mutex<Option<mpsc::Receiver<PollEvent>>>,
}

impl PollingOrchestrator {
    pub fn new(
        store: Arc<TransactionStore>,
        fetcher: Arc<dyn FlowStatusFetcher>,
        config: PollerConfig,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(config.event_capacity);
        Self {
            store,
            fetcher,
            cache: Arc::new(StatusCache::new(config.cache_ttl_secs)),
            config,
            jobs: Mutex::new(HashMap::new()),
            event_tx,
            event_rx: Mutex::new(Some(event_rx)),
        }
    }

    /// Run the reconciliation loop (call once, typically via `spawn`)
    pub async fn run(&self) {
        let mut rx = match self.event_rx.lock().take() {
            Some(rx) => rx,
            None => {
                log::warn!("Reconciliation loop already running");
                return;
            }
        };

        log::info!(
            "Reconciliation loop started (interval={}ms, default_timeout={}ms)",
            self.config.poll_interval_ms,
            self.config.default_timeout_ms
        );
        while let Some(event) = rx.recv().await {
            self.reconcile(event);
        }
    }

    /// Start the reconciliation loop in a background task
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Start a polling job for a transfer (insert-if-absent by flow id)
    pub fn track(&self, id: &str) -> Result<(), TrackError> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| TrackError::RecordNotFound(id.to_string()))?;
        let flow_id = record
            .flow_id
            .clone()
            .ok_or_else(|| TrackError::FlowNotRegistered(id.to_string()))?;

        let mut jobs = self.jobs.lock();
        if jobs.contains_key(&flow_id) {
            log::debug!("Flow {} already polling, ignoring track()", flow_id);
            return Ok(());
        }

        let timeout_ms = self.config.timeout_for(record.direction, &record.chain);
        let cancel = Arc::new(AtomicBool::new(false));
        let join = tokio::spawn(run_job(
            flow_id.clone(),
            self.fetcher.clone(),
            self.cache.clone(),
            cancel.clone(),
            Duration::from_millis(self.config.poll_interval_ms),
            Instant::now() + Duration::from_millis(timeout_ms),
            self.event_tx.clone(),
        ));
        jobs.insert(flow_id.clone(), JobHandle { cancel, join });

        log::info!(
            "Started polling job for flow {} (transfer={}, timeout={}ms)",
            flow_id,
            id,
            timeout_ms
        );
        Ok(())
    }

    /// Scan persisted in-progress transfers and start a job for each flow
    /// not already tracked. Safe to call repeatedly, including after a
    /// process restart.
    pub fn resume_in_progress(&self) -> usize {
        let mut started = 0;
        for record in self.store.get_in_progress() {
            if record.flow_id.is_none() {
                continue; // no remote flow to poll yet
            }
            let was_polling = self.is_polling(record.flow_id.as_deref().unwrap_or_default());
            if !was_polling && self.track(&record.id).is_ok() {
                started += 1;
            }
        }
        if started > 0 {
            log::info!("Resumed polling for {} in-progress transfers", started);
        }
        started
    }

    /// Stop polling immediately and mark the flow cancelled. No final fetch
    /// is attempted; an in-flight result is discarded on arrival. Terminal
    /// transfers are left untouched.
    pub fn cancel(&self, id: &str) -> Result<(), TrackError> {
        let mut record = self
            .store
            .get(id)
            .ok_or_else(|| TrackError::RecordNotFound(id.to_string()))?;

        if status::effective_status(&record).is_terminal() {
            log::debug!("Transfer {} already terminal, ignoring cancel()", id);
            return Ok(());
        }

        match record.flow_id.clone() {
            Some(flow_id) => {
                if let Some(handle) = self.jobs.lock().remove(&flow_id) {
                    handle.cancel.store(true, Ordering::Relaxed);
                }
                mark_cancelled(&mut record, chrono::Utc::now().timestamp_millis());
            }
            // No remote flow registered: settle the local status only, a
            // polling state for a flow that never existed would be bogus
            None => record.status = TxStatus::Undetermined,
        }

        self.store.save(record);
        log::info!("Cancelled polling for transfer {}", id);
        Ok(())
    }

    /// Re-enter polling after a timeout/cancel landed on undetermined
    pub fn retry(&self, id: &str) -> Result<(), TrackError> {
        let mut record = self
            .store
            .get(id)
            .ok_or_else(|| TrackError::RecordNotFound(id.to_string()))?;

        let effective = status::effective_status(&record);
        if effective != TxStatus::Undetermined {
            return Err(TrackError::InvalidRetry {
                id: id.to_string(),
                status: effective.as_str().to_string(),
            });
        }
        // Validate before mutating: a failed retry must leave the record
        // exactly as it was, never effectively in-progress with no poller
        if record.flow_id.is_none() {
            return Err(TrackError::FlowNotRegistered(id.to_string()));
        }

        record.client_timeout_at = None;
        if let Some(ps) = &mut record.polling_state {
            ps.flow_status = FlowStatus::Pending;
        }
        record.status = if record.has_confirmed_stage() {
            TxStatus::Broadcasted
        } else {
            TxStatus::Submitting
        };
        self.store.save(record);

        self.track(id)?;
        log::info!("Retrying polling for transfer {}", id);
        Ok(())
    }

    pub fn is_polling(&self, flow_id: &str) -> bool {
        self.jobs.lock().contains_key(flow_id)
    }

    pub fn active_jobs(&self) -> usize {
        self.jobs.lock().len()
    }

    // Apply one job event to the store. All record mutation driven by
    // polling happens here, in fetch-return order.
    fn reconcile(&self, event: PollEvent) {
        if !self.is_polling(&event.flow_id) {
            log::debug!("Discarding event for released flow {}", event.flow_id);
            return;
        }

        let mut record = match self.store.find_by_flow(&event.flow_id) {
            Some(record) => record,
            None => {
                log::warn!("No record for tracked flow {}, releasing job", event.flow_id);
                self.release(&event.flow_id);
                return;
            }
        };
        let now = chrono::Utc::now().timestamp_millis();

        match event.outcome {
            JobOutcome::Update(response) => {
                let terminal = matches!(
                    response.status,
                    RemoteFlowStatus::Completed | RemoteFlowStatus::Failed
                );
                merge_remote(&mut record, &response, now);
                let id = record.id.clone();
                self.store.save(record);
                if terminal {
                    self.release(&event.flow_id);
                    log::info!(
                        "Flow {} reached terminal status {:?} (transfer={})",
                        event.flow_id,
                        response.status,
                        id
                    );
                }
            }
            JobOutcome::ProtocolError(msg) => {
                log::warn!("Malformed status payload for {}: {}", event.flow_id, msg);
                mark_polling_error(&mut record, &msg, now);
                self.store.save(record);
            }
            JobOutcome::TimedOut { last } => {
                if let Some(response) = &last {
                    merge_remote(&mut record, response, now);
                }
                let settled = record
                    .polling_state
                    .as_ref()
                    .map(|ps| ps.flow_status.is_remote_terminal())
                    .unwrap_or(false);
                if !settled {
                    mark_polling_timeout(&mut record, now);
                    log::warn!(
                        "Polling for flow {} timed out without a terminal remote status",
                        event.flow_id
                    );
                }
                self.store.save(record);
                self.release(&event.flow_id);
            }
        }
    }

    fn release(&self, flow_id: &str) {
        if let Some(handle) = self.jobs.lock().remove(flow_id) {
            handle.cancel.store(true, Ordering::Relaxed);
            handle.join.abort(); // job is done or exiting; reap the task
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::fetcher::RemoteChainProgress;
    use crate::tracking::types::{Stage, StageMetadata};

    fn snapshot(status: RemoteFlowStatus, stages: Vec<(&str, Stage)>) -> FlowStatusResponse {
        let mut chain_progress: HashMap<String, RemoteChainProgress> = HashMap::new();
        for (chain, stage) in stages {
            chain_progress
                .entry(chain.to_string())
                .or_insert_with(|| RemoteChainProgress { stages: Vec::new() })
                .stages
                .push(stage);
        }
        FlowStatusResponse {
            status,
            chain_progress,
            last_updated: 0,
        }
    }

    fn tracked_record() -> TransferRecord {
        let mut record = TransferRecord::new("tx-1", Direction::Deposit, "origin");
        record.status = TxStatus::Submitting;
        record.flow_id = Some("flow-1".to_string());
        record
    }

    // ===== merge_remote =====

    #[test]
    fn test_merge_creates_polling_state() {
        let mut record = tracked_record();
        let response = snapshot(
            RemoteFlowStatus::Pending,
            vec![("origin", Stage::new("deposit_initiated", StageStatus::Pending, 1000))],
        );

        merge_remote(&mut record, &response, 5000);

        let ps = record.polling_state.as_ref().unwrap();
        assert_eq!(ps.flow_status, FlowStatus::Pending);
        assert_eq!(ps.flow_type, "deposit");
        assert_eq!(ps.last_updated_at, 5000);
        assert_eq!(ps.chain_status["origin"].stages.len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut record = tracked_record();
        let response = snapshot(
            RemoteFlowStatus::Pending,
            vec![("origin", Stage::new("deposit_initiated", StageStatus::Confirmed, 1000))],
        );

        merge_remote(&mut record, &response, 5000);
        merge_remote(&mut record, &response, 6000);

        let ps = record.polling_state.as_ref().unwrap();
        assert_eq!(ps.chain_status["origin"].stages.len(), 1);
    }

    #[test]
    fn test_merge_never_regresses_confirmed_stage() {
        let mut record = tracked_record();

        // Confirmed snapshot applies first (fetch-return order)
        let confirmed = snapshot(
            RemoteFlowStatus::Pending,
            vec![(
                "origin",
                Stage {
                    stage: "deposit_initiated".to_string(),
                    status: StageStatus::Confirmed,
                    occurred_at: 1000,
                    tx_hash: Some("0xabc".to_string()),
                    metadata: StageMetadata::OnChainBlock {
                        height: 5,
                        timestamp: 1,
                    },
                },
            )],
        );
        merge_remote(&mut record, &confirmed, 5000);

        // A stale snapshot with the same stage still pending arrives late
        let stale = snapshot(
            RemoteFlowStatus::Pending,
            vec![("origin", Stage::new("deposit_initiated", StageStatus::Pending, 900))],
        );
        merge_remote(&mut record, &stale, 6000);

        let stage = &record.polling_state.as_ref().unwrap().chain_status["origin"].stages[0];
        assert_eq!(stage.status, StageStatus::Confirmed);
        assert_eq!(stage.occurred_at, 1000);
        assert_eq!(stage.tx_hash.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_merge_upgrades_pending_stage() {
        let mut record = tracked_record();
        let pending = snapshot(
            RemoteFlowStatus::Pending,
            vec![("origin", Stage::new("deposit_initiated", StageStatus::Pending, 900))],
        );
        merge_remote(&mut record, &pending, 5000);

        let confirmed = snapshot(
            RemoteFlowStatus::Pending,
            vec![("origin", Stage::new("deposit_initiated", StageStatus::Confirmed, 1000))],
        );
        merge_remote(&mut record, &confirmed, 6000);

        let ps = record.polling_state.as_ref().unwrap();
        assert_eq!(ps.chain_status["origin"].stages[0].status, StageStatus::Confirmed);
        assert_eq!(ps.chain_status["origin"].status, "completed");
    }

    #[test]
    fn test_merge_terminal_settles_local_status() {
        let mut record = tracked_record();
        merge_remote(&mut record, &snapshot(RemoteFlowStatus::Completed, vec![]), 5000);
        assert_eq!(record.status, TxStatus::Finalized);
        assert_eq!(status::effective_status(&record), TxStatus::Finalized);

        let mut record = tracked_record();
        merge_remote(&mut record, &snapshot(RemoteFlowStatus::Failed, vec![]), 5000);
        assert_eq!(record.status, TxStatus::Error);
        assert!(record.error_message.is_some());
    }

    #[test]
    fn test_merge_clears_client_timeout() {
        let mut record = tracked_record();
        record.client_timeout_at = Some(4000);
        merge_remote(&mut record, &snapshot(RemoteFlowStatus::Pending, vec![]), 5000);
        assert!(record.client_timeout_at.is_none());
    }

    #[test]
    fn test_merge_tracks_current_chain() {
        let mut record = tracked_record();
        let response = snapshot(
            RemoteFlowStatus::Pending,
            vec![
                ("origin", Stage::new("deposit_confirmed", StageStatus::Confirmed, 1000)),
                ("relay", Stage::new("attestation_confirmed", StageStatus::Pending, 2000)),
            ],
        );
        merge_remote(&mut record, &response, 5000);
        assert_eq!(
            record.polling_state.as_ref().unwrap().current_chain,
            "relay"
        );
    }

    // ===== Mark helpers =====

    #[test]
    fn test_mark_polling_timeout() {
        let mut record = tracked_record();
        mark_polling_timeout(&mut record, 9000);

        assert_eq!(record.status, TxStatus::Undetermined);
        assert_eq!(record.client_timeout_at, Some(9000));
        assert_eq!(
            record.polling_state.as_ref().unwrap().flow_status,
            FlowStatus::PollingTimeout
        );
        assert_eq!(status::effective_status(&record), TxStatus::Undetermined);
    }

    #[test]
    fn test_mark_cancelled_distinct_from_timeout() {
        let mut record = tracked_record();
        mark_cancelled(&mut record, 9000);

        assert_eq!(
            record.polling_state.as_ref().unwrap().flow_status,
            FlowStatus::Cancelled
        );
        // Cancelled does not stamp the local give-up marker
        assert!(record.client_timeout_at.is_none());
        assert_eq!(status::effective_status(&record), TxStatus::Undetermined);
    }

    #[test]
    fn test_mark_polling_error_keeps_local_status() {
        let mut record = tracked_record();
        mark_polling_error(&mut record, "missing field `status`", 9000);

        assert_eq!(record.status, TxStatus::Submitting);
        assert_eq!(status::effective_status(&record), TxStatus::Undetermined);
        assert!(record.error_message.as_deref().unwrap().contains("status"));
    }

    // ===== Config =====

    #[test]
    fn test_timeout_lookup_precedence() {
        let mut config = PollerConfig::default();
        config.default_timeout_ms = 100;
        config.chain_timeout_ms.insert("origin".to_string(), 200);
        config
            .chain_timeout_ms
            .insert("deposit:origin".to_string(), 300);

        assert_eq!(config.timeout_for(Direction::Deposit, "origin"), 300);
        assert_eq!(config.timeout_for(Direction::Send, "origin"), 200);
        assert_eq!(config.timeout_for(Direction::Send, "relay"), 100);
    }
}
