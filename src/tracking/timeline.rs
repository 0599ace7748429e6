//! Stage timeline
//!
//! Merges client-observed checkpoints with the per-chain stages reported by
//! remote tracking into one chronological sequence, and derives per-stage
//! durations, progress percentage, and total flow duration from it.

use std::collections::HashMap;

use crate::tracking::status;
use crate::tracking::types::{Direction, Stage, StageStatus, TransferRecord, TxStatus};

/// Expected-stage configuration per `(direction, chain)`
///
/// Supplied externally; the compiled-in defaults model the three-hop
/// origin -> relay -> destination traversal, reversed for sends.
#[derive(Debug, Clone)]
pub struct StageConfig {
    deposit_chain_order: Vec<String>,
    send_chain_order: Vec<String>,
    expected: HashMap<(Direction, String), Vec<String>>,
}

impl Default for StageConfig {
    fn default() -> Self {
        let mut config = StageConfig::new(
            vec!["origin", "relay", "destination"],
            vec!["destination", "relay", "origin"],
        );
        config.set_expected(
            Direction::Deposit,
            "origin",
            vec!["deposit_initiated", "deposit_confirmed"],
        );
        config.set_expected(Direction::Deposit, "relay", vec!["attestation_confirmed"]);
        config.set_expected(Direction::Deposit, "destination", vec!["mint_confirmed"]);

        config.set_expected(
            Direction::Send,
            "destination",
            vec!["burn_initiated", "burn_confirmed"],
        );
        config.set_expected(Direction::Send, "relay", vec!["attestation_confirmed"]);
        config.set_expected(Direction::Send, "origin", vec!["release_confirmed"]);
        config
    }
}

impl StageConfig {
    pub fn new(deposit_chain_order: Vec<&str>, send_chain_order: Vec<&str>) -> Self {
        Self {
            deposit_chain_order: deposit_chain_order.iter().map(|s| s.to_string()).collect(),
            send_chain_order: send_chain_order.iter().map(|s| s.to_string()).collect(),
            expected: HashMap::new(),
        }
    }

    pub fn set_expected(&mut self, direction: Direction, chain: &str, stages: Vec<&str>) {
        self.expected.insert(
            (direction, chain.to_string()),
            stages.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Chain traversal order for the given direction
    pub fn chain_order(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Deposit => &self.deposit_chain_order,
            Direction::Send => &self.send_chain_order,
        }
    }

    /// Stage names that constitute "complete" for one chain
    pub fn expected_stages(&self, direction: Direction, chain: &str) -> &[String] {
        self.expected
            .get(&(direction, chain.to_string()))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_expected(&self, direction: Direction) -> usize {
        self.chain_order(direction)
            .iter()
            .map(|chain| self.expected_stages(direction, chain).len())
            .sum()
    }
}

/// One entry of the merged timeline
#[derive(Debug, Clone)]
pub struct TimedStage {
    pub chain: String,
    pub stage: Stage,
    /// Delta to the next stage, or to "now" for a still-pending last stage
    pub duration_ms: Option<i64>,
}

/// Total flow duration, distinguishing "no on-chain anchor yet" from
/// "never started"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalDuration {
    Millis(i64),
    /// No on-chain confirmed stage yet; rendered as "N/A"
    Unavailable,
    /// The record has no creation timestamp
    NotStarted,
}

impl TotalDuration {
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            TotalDuration::Millis(ms) => Some(*ms),
            _ => None,
        }
    }
}

/// Merge client and remote stages into one list sorted ascending by
/// `occurred_at`, with per-stage durations
pub fn stage_timings(
    record: &TransferRecord,
    config: &StageConfig,
    now_ms: i64,
) -> Vec<TimedStage> {
    let mut merged: Vec<(String, Stage)> = Vec::new();

    // Client stages come first so a tie on occurred_at keeps them ahead of
    // the remote stage they precede (stable sort below).
    for stage in &record.client_stages {
        merged.push((record.chain.clone(), stage.clone()));
    }

    if let Some(ps) = &record.polling_state {
        let order = config.chain_order(record.direction);
        for chain in order {
            if let Some(progress) = ps.chain_status.get(chain) {
                for stage in &progress.stages {
                    merged.push((chain.clone(), stage.clone()));
                }
            }
        }
        // Chains the config does not know about still show up, after the
        // configured ones, in deterministic key order.
        let mut extras: Vec<&String> = ps
            .chain_status
            .keys()
            .filter(|k| !order.contains(k))
            .collect();
        extras.sort();
        for chain in extras {
            for stage in &ps.chain_status[chain].stages {
                merged.push((chain.clone(), stage.clone()));
            }
        }
    }

    merged.sort_by_key(|(_, stage)| stage.occurred_at);

    let mut timings: Vec<TimedStage> = merged
        .into_iter()
        .map(|(chain, stage)| TimedStage {
            chain,
            stage,
            duration_ms: None,
        })
        .collect();

    for i in 0..timings.len() {
        if i + 1 < timings.len() {
            let delta = timings[i + 1].stage.occurred_at - timings[i].stage.occurred_at;
            timings[i].duration_ms = Some(delta.max(0));
        } else if timings[i].stage.status == StageStatus::Pending {
            // Last stage still pending: measure against now
            timings[i].duration_ms = Some((now_ms - timings[i].stage.occurred_at).max(0));
        }
    }

    timings
}

/// Most recent stage that is not yet terminal; the last stage if all are
pub fn current_stage<'a>(timings: &'a [TimedStage]) -> Option<&'a TimedStage> {
    timings
        .iter()
        .rev()
        .find(|t| !t.stage.status.is_terminal())
        .or_else(|| timings.last())
}

/// Progress percentage in [0, 100]
///
/// 100 iff effectively finalized, 0 iff effectively errored. Otherwise the
/// confirmed share of the expected stage set, capped at 99 until the flow
/// reports true completion; client-only stages count on neither side. When
/// no stage has confirmed yet, the per-status baseline applies.
pub fn progress_percentage(record: &TransferRecord, config: &StageConfig) -> u8 {
    let effective = status::effective_status(record);
    if effective == TxStatus::Finalized {
        return 100;
    }
    if effective == TxStatus::Error {
        return 0;
    }

    let ps = match &record.polling_state {
        Some(ps) => ps,
        None => return status::base_progress(effective),
    };

    let total = config.total_expected(record.direction);
    if total == 0 {
        return status::base_progress(effective);
    }

    let mut confirmed = 0usize;
    for chain in config.chain_order(record.direction) {
        let expected = config.expected_stages(record.direction, chain);
        if let Some(progress) = ps.chain_status.get(chain) {
            confirmed += progress
                .stages
                .iter()
                .filter(|s| {
                    s.status == StageStatus::Confirmed && expected.contains(&s.stage)
                })
                .count();
        }
    }

    if confirmed == 0 {
        return status::base_progress(effective);
    }
    ((confirmed * 100 / total) as u8).min(99)
}

/// Total flow duration anchored to on-chain block timestamps
///
/// The start anchor is the first on-chain confirmed stage's block timestamp,
/// which excludes pre-submission slack (signing, building). The end anchor
/// is the last block timestamp for finalized flows, `updated_at` for other
/// terminal records, and "now" while in progress.
pub fn total_duration(record: &TransferRecord, now_ms: i64) -> TotalDuration {
    if record.created_at.is_none() {
        return TotalDuration::NotStarted;
    }

    let mut anchors: Vec<i64> = Vec::new();
    if let Some(ps) = &record.polling_state {
        for progress in ps.chain_status.values() {
            for stage in &progress.stages {
                if stage.status == StageStatus::Confirmed {
                    if let Some(ts) = stage.metadata.block_timestamp_ms() {
                        anchors.push(ts);
                    }
                }
            }
        }
    }

    let start = match anchors.iter().min() {
        Some(start) => *start,
        None => return TotalDuration::Unavailable,
    };

    let effective = status::effective_status(record);
    let end = if effective == TxStatus::Finalized {
        anchors.iter().max().copied().unwrap_or(record.updated_at)
    } else if effective.is_terminal() {
        record.updated_at
    } else {
        now_ms
    };

    TotalDuration::Millis((end - start).max(0))
}
