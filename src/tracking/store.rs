//! Durable transfer record store
//!
//! Keeps the full collection in memory and serializes it as one JSON blob
//! under a single sled key on every mutation. Persistence failures are
//! logged and swallowed: a failed write leaves the previously persisted
//! collection intact, and the in-memory view stays authoritative for the
//! rest of the process lifetime. Concurrent writers to the same id are
//! last-write-wins on the full record.

use std::collections::HashMap;

use anyhow::{Context, Result};
use parking_lot::Mutex;

use crate::simple_kv_storage::SledDb;
use crate::tracking::status;
use crate::tracking::types::TransferRecord;

const RECORDS_KEY: &str = "transfers";

pub struct TransactionStore {
    kv: SledDb,
    records: Mutex<HashMap<String, TransferRecord>>,
}

impl TransactionStore {
    /// Open the store at the given sled path, restoring any persisted
    /// collection
    pub fn open(path: &str) -> Result<Self> {
        let kv = SledDb::new(path).with_context(|| format!("Failed to open store at {}", path))?;

        let records = match kv.get_bytes(RECORDS_KEY) {
            Some(bytes) => serde_json::from_slice::<Vec<TransferRecord>>(&bytes)
                .context("Failed to decode persisted transfer records")?
                .into_iter()
                .map(|r| (r.id.clone(), r))
                .collect(),
            None => HashMap::new(),
        };

        Ok(Self {
            kv,
            records: Mutex::new(records),
        })
    }

    /// Upsert a record by id, stamping `updated_at`
    ///
    /// Callers must pass a fully merged record: the prior record with the
    /// same id is replaced in full, not merged field by field.
    pub fn save(&self, mut record: TransferRecord) {
        record.updated_at = chrono::Utc::now().timestamp_millis();

        let mut records = self.records.lock();
        records.insert(record.id.clone(), record);
        self.persist(&records);
    }

    pub fn get(&self, id: &str) -> Option<TransferRecord> {
        self.records.lock().get(id).cloned()
    }

    /// Find the record tracked under the given flow id
    pub fn find_by_flow(&self, flow_id: &str) -> Option<TransferRecord> {
        self.records
            .lock()
            .values()
            .find(|r| r.flow_id.as_deref() == Some(flow_id))
            .cloned()
    }

    /// All records, newest first by `updated_at`
    pub fn get_all(&self) -> Vec<TransferRecord> {
        let mut all: Vec<TransferRecord> = self.records.lock().values().cloned().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        all
    }

    /// Records whose effective status still needs polling or user attention
    pub fn get_in_progress(&self) -> Vec<TransferRecord> {
        self.get_all()
            .into_iter()
            .filter(status::is_in_progress)
            .collect()
    }

    /// Records whose local status is terminal, newest first
    pub fn get_completed(&self, limit: Option<usize>) -> Vec<TransferRecord> {
        let completed = self
            .get_all()
            .into_iter()
            .filter(|r| r.status.is_terminal());
        match limit {
            Some(n) => completed.take(n).collect(),
            None => completed.collect(),
        }
    }

    pub fn delete(&self, id: &str) {
        let mut records = self.records.lock();
        if records.remove(id).is_some() {
            self.persist(&records);
        }
    }

    pub fn clear(&self) {
        let mut records = self.records.lock();
        records.clear();
        if let Err(e) = self.kv.remove(RECORDS_KEY) {
            log::error!("Failed to clear persisted transfers: {}", e);
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    // Serialize the whole collection under one key. Failures are logged,
    // never surfaced: the previous durable state stays intact.
    fn persist(&self, records: &HashMap<String, TransferRecord>) {
        let all: Vec<&TransferRecord> = records.values().collect();
        let bytes = match serde_json::to_vec(&all) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Failed to encode transfer records: {}", e);
                return;
            }
        };
        if let Err(e) = self.kv.insert_bytes(RECORDS_KEY, &bytes) {
            log::error!("Failed to persist {} transfer records: {}", all.len(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::types::{Direction, TxStatus};

    fn open_temp() -> (tempfile::TempDir, TransactionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TransactionStore::open(dir.path().to_str().unwrap()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_is_upsert() {
        // Scenario D: two saves with the same id leave exactly one record
        let (_dir, store) = open_temp();

        let mut record = TransferRecord::new("tx-1", Direction::Deposit, "origin");
        record.amount = Some("100".to_string());
        store.save(record.clone());

        record.amount = Some("250".to_string());
        record.status = TxStatus::Submitting;
        store.save(record);

        assert_eq!(store.len(), 1);
        let stored = store.get("tx-1").unwrap();
        assert_eq!(stored.amount.as_deref(), Some("250"));
        assert_eq!(stored.status, TxStatus::Submitting);
    }

    #[test]
    fn test_save_stamps_updated_at() {
        let (_dir, store) = open_temp();

        let mut record = TransferRecord::new("tx-1", Direction::Deposit, "origin");
        record.updated_at = 0;
        store.save(record);

        assert!(store.get("tx-1").unwrap().updated_at > 0);
    }

    #[test]
    fn test_get_all_sorted_newest_first() {
        let (_dir, store) = open_temp();

        store.save(TransferRecord::new("tx-1", Direction::Deposit, "origin"));
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.save(TransferRecord::new("tx-2", Direction::Send, "origin"));

        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "tx-2");
        assert_eq!(all[1].id, "tx-1");
    }

    #[test]
    fn test_in_progress_and_completed_views() {
        let (_dir, store) = open_temp();

        let mut active = TransferRecord::new("tx-active", Direction::Deposit, "origin");
        active.status = TxStatus::Submitting;
        store.save(active);

        let mut done = TransferRecord::new("tx-done", Direction::Deposit, "origin");
        done.status = TxStatus::Finalized;
        store.save(done);

        let mut idle = TransferRecord::new("tx-idle", Direction::Send, "origin");
        idle.status = TxStatus::Idle;
        store.save(idle);

        let in_progress = store.get_in_progress();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, "tx-active");

        let completed = store.get_completed(None);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "tx-done");
    }

    #[test]
    fn test_get_completed_limit() {
        let (_dir, store) = open_temp();

        for i in 0..5 {
            let mut record =
                TransferRecord::new(&format!("tx-{}", i), Direction::Deposit, "origin");
            record.status = TxStatus::Error;
            store.save(record);
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let completed = store.get_completed(Some(2));
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].id, "tx-4");
    }

    #[test]
    fn test_delete_and_clear() {
        let (_dir, store) = open_temp();

        store.save(TransferRecord::new("tx-1", Direction::Deposit, "origin"));
        store.save(TransferRecord::new("tx-2", Direction::Deposit, "origin"));

        store.delete("tx-1");
        assert!(store.get("tx-1").is_none());
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_flow() {
        let (_dir, store) = open_temp();

        let mut record = TransferRecord::new("tx-1", Direction::Deposit, "origin");
        record.flow_id = Some("flow-7".to_string());
        store.save(record);

        assert_eq!(store.find_by_flow("flow-7").unwrap().id, "tx-1");
        assert!(store.find_by_flow("flow-8").is_none());
    }

    #[test]
    fn test_reload_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();

        {
            let store = TransactionStore::open(&path).unwrap();
            let mut record = TransferRecord::new("tx-1", Direction::Deposit, "origin");
            record.status = TxStatus::Broadcasted;
            record.flow_id = Some("flow-1".to_string());
            store.save(record);
        }

        let reopened = TransactionStore::open(&path).unwrap();
        let record = reopened.get("tx-1").unwrap();
        assert_eq!(record.status, TxStatus::Broadcasted);
        assert_eq!(record.flow_id.as_deref(), Some("flow-1"));
    }
}
