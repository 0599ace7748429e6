//! Ephemeral remote-status cache
//!
//! Keeps the last known remote status per flow for a bounded lifetime. The
//! timeout path consults it when the final fetch fails, so a transfer whose
//! network just flapped can still land on its last observed status instead
//! of going straight to undetermined.

use cached::stores::TimedCache;
use cached::Cached;
use parking_lot::Mutex;

use crate::tracking::fetcher::FlowStatusResponse;

pub struct StatusCache {
    inner: Mutex<TimedCache<String, FlowStatusResponse>>,
}

impl StatusCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            inner: Mutex::new(TimedCache::with_lifespan(ttl_secs)),
        }
    }

    pub fn put(&self, flow_id: &str, response: FlowStatusResponse) {
        self.inner.lock().cache_set(flow_id.to_string(), response);
    }

    pub fn get(&self, flow_id: &str) -> Option<FlowStatusResponse> {
        self.inner.lock().cache_get(&flow_id.to_string()).cloned()
    }
}
