use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the [`SpecStore`](crate::SpecStore)
#[derive(Clone, Debug)]
pub struct SpecStoreConfig {
    /// Delay between two configuration delta fetches
    pub rulesets_sync_interval: Duration,
    /// Delay between the end of one id list round and the start of the next
    pub id_lists_sync_interval: Duration,
    /// Upper bound on id list downloads running at once within a round.
    /// Values below 1 are treated as 1.
    pub max_concurrent_id_list_downloads: usize,
    /// Worker threads of the runtime that drives the background loops
    pub worker_threads: usize,
}

impl Default for SpecStoreConfig {
    fn default() -> Self {
        Self {
            rulesets_sync_interval: Duration::from_secs(10),
            id_lists_sync_interval: Duration::from_secs(60),
            max_concurrent_id_list_downloads: 16,
            worker_threads: 2,
        }
    }
}
