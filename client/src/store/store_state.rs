use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use arc_swap::ArcSwap;

use specsync_shared::{IdList, IdListMap, SpecSnapshot};

/// State shared between the two sync loops and every reader.
///
/// The configuration loop is the only writer of `snapshot` and
/// `last_sync_time`; the id list loop is the only writer of `id_lists`.
/// Both publish by swapping in a fully built value, so readers never lock.
pub struct StoreState {
    snapshot: ArcSwap<SpecSnapshot>,
    last_sync_time: AtomicU64,
    id_lists: ArcSwap<IdListMap>,
}

impl StoreState {
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(SpecSnapshot::empty()),
            last_sync_time: AtomicU64::new(0),
            id_lists: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// True once an accepted snapshot carried a non-zero server time.
    pub fn is_ready(&self) -> bool {
        self.snapshot.load().sync_time() != 0
    }

    pub fn snapshot(&self) -> Arc<SpecSnapshot> {
        self.snapshot.load_full()
    }

    /// Server time sent with the next configuration request.
    pub fn last_sync_time(&self) -> u64 {
        self.last_sync_time.load(Ordering::Acquire)
    }

    pub fn id_lists(&self) -> Arc<IdListMap> {
        self.id_lists.load_full()
    }

    pub fn id_list(&self, name: &str) -> Option<Arc<IdList>> {
        self.id_lists.load().get(name).cloned()
    }

    pub(crate) fn publish_snapshot(&self, snapshot: SpecSnapshot) {
        self.snapshot.store(Arc::new(snapshot));
    }

    // never moves backwards
    pub(crate) fn advance_sync_time(&self, time: u64) {
        self.last_sync_time.fetch_max(time, Ordering::AcqRel);
    }

    pub(crate) fn publish_id_lists(&self, id_lists: IdListMap) {
        self.id_lists.store(Arc::new(id_lists));
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new()
    }
}
