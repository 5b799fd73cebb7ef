use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use arc_swap::ArcSwap;

use crate::{IdListDelta, IdListError, IdListMetadata, IdSet};

/// Every locally known id list, keyed by name.
pub type IdListMap = HashMap<String, Arc<IdList>>;

/// One named, versioned membership list.
///
/// The metadata fields are fixed for the life of a generation; a new
/// `file_id` is represented by a brand new `IdList`. Only `cursor` and
/// `ids` move, and only through [`IdList::apply_delta`].
pub struct IdList {
    name: String,
    url: Option<String>,
    creation_time: i64,
    file_id: Option<String>,
    cursor: AtomicU64,
    ids: ArcSwap<IdSet>,
}

impl IdList {
    pub fn new(
        name: &str,
        url: Option<String>,
        creation_time: i64,
        file_id: Option<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            url,
            creation_time,
            file_id,
            cursor: AtomicU64::new(0),
            ids: ArcSwap::from_pointee(IdSet::new()),
        }
    }

    /// Empty list at cursor zero carrying the server's metadata.
    pub fn from_metadata(name: &str, metadata: &IdListMetadata) -> Self {
        Self::new(
            name,
            metadata.url.clone(),
            metadata.creation_time,
            metadata.file_id.clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn creation_time(&self) -> i64 {
        self.creation_time
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    /// Bytes of the server file already consumed.
    pub fn cursor(&self) -> u64 {
        self.cursor.load(Ordering::Acquire)
    }

    /// The currently published membership set.
    pub fn ids(&self) -> Arc<IdSet> {
        self.ids.load_full()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.load().contains(id)
    }

    pub fn size(&self) -> usize {
        self.ids.load().len()
    }

    /// Applies one downloaded range to this list.
    ///
    /// The new set is built from a clone of the current one and published
    /// in a single swap, then the cursor moves by `content_length`, the
    /// number of bytes the server says it delivered. On error nothing is
    /// changed. Returns the number of records applied.
    ///
    /// Callers must not run two `apply_delta` calls on the same list
    /// concurrently.
    pub fn apply_delta(&self, body: &str, content_length: u64) -> Result<usize, IdListError> {
        let delta = IdListDelta::parse(&self.name, body)?;

        let next = self.ids.load().with_applied(&delta);
        self.ids.store(Arc::new(next));
        self.cursor.fetch_add(content_length, Ordering::AcqRel);

        Ok(delta.len())
    }
}

impl fmt::Debug for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdList")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("creation_time", &self.creation_time)
            .field("file_id", &self.file_id)
            .field("cursor", &self.cursor())
            .field("size", &self.size())
            .finish()
    }
}
