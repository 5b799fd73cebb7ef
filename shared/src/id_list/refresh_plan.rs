use std::sync::Arc;

use crate::{IdList, IdListMetadata};

/// What one metadata round decided for a single list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPlan {
    /// Server entry has no url or file id, or is older than the local copy
    Reject,
    /// Server has published nothing past the local cursor
    UpToDate,
    /// Fetch the bytes from the local cursor onwards
    Download,
}

/// Reconciles the server's view of list `name` with the local copy.
///
/// Returns the list that should be kept locally for `name`, which is either
/// `local` itself, a newly created list, or a fresh list replacing `local`
/// after a generation change, together with what to do about it.
pub fn plan_refresh(
    local: Option<&Arc<IdList>>,
    name: &str,
    server: &IdListMetadata,
) -> (Arc<IdList>, RefreshPlan) {
    let local = match local {
        Some(list) => list.clone(),
        None => Arc::new(IdList::from_metadata(name, server)),
    };

    if !server.is_downloadable() || server.creation_time < local.creation_time() {
        log::debug!(
            "Rejecting metadata for id list '{}' (url: {:?}, file id: {:?}, creation time {} vs local {})",
            name,
            server.url,
            server.file_id,
            server.creation_time,
            local.creation_time()
        );
        return (local, RefreshPlan::Reject);
    }

    let local = if server.file_id.as_deref() != local.file_id() {
        log::debug!(
            "Id list '{}' moved from file {:?} to {:?}, starting over",
            name,
            local.file_id(),
            server.file_id
        );
        Arc::new(IdList::from_metadata(name, server))
    } else {
        local
    };

    if server.size <= local.cursor() {
        return (local, RefreshPlan::UpToDate);
    }

    (local, RefreshPlan::Download)
}
