use std::{sync::Arc, time::Duration};

use tokio::{sync::Semaphore, task::JoinSet};

use specsync_shared::{plan_refresh, IdList, IdListMap, IdListMetadataResponse, RefreshPlan};

use crate::{Network, StoreState, SyncError};

/// Counts of what happened during one id list round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdListRound {
    /// Lists that received new bytes
    pub updated: usize,
    /// Downloads that failed and will be retried next round
    pub failed: usize,
    /// Lists dropped because their delta was corrupted
    pub corrupted: usize,
    /// Lists dropped because the server no longer lists them
    pub retired: usize,
}

enum DownloadOutcome {
    Updated,
    Failed,
    Corrupted,
}

/// Reconciles id list metadata and downloads the new bytes of each list.
pub struct IdListSyncer<N: Network> {
    network: Arc<N>,
    state: Arc<StoreState>,
    download_permits: Arc<Semaphore>,
}

impl<N: Network> IdListSyncer<N> {
    pub fn new(network: Arc<N>, state: Arc<StoreState>, max_concurrent_downloads: usize) -> Self {
        Self {
            network,
            state,
            download_permits: Arc::new(Semaphore::new(max_concurrent_downloads.max(1))),
        }
    }

    /// Runs one full round: fetch metadata, plan every list, download the
    /// lists that grew, then publish the resulting collection.
    ///
    /// Returns only after every download of the round has finished. If the
    /// metadata cannot be fetched or decoded nothing is changed.
    pub async fn sync(&self) -> Result<IdListRound, SyncError> {
        let body = self.network.fetch_id_list_metadata().await?;
        let server_lists = IdListMetadataResponse::from_json(&body)?;

        let mut next: IdListMap = self.state.id_lists().as_ref().clone();
        let mut downloads = JoinSet::new();

        for (name, metadata) in server_lists.iter() {
            let (list, plan) = plan_refresh(next.get(name), name, metadata);
            next.insert(name.clone(), list.clone());

            if plan != RefreshPlan::Download {
                continue;
            }

            let network = self.network.clone();
            let permits = self.download_permits.clone();
            downloads.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let outcome = download_id_list(network.as_ref(), &list).await;
                (list.name().to_string(), outcome)
            });
        }

        let mut round = IdListRound::default();
        while let Some(joined) = downloads.join_next().await {
            match joined {
                Ok((_, DownloadOutcome::Updated)) => round.updated += 1,
                Ok((_, DownloadOutcome::Failed)) => round.failed += 1,
                Ok((name, DownloadOutcome::Corrupted)) => {
                    next.remove(&name);
                    round.corrupted += 1;
                }
                Err(error) => {
                    log::warn!("Id list download task did not complete: {}", error);
                    round.failed += 1;
                }
            }
        }

        let before = next.len();
        next.retain(|name, _| server_lists.contains(name));
        round.retired = before - next.len();

        self.state.publish_id_lists(next);
        Ok(round)
    }

    /// Runs [`IdListSyncer::sync`], logging any failure instead of
    /// returning it.
    pub async fn tick(&self) -> Option<IdListRound> {
        match self.sync().await {
            Ok(round) => {
                log::debug!(
                    "Id list round done: {} updated, {} failed, {} corrupted, {} retired",
                    round.updated,
                    round.failed,
                    round.corrupted,
                    round.retired
                );
                Some(round)
            }
            Err(error) => {
                log::warn!("Id list sync failed: {}", error);
                None
            }
        }
    }

    /// Ticks forever, sleeping `interval` after each completed round.
    pub async fn run(self, interval: Duration) {
        loop {
            tokio::time::sleep(interval).await;
            self.tick().await;
        }
    }
}

async fn download_id_list<N: Network>(network: &N, list: &IdList) -> DownloadOutcome {
    let Some(url) = list.url() else {
        return DownloadOutcome::Failed;
    };
    let start = list.cursor();

    let response = match network.fetch_id_list_range(url, start).await {
        Ok(response) => response,
        Err(error) => {
            log::warn!("Failed to download id list '{}': {}", list.name(), error);
            return DownloadOutcome::Failed;
        }
    };

    if !response.is_success() {
        log::warn!(
            "Id list '{}' download returned HTTP status {}",
            list.name(),
            response.status
        );
        return DownloadOutcome::Failed;
    }

    let content_length = match response.content_length {
        Some(length) if length > 0 => length,
        _ => {
            log::debug!(
                "Id list '{}' download declared no content (content length {:?})",
                list.name(),
                response.content_length
            );
            return DownloadOutcome::Failed;
        }
    };

    match list.apply_delta(&response.body, content_length) {
        Ok(applied) => {
            log::trace!(
                "Applied {} records to id list '{}', cursor {} -> {}",
                applied,
                list.name(),
                start,
                list.cursor()
            );
            DownloadOutcome::Updated
        }
        Err(error) => {
            log::warn!("{}, dropping local copy", error);
            DownloadOutcome::Corrupted
        }
    }
}
