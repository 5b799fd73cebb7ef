use std::{sync::Arc, time::Duration};

use specsync_shared::ConfigSpecsResponse;

use crate::{Network, StoreState, SyncError};

/// Called with the error of every failed configuration tick.
pub type ErrorCallback = Arc<dyn Fn(&SyncError) + Send + Sync>;

/// Pulls configuration deltas and publishes accepted snapshots.
pub struct ConfigSyncer<N: Network> {
    network: Arc<N>,
    state: Arc<StoreState>,
    error_callback: Option<ErrorCallback>,
}

impl<N: Network> ConfigSyncer<N> {
    pub fn new(
        network: Arc<N>,
        state: Arc<StoreState>,
        error_callback: Option<ErrorCallback>,
    ) -> Self {
        Self {
            network,
            state,
            error_callback,
        }
    }

    /// Fetches one delta and applies it if it is a complete update.
    ///
    /// The sync cursor follows the reply's `time` even when the reply is not
    /// applied. Returns whether a new snapshot was published.
    pub async fn sync(&self) -> Result<bool, SyncError> {
        let since_time = self.state.last_sync_time();
        let body = self.network.fetch_config_specs(since_time).await?;
        let response = ConfigSpecsResponse::from_json(&body)?;

        if let Some(time) = response.time {
            self.state.advance_sync_time(time);
        }

        match response.into_snapshot() {
            Some(snapshot) => {
                log::debug!(
                    "Applying config specs at time {} ({} gates, {} configs, {} layers)",
                    snapshot.sync_time(),
                    snapshot.gates().len(),
                    snapshot.configs().len(),
                    snapshot.layers().len()
                );
                self.state.publish_snapshot(snapshot);
                Ok(true)
            }
            None => {
                log::debug!("No config spec updates since {}", since_time);
                Ok(false)
            }
        }
    }

    /// Runs [`ConfigSyncer::sync`], reporting any failure instead of
    /// returning it.
    pub async fn tick(&self) -> bool {
        match self.sync().await {
            Ok(applied) => applied,
            Err(error) => {
                log::warn!("Config spec sync failed: {}", error);
                if let Some(callback) = &self.error_callback {
                    callback(&error);
                }
                false
            }
        }
    }

    /// Ticks forever, sleeping `interval` before each tick.
    pub async fn run(self, interval: Duration) {
        loop {
            tokio::time::sleep(interval).await;
            self.tick().await;
        }
    }
}
