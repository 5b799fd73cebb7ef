use std::sync::Arc;

use tokio::{runtime::Runtime, task::JoinHandle};

use specsync_shared::{ConfigSpec, GateSpec, IdList, IdListMap, LayerSpec, SpecSnapshot};

use crate::{
    ConfigSyncer, ErrorCallback, IdListSyncer, Network, SpecStoreConfig, SpecStoreError,
    StoreState,
};

/// In-memory store of every spec and id list the evaluation engine reads.
///
/// Construction blocks on one configuration fetch and one id list round,
/// then hands both loops to a runtime owned by the store. Every read is
/// answered from the last published state.
///
/// The store drives its own runtime, so it must be created and dropped
/// outside of an async context.
pub struct SpecStore {
    state: Arc<StoreState>,
    runtime: Option<Runtime>,
    config_sync_task: Option<JoinHandle<()>>,
    id_list_sync_task: Option<JoinHandle<()>>,
}

impl SpecStore {
    pub fn initialize<N: Network>(
        network: N,
        error_callback: Option<ErrorCallback>,
        config: SpecStoreConfig,
    ) -> Result<Self, SpecStoreError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name("specsync")
            .enable_all()
            .build()
            .map_err(|e| SpecStoreError::RuntimeBuild {
                message: e.to_string(),
            })?;

        let network = Arc::new(network);
        let state = Arc::new(StoreState::new());
        let config_syncer = ConfigSyncer::new(network.clone(), state.clone(), error_callback);
        let id_list_syncer = IdListSyncer::new(
            network,
            state.clone(),
            config.max_concurrent_id_list_downloads,
        );

        runtime.block_on(async {
            config_syncer.tick().await;
            id_list_syncer.tick().await;
        });

        log::info!(
            "Spec store bootstrapped (ready: {}, sync time {}, {} id lists)",
            state.is_ready(),
            state.last_sync_time(),
            state.id_lists().len()
        );

        let config_sync_task = runtime.spawn(config_syncer.run(config.rulesets_sync_interval));
        let id_list_sync_task = runtime.spawn(id_list_syncer.run(config.id_lists_sync_interval));

        Ok(Self {
            state,
            runtime: Some(runtime),
            config_sync_task: Some(config_sync_task),
            id_list_sync_task: Some(id_list_sync_task),
        })
    }

    /// True once a configuration with a non-zero server time has been
    /// applied. A store that is not ready has no usable configuration and
    /// must not be evaluated against.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Cancels both loops and any download still in flight. Pending network
    /// calls are dropped, not awaited. Calling it again is a no-op.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.config_sync_task.take() {
            task.abort();
        }
        if let Some(task) = self.id_list_sync_task.take() {
            task.abort();
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
            log::info!("Spec store shut down");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.runtime.is_none()
    }

    pub fn has_gate(&self, name: &str) -> bool {
        self.state.snapshot().has_gate(name)
    }

    pub fn has_config(&self, name: &str) -> bool {
        self.state.snapshot().has_config(name)
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.state.snapshot().has_layer(name)
    }

    pub fn get_gate(&self, name: &str) -> Option<Arc<GateSpec>> {
        self.state.snapshot().gate(name).cloned()
    }

    pub fn get_config(&self, name: &str) -> Option<Arc<ConfigSpec>> {
        self.state.snapshot().config(name).cloned()
    }

    pub fn get_layer(&self, name: &str) -> Option<Arc<LayerSpec>> {
        self.state.snapshot().layer(name).cloned()
    }

    /// Name of the layer `experiment_name` belongs to, if any.
    pub fn get_layer_for_experiment(&self, experiment_name: &str) -> Option<String> {
        self.state
            .snapshot()
            .layer_for_experiment(experiment_name)
            .map(str::to_string)
    }

    pub fn get_id_list(&self, name: &str) -> Option<Arc<IdList>> {
        self.state.id_list(name)
    }

    pub fn id_list_names(&self) -> Vec<String> {
        self.state.id_lists().keys().cloned().collect()
    }

    /// Every id list as of the last completed round.
    pub fn id_lists(&self) -> Arc<IdListMap> {
        self.state.id_lists()
    }

    /// The current snapshot. Holding it pins that version for the caller
    /// even after a newer one is published.
    pub fn snapshot(&self) -> Arc<SpecSnapshot> {
        self.state.snapshot()
    }

    pub fn last_sync_time(&self) -> u64 {
        self.state.last_sync_time()
    }

    /// Handle on the shared state, for readers that outlive a borrow of
    /// the store.
    pub fn state(&self) -> Arc<StoreState> {
        self.state.clone()
    }
}

impl Drop for SpecStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}
