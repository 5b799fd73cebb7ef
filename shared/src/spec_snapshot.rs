use std::{collections::HashMap, sync::Arc};

use crate::{ConfigSpec, GateSpec, LayerSpec};

/// One immutable version of every gate, dynamic config and layer definition,
/// plus the experiment → layer index. A newer version replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecSnapshot {
    gates: HashMap<String, Arc<GateSpec>>,
    configs: HashMap<String, Arc<ConfigSpec>>,
    layers: HashMap<String, Arc<LayerSpec>>,
    experiment_to_layer: HashMap<String, String>,
    sync_time: u64,
}

impl SpecSnapshot {
    pub fn new(
        gates: HashMap<String, Arc<GateSpec>>,
        configs: HashMap<String, Arc<ConfigSpec>>,
        layers: HashMap<String, Arc<LayerSpec>>,
        experiment_to_layer: HashMap<String, String>,
        sync_time: u64,
    ) -> Self {
        Self {
            gates,
            configs,
            layers,
            experiment_to_layer,
            sync_time,
        }
    }

    /// The pre-bootstrap snapshot: no definitions and a sync time of zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Server time reported by the reply this snapshot was built from.
    /// Zero means the snapshot holds no usable configuration.
    pub fn sync_time(&self) -> u64 {
        self.sync_time
    }

    pub fn has_gate(&self, name: &str) -> bool {
        self.gates.contains_key(name)
    }

    pub fn has_config(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    pub fn gate(&self, name: &str) -> Option<&Arc<GateSpec>> {
        self.gates.get(name)
    }

    pub fn config(&self, name: &str) -> Option<&Arc<ConfigSpec>> {
        self.configs.get(name)
    }

    pub fn layer(&self, name: &str) -> Option<&Arc<LayerSpec>> {
        self.layers.get(name)
    }

    pub fn layer_for_experiment(&self, experiment_name: &str) -> Option<&str> {
        self.experiment_to_layer
            .get(experiment_name)
            .map(String::as_str)
    }

    pub fn gates(&self) -> &HashMap<String, Arc<GateSpec>> {
        &self.gates
    }

    pub fn configs(&self) -> &HashMap<String, Arc<ConfigSpec>> {
        &self.configs
    }

    pub fn layers(&self) -> &HashMap<String, Arc<LayerSpec>> {
        &self.layers
    }

    pub fn experiment_to_layer(&self) -> &HashMap<String, String> {
        &self.experiment_to_layer
    }
}
