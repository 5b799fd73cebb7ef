use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{ProtocolError, SpecSnapshot};

/// A gate, dynamic config or layer definition as authored on the server.
///
/// Only the fields every definition shares are typed. Anything else the
/// evaluation engine needs is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub spec_type: Option<String>,
    #[serde(default)]
    pub salt: Option<String>,
    #[serde(default = "enabled_by_default", deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub default_value: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Value>,
    #[serde(default)]
    pub id_type: Option<String>,
    #[serde(default)]
    pub explicit_parameters: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type GateSpec = ConfigSpec;
pub type LayerSpec = ConfigSpec;

fn enabled_by_default() -> bool {
    true
}

fn null_as_enabled<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// a value of the wrong shape reads as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Body of a `download_config_specs` reply.
///
/// Every field is optional on the wire: a "no updates" reply usually carries
/// only `time` and `has_updates: false`. Top-level fields of the wrong shape
/// read as absent, and definitions are only decoded when the reply is turned
/// into a snapshot, so `time` stays readable whatever the rest looks like.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigSpecsResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<u64>,
    #[serde(default, alias = "hasUpdates", deserialize_with = "lenient")]
    pub has_updates: Option<bool>,
    #[serde(default, alias = "featureGates", deserialize_with = "lenient")]
    pub feature_gates: Option<Vec<Value>>,
    #[serde(default, alias = "dynamicConfigs", deserialize_with = "lenient")]
    pub dynamic_configs: Option<Vec<Value>>,
    #[serde(default, alias = "layerConfigs", deserialize_with = "lenient")]
    pub layer_configs: Option<Vec<Value>>,
    #[serde(default)]
    pub layers: Option<Value>,
}

impl ConfigSpecsResponse {
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(body).map_err(|e| ProtocolError::malformed("config specs", e))
    }

    /// True when the reply may replace the current snapshot: the server
    /// reported updates and all three definition arrays are present.
    pub fn is_complete_update(&self) -> bool {
        self.has_updates == Some(true)
            && self.feature_gates.is_some()
            && self.dynamic_configs.is_some()
            && self.layer_configs.is_some()
    }

    /// Builds the snapshot this reply describes, or `None` if the reply is a
    /// "no updates" marker or is missing any of the definition arrays.
    pub fn into_snapshot(self) -> Option<SpecSnapshot> {
        if !self.is_complete_update() {
            return None;
        }

        let (Some(feature_gates), Some(dynamic_configs), Some(layer_configs)) =
            (self.feature_gates, self.dynamic_configs, self.layer_configs)
        else {
            return None;
        };

        let gates = by_name("feature gate", feature_gates);
        let configs = by_name("dynamic config", dynamic_configs);
        let layers = by_name("layer config", layer_configs);

        let mut experiment_to_layer = HashMap::new();
        if let Some(Value::Object(layer_map)) = self.layers {
            // sorted so an experiment listed twice resolves the same way every time
            let layer_map: BTreeMap<String, Value> = layer_map.into_iter().collect();
            for (layer_name, experiments) in layer_map {
                let Value::Array(experiments) = experiments else {
                    continue;
                };
                for experiment in experiments {
                    if let Value::String(experiment_name) = experiment {
                        experiment_to_layer.insert(experiment_name, layer_name.clone());
                    }
                }
            }
        }

        Some(SpecSnapshot::new(
            gates,
            configs,
            layers,
            experiment_to_layer,
            self.time.unwrap_or(0),
        ))
    }
}

// later entries replace earlier ones with the same name; undecodable ones are skipped
fn by_name(kind: &str, specs: Vec<Value>) -> HashMap<String, Arc<ConfigSpec>> {
    let mut map = HashMap::with_capacity(specs.len());
    for value in specs {
        match serde_json::from_value::<ConfigSpec>(value) {
            Ok(spec) => {
                map.insert(spec.name.clone(), Arc::new(spec));
            }
            Err(error) => {
                log::warn!("Skipping malformed {} definition: {}", kind, error);
            }
        }
    }
    map
}
