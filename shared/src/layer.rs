use std::{fmt, sync::Arc};

use serde_json::{Map, Value};

/// Receives a notification each time a layer parameter is actually read.
pub trait ExposureRecorder: Send + Sync {
    fn record_exposure(&self, layer: &Layer, parameter_name: &str);
}

/// Runtime kind of a JSON value, as compared by [`Layer::get_typed`].
/// Integers and floats are different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(number) if number.is_f64() => JsonKind::Float,
            Value::Number(_) => JsonKind::Integer,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

/// Evaluated layer handed back to the caller of an evaluation.
///
/// Reading a parameter that exists notifies the exposure recorder, reading
/// one that does not simply yields the caller's default.
pub struct Layer {
    name: String,
    rule_id: String,
    value: Option<Map<String, Value>>,
    exposure_recorder: Option<Arc<dyn ExposureRecorder>>,
}

impl Layer {
    pub fn new(name: &str, value: Option<Map<String, Value>>, rule_id: &str) -> Self {
        Self {
            name: name.to_string(),
            rule_id: rule_id.to_string(),
            value,
            exposure_recorder: None,
        }
    }

    pub fn with_exposure_recorder(mut self, recorder: Arc<dyn ExposureRecorder>) -> Self {
        self.exposure_recorder = Some(recorder);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn value(&self) -> Option<&Map<String, Value>> {
        self.value.as_ref()
    }

    /// Returns the parameter `key`, or `default` if the layer has no such
    /// parameter.
    pub fn get(&self, key: &str, default: Value) -> Value {
        match self.parameter(key) {
            Some(value) => {
                self.record_exposure(key);
                value.clone()
            }
            None => default,
        }
    }

    /// Like [`Layer::get`], but also falls back to `default` when the stored
    /// value is of a different [`JsonKind`] than `default`.
    pub fn get_typed(&self, key: &str, default: Value) -> Value {
        match self.parameter(key) {
            Some(value) if JsonKind::of(value) == JsonKind::of(&default) => {
                self.record_exposure(key);
                value.clone()
            }
            _ => default,
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_typed(key, Value::Bool(default))
            .as_bool()
            .unwrap_or(default)
    }

    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get_typed(key, Value::from(default))
            .as_i64()
            .unwrap_or(default)
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get_typed(key, Value::from(default))
            .as_f64()
            .unwrap_or(default)
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        match self.get_typed(key, Value::String(default.to_string())) {
            Value::String(value) => value,
            _ => default.to_string(),
        }
    }

    pub fn get_array(&self, key: &str, default: Vec<Value>) -> Vec<Value> {
        match self.get_typed(key, Value::Array(default.clone())) {
            Value::Array(value) => value,
            _ => default,
        }
    }

    pub fn get_object(&self, key: &str, default: Map<String, Value>) -> Map<String, Value> {
        match self.get_typed(key, Value::Object(default.clone())) {
            Value::Object(value) => value,
            _ => default,
        }
    }

    fn parameter(&self, key: &str) -> Option<&Value> {
        self.value.as_ref()?.get(key)
    }

    fn record_exposure(&self, key: &str) {
        if let Some(recorder) = &self.exposure_recorder {
            recorder.record_exposure(self, key);
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("rule_id", &self.rule_id)
            .field("value", &self.value)
            .field("exposure_recorder", &self.exposure_recorder.is_some())
            .finish()
    }
}
