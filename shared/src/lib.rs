//! # Specsync Shared
//! Wire schemas, id lists, spec snapshots and the layer accessor shared
//! between the specsync client & its test harness.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod id_list;
mod id_set;
mod layer;
mod protocol;
mod spec_snapshot;

pub use id_list::{
    error::IdListError,
    id_list::{IdList, IdListMap},
    id_list_delta::{IdListDelta, IdListOp},
    refresh_plan::{plan_refresh, RefreshPlan},
};
pub use id_set::IdSet;
pub use layer::{ExposureRecorder, JsonKind, Layer};
pub use protocol::{
    config_specs::{ConfigSpec, ConfigSpecsResponse, GateSpec, LayerSpec},
    error::ProtocolError,
    id_list_metadata::{IdListMetadata, IdListMetadataResponse},
};
pub use spec_snapshot::SpecSnapshot;
