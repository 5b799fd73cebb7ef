//! # Specsync Client
//! Keeps gates, dynamic configs, layers and id lists fresh in memory. One
//! background loop pulls configuration deltas, another pulls id list
//! metadata and byte-range diffs, and every read is served from the last
//! published state without touching the network.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

pub mod transport;
pub mod shared {
    pub use specsync_shared::{
        ConfigSpec, ConfigSpecsResponse, ExposureRecorder, GateSpec, IdList, IdListError,
        IdListMap, IdListMetadata, IdListMetadataResponse, IdSet, JsonKind, Layer, LayerSpec,
        ProtocolError, SpecSnapshot,
    };
}

mod error;
mod network;
mod store;

pub use error::{NetworkError, SpecStoreError, SyncError};
pub use network::{Network, RangeResponse};
pub use store::{
    config_syncer::{ConfigSyncer, ErrorCallback},
    id_list_syncer::{IdListRound, IdListSyncer},
    spec_store::SpecStore,
    store_config::SpecStoreConfig,
    store_state::StoreState,
};
