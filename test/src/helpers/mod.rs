pub mod fake_network;
pub mod wait;

pub use exposure_recorder::RecordingExposureRecorder;
pub use fake_network::FakeNetwork;
pub use payloads::{
    config_specs_body, id_list_metadata_body, no_updates_body, range_reply, spec_json, IdListEntry,
};
pub use wait::wait_until;
