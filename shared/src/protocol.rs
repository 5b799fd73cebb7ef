pub mod config_specs;
pub mod error;
pub mod id_list_metadata;

pub use error::ProtocolError;
