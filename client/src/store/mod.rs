pub mod config_syncer;
pub mod id_list_syncer;
pub mod spec_store;
pub mod store_config;
pub mod store_state;
