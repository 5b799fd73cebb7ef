pub mod error;
pub mod id_list;
pub mod id_list_delta;
pub mod refresh_plan;
