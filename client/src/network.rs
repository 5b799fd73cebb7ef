use std::future::Future;

use crate::NetworkError;

/// Reply to a byte-range request for an id list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeResponse {
    pub status: u16,
    /// Value of the `Content-Length` header, if the server sent one
    pub content_length: Option<u64>,
    pub body: String,
}

impl RangeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound calls the store makes. Implementations own transport concerns
/// such as auth headers, TLS and socket-level retries.
pub trait Network: Send + Sync + 'static {
    /// Fetches the configuration delta since `since_time`, returning the raw
    /// response body.
    fn fetch_config_specs(
        &self,
        since_time: u64,
    ) -> impl Future<Output = Result<String, NetworkError>> + Send;

    /// Fetches the current id list metadata, returning the raw response body.
    fn fetch_id_list_metadata(&self) -> impl Future<Output = Result<String, NetworkError>> + Send;

    /// Fetches `url` from byte `start` to the end of the resource.
    fn fetch_id_list_range(
        &self,
        url: &str,
        start: u64,
    ) -> impl Future<Output = Result<RangeResponse, NetworkError>> + Send;
}
