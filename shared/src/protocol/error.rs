use thiserror::Error;

/// Errors that can occur while decoding a server payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Payload was not valid JSON, or did not match the expected shape
    #[error("Malformed {payload} payload: {message}")]
    Malformed {
        payload: &'static str,
        message: String,
    },
}

impl ProtocolError {
    pub(crate) fn malformed(payload: &'static str, error: serde_json::Error) -> Self {
        Self::Malformed {
            payload,
            message: error.to_string(),
        }
    }
}
