use thiserror::Error;

/// Errors that can occur while applying an id list delta
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdListError {
    /// Delta body did not start with an add or remove record. The local copy
    /// can no longer be trusted and must be rebuilt from a fresh generation
    #[error("Corrupted delta for id list '{name}': body starts with {found:?} instead of '+' or '-'")]
    CorruptedPayload {
        name: String,
        found: Option<char>,
    },
}
