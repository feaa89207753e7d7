use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// Never set, removed, or past its TTL. Callers cannot tell which.
    #[error("key not found")]
    NotFound,
    #[error("cached payload is not a tip record: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode tip record: {0}")]
    Encode(#[source] serde_json::Error),
}
