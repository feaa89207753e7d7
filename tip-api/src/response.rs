use serde::Serialize;
use tip_cache::TipRecord;

/// Static provenance attached to every served record.
#[derive(Debug, Clone, Serialize)]
pub struct Annotations {
    pub repository: String,
    pub author: String,
    pub language: String,
    pub subscribed_to: String,
}

impl Annotations {
    /// Provenance for this build, relaying the feed at `subscribed_to`.
    pub fn new(subscribed_to: impl Into<String>) -> Self {
        Self {
            repository: env!("CARGO_PKG_REPOSITORY").to_string(),
            author: env!("CARGO_PKG_AUTHORS").to_string(),
            language: "Rust".to_string(),
            subscribed_to: subscribed_to.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TipResponse {
    #[serde(flatten)]
    pub record: TipRecord,
    pub annotations: Annotations,
}
