use crate::error::CacheError;
use crate::record::TipRecord;
use crate::store::ExpiringStore;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Sentinel key for the one record the relay tracks.
pub const CURRENT_KEY: &str = "current";

/// Typed access to the current tip record.
///
/// Records cross the store boundary as serialized JSON, so the writer and the
/// readers never share a record value.
#[derive(Clone)]
pub struct TipService {
    store: Arc<ExpiringStore>,
    ttl: Duration,
}

impl TipService {
    pub fn new(store: Arc<ExpiringStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Replace the current record and restart its time-to-live.
    pub fn store_tip(&self, record: &TipRecord) -> Result<(), CacheError> {
        let payload = serde_json::to_vec(record).map_err(CacheError::Encode)?;
        self.store.set(CURRENT_KEY, payload, self.ttl);
        debug!("cached tip record for {}", record.time);

        Ok(())
    }

    pub fn current_tip(&self) -> Result<TipRecord, CacheError> {
        let cached = self.store.get(CURRENT_KEY)?;

        serde_json::from_slice(&cached).map_err(CacheError::Corrupt)
    }

    pub fn store(&self) -> &Arc<ExpiringStore> {
        &self.store
    }
}
