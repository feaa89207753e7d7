use crate::error::CacheError;
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};

struct Entry {
    key: String,
    payload: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory store holding at most one entry with a time-to-live.
///
/// Writing any key replaces whatever was stored before. An entry past its
/// expiration instant reads as absent even if the reaper has not run yet.
#[derive(Default)]
pub struct ExpiringStore {
    slot: RwLock<Option<Entry>>,
}

impl ExpiringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `payload` under `key`, expiring `ttl` from now.
    pub fn set(&self, key: &str, payload: Vec<u8>, ttl: Duration) {
        let entry = Entry {
            key: key.to_string(),
            payload,
            expires_at: Instant::now() + ttl,
        };

        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }

    pub fn get(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);

        match slot.as_ref() {
            Some(entry) if entry.key == key && entry.is_live(Instant::now()) => {
                Ok(entry.payload.clone())
            }
            _ => Err(CacheError::NotFound),
        }
    }

    pub fn remove(&self, key: &str) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|entry| entry.key == key) {
            *slot = None;
        }
    }

    /// Drop the entry if it has expired. Returns true when something was discarded.
    pub fn purge_expired(&self) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(entry) if !entry.is_live(Instant::now()) => {
                debug!("purging expired entry {}", entry.key);
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Periodically reclaim the expired entry. The task ends once the store is dropped.
    pub fn spawn_reaper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut gc_interval = time::interval(every);
            // The first tick completes immediately.
            gc_interval.tick().await;

            loop {
                gc_interval.tick().await;
                match store.upgrade() {
                    Some(store) => {
                        store.purge_expired();
                    }
                    None => break,
                }
            }
        })
    }

    #[cfg(test)]
    fn is_occupied(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
