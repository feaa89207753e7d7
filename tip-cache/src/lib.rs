mod error;
mod record;
mod service;
mod store;

pub use error::CacheError;
pub use record::TipRecord;
pub use service::{CURRENT_KEY, TipService};
pub use store::ExpiringStore;
