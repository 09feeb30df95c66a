use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{memory_store::MemoryStore, upstash_store::UpstashStore};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::models::StoredUserRecord;

/// Key under which a user's record is stored.
pub fn user_key(id: &str) -> String {
    format!("user:{}", id)
}

/// Read access to durable user records.
///
/// `Ok(None)` means the store answered and holds no record; a failed lookup
/// is always an `Err`.
#[async_trait]
pub trait UserStore: Send + Sync {
    fn get_name(&self) -> &str;
    async fn get_user(&self, id: &str) -> Result<Option<StoredUserRecord>>;
}

/// Creates a concrete store implementation based on the StoreConfig.
pub fn create_store(config: &StoreConfig) -> Arc<dyn UserStore> {
    match config {
        StoreConfig::Upstash(cfg) => {
            info!("Using Upstash user store.");
            Arc::new(UpstashStore::new(cfg))
        }
        StoreConfig::Memory(cfg) => {
            info!(
                "Using in-memory user store with {} record(s).",
                cfg.users.len()
            );
            Arc::new(MemoryStore::new(cfg.users.clone()))
        }
    }
}
