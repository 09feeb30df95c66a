use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{user_key, UserStore};
use crate::error::{Error, Result};
use crate::kv::{KvClient, UpstashConfig};
use crate::models::StoredUserRecord;

/// User records read through the Upstash REST API.
pub struct UpstashStore {
    client: KvClient,
}

impl UpstashStore {
    pub fn new(config: &UpstashConfig) -> Self {
        UpstashStore {
            client: KvClient::new(config),
        }
    }
}

/// `GET` hands back either the stored JSON object or the raw string it was
/// written as; both decode to the same record.
fn decode_record(value: Value) -> Result<Option<StoredUserRecord>> {
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
        other => Err(Error::Store(format!(
            "unexpected user record shape: {}",
            other
        ))),
    }
}

#[async_trait]
impl UserStore for UpstashStore {
    fn get_name(&self) -> &str {
        "upstash"
    }

    async fn get_user(&self, id: &str) -> Result<Option<StoredUserRecord>> {
        let key = user_key(id);
        let value = self.client.get(&key).await?;
        let record = decode_record(value)?;
        debug!(key = key.as_str(), found = record.is_some(), "user record lookup");
        Ok(record)
    }
}
