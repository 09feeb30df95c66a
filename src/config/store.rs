use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kv::UpstashConfig;
use crate::store::memory_store::MemoryStoreConfig;

/// The user record backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
#[serde(tag = "type")]
pub enum StoreConfig {
    #[serde(rename = "upstash")]
    Upstash(UpstashConfig),
    #[serde(rename = "memory")]
    Memory(MemoryStoreConfig),
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            StoreConfig::Upstash(cfg) => {
                if cfg.url.trim().is_empty() {
                    return Err(Error::MissingCredential("UPSTASH_REDIS_REST_URL"));
                }
                if cfg.token.trim().is_empty() {
                    return Err(Error::MissingCredential("UPSTASH_REDIS_REST_TOKEN"));
                }
                Ok(())
            }
            StoreConfig::Memory(_) => Ok(()),
        }
    }
}
