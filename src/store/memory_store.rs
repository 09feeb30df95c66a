use std::collections::HashMap;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::UserStore;
use crate::error::Result;
use crate::models::StoredUserRecord;

/// Records served by the in-memory backend, listed in the config file.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone, Default)]
pub struct MemoryStoreConfig {
    #[serde(default)]
    pub users: Vec<StoredUserRecord>,
}

/// A fixed set of user records, for local development and tests.
pub struct MemoryStore {
    users: HashMap<String, StoredUserRecord>,
}

impl MemoryStore {
    pub fn new(users: Vec<StoredUserRecord>) -> Self {
        MemoryStore {
            users: users
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    fn get_name(&self) -> &str {
        "memory"
    }

    async fn get_user(&self, id: &str) -> Result<Option<StoredUserRecord>> {
        Ok(self.users.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = MemoryStore::default();
        assert_eq!(store.get_user("nobody").await.unwrap(), None);
    }
}
