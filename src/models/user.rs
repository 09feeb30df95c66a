use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A durable user profile kept in the key-value store under `user:<id>`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct StoredUserRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// The user handed over by the OAuth handshake on a fresh sign-in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl AuthUser {
    pub fn new(id: impl Into<String>) -> Self {
        AuthUser {
            id: id.into(),
            name: None,
            email: None,
            image: None,
        }
    }
}
