use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::auth::google::GoogleConfig;
use crate::error::Result;

/// OAuth providers the service can sign users in with.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct OAuthConfig {
    pub google: GoogleConfig,
}

impl OAuthConfig {
    pub fn validate(&self) -> Result<()> {
        self.google.validate()
    }
}
