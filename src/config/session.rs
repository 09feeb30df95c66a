use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thirty days, in seconds.
const DEFAULT_MAX_AGE: i64 = 30 * 24 * 60 * 60;

/// Settings for the JWT-backed session.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens.
    #[serde(default)]
    pub secret: String,
    /// Lifetime of a session token in seconds.
    #[serde(default = "default_max_age")]
    pub max_age: i64,
    /// Where failed sign-ins are sent.
    #[serde(default = "default_sign_in_page")]
    pub sign_in_page: String,
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_max_age() -> i64 {
    DEFAULT_MAX_AGE
}

fn default_sign_in_page() -> String {
    "/login".to_string()
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.secret.trim().is_empty() {
            return Err(Error::MissingCredential("SESSIONTRON_SECRET"));
        }
        if self.max_age <= 0 {
            return Err(Error::Config(format!(
                "session.max_age must be positive, got {}",
                self.max_age
            )));
        }
        Ok(())
    }
}
