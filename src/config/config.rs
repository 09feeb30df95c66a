use figment::providers::{Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::oauth::OAuthConfig;
use super::session::SessionConfig;
use super::store::StoreConfig;
use crate::error::{Error, Result};

/// Environment variables that override a value from the config file.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("UPSTASH_REDIS_REST_URL", "store.url"),
    ("UPSTASH_REDIS_REST_TOKEN", "store.token"),
    ("GOOGLE_CLIENT_ID", "oauth.google.client_id"),
    ("GOOGLE_CLIENT_SECRET", "oauth.google.client_secret"),
    ("SESSIONTRON_SECRET", "session.secret"),
];

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct ConfigV1 {
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub oauth: OAuthConfig,
    pub session: SessionConfig,
}

impl ConfigV1 {
    /// Checks every section once, so handlers never re-validate credentials.
    pub fn validate(&self) -> Result<()> {
        self.logging.level_filter()?;
        self.store.validate()?;
        self.oauth.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

/// Layers every set variable of `ENV_OVERRIDES` over `figment`.
///
/// Values are merged as plain strings. Secrets such as `123456` or `[abc]`
/// must not be reinterpreted as numbers or sequences.
fn merge_env_overrides(mut figment: Figment) -> Figment {
    for (var, path) in ENV_OVERRIDES {
        if let Ok(value) = std::env::var(var) {
            figment = figment.merge(Serialized::default(*path, value));
        }
    }
    figment
}

/// Extract and validate a configuration from an assembled figment.
pub fn config_from_figment(figment: Figment) -> Result<ConfigV1> {
    let config = figment
        .extract::<Config>()
        .map_err(|e| Error::Config(e.to_string()))?;
    let config = match config {
        Config::ConfigV1(c) => c,
    };
    config.validate()?;
    Ok(config)
}

/// Load config from a YAML file, with environment variables taking precedence.
pub fn load_config(path: &str) -> Result<ConfigV1> {
    config_from_figment(merge_env_overrides(Figment::new().merge(Yaml::file(path))))
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<()> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
