use std::fmt;

use reqwest::header::CACHE_CONTROL;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Connection settings for the Upstash REST endpoint.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct UpstashConfig {
    /// Base REST URL, e.g. `https://eu1-example.upstash.io`.
    #[serde(default)]
    pub url: String,
    /// Bearer token sent with every command.
    #[serde(default)]
    pub token: String,
}

/// The read-only commands the client is allowed to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Zrange,
    Sismember,
    Smembers,
    Get,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Zrange => "zrange",
            Command::Sismember => "sismember",
            Command::Smembers => "smembers",
            Command::Get => "get",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positional command argument. Arguments are placed in the request path
/// verbatim, so they must not contain `/` or other path-breaking characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Int(i64),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(value.into())
    }
}

/// Issues commands against the store's REST API.
///
/// Every call is a single GET with no retry; timeouts are whatever the
/// underlying `reqwest` client enforces.
#[derive(Clone)]
pub struct KvClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl KvClient {
    pub fn new(config: &UpstashConfig) -> Self {
        info!("Creating key-value client for '{}'", config.url);
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// `{base}/{command}/{arg1}/{arg2}/...`, arguments left unencoded.
    pub fn command_url(&self, command: Command, args: &[Arg]) -> String {
        let mut url = format!("{}/{}", self.base_url, command);
        for arg in args {
            url.push('/');
            url.push_str(&arg.to_string());
        }
        url
    }

    /// Runs `command` and returns the `result` field of the response body.
    ///
    /// A non-success status comes back as [`Error::Store`] carrying the
    /// status text.
    pub async fn fetch(&self, command: Command, args: &[Arg]) -> Result<Value> {
        let url = self.command_url(command, args);
        debug!(command = command.as_str(), "Sending key-value request to: {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            warn!(
                command = command.as_str(),
                status = status.as_u16(),
                "key-value command failed: {}",
                status_text
            );
            return Err(Error::Store(status_text));
        }

        let mut body: Value = response.json().await?;
        if let Some(err) = body.get("error").and_then(Value::as_str) {
            return Err(Error::Store(err.to_string()));
        }
        Ok(body
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// `GET key`.
    pub async fn get(&self, key: &str) -> Result<Value> {
        self.fetch(Command::Get, &[key.into()]).await
    }

    /// `SMEMBERS key`.
    pub async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let value = self.fetch(Command::Smembers, &[key.into()]).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `SISMEMBER key member`; the store answers `1` or `0`.
    pub async fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        let value = self
            .fetch(Command::Sismember, &[key.into(), member.into()])
            .await?;
        Ok(matches!(value.as_i64(), Some(n) if n != 0))
    }

    /// `ZRANGE key start stop`.
    pub async fn zrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let value = self
            .fetch(Command::Zrange, &[key.into(), start.into(), stop.into()])
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
