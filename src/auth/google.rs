use reqwest::Url;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::AuthUser;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const GOOGLE_SCOPES: &str = "openid email profile";

/// The config needed for the Google OAuth provider.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Must match the redirect URI registered with Google.
    pub redirect_uri: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
}

fn default_auth_url() -> String {
    GOOGLE_AUTH_URL.to_string()
}

fn default_token_url() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

fn default_userinfo_url() -> String {
    GOOGLE_USERINFO_URL.to_string()
}

impl GoogleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::MissingCredential("GOOGLE_CLIENT_ID"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(Error::MissingCredential("GOOGLE_CLIENT_SECRET"));
        }
        for (field, value) in [
            ("redirect_uri", &self.redirect_uri),
            ("auth_url", &self.auth_url),
            ("token_url", &self.token_url),
            ("userinfo_url", &self.userinfo_url),
        ] {
            Url::parse(value).map_err(|e| {
                Error::Config(format!("oauth.google.{} '{}': {}", field, value, e))
            })?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google's userinfo payload. The OpenID endpoint names the id `sub`,
/// the legacy v2 endpoint `id`.
#[derive(Deserialize)]
struct GoogleProfile {
    #[serde(alias = "id")]
    sub: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl From<GoogleProfile> for AuthUser {
    fn from(profile: GoogleProfile) -> Self {
        AuthUser {
            id: profile.sub,
            name: profile.name,
            email: profile.email,
            image: profile.picture,
        }
    }
}

/// Talks to Google's authorization, token and userinfo endpoints.
pub struct GoogleProvider {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(config: &GoogleConfig) -> Self {
        info!("Creating Google OAuth provider for client '{}'", config.client_id);
        Self {
            config: config.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// The URL the browser is sent to, carrying `state` for CSRF protection.
    pub fn authorization_url(&self, state: &str) -> Result<String> {
        let mut url = Url::parse(&self.config.auth_url)
            .map_err(|e| Error::Config(format!("oauth.google.auth_url: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", GOOGLE_SCOPES)
            .append_pair("state", state);
        Ok(url.into())
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String> {
        debug!("Exchanging authorization code at '{}'", self.config.token_url);
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;
        let response = ensure_success(response, "token exchange").await?;
        let body: TokenResponse = response.json().await?;
        Ok(body.access_token)
    }

    /// Fetch the signed-in user's profile.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<AuthUser> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;
        let response = ensure_success(response, "userinfo request").await?;
        let profile: GoogleProfile = response.json().await?;
        Ok(profile.into())
    }
}

async fn ensure_success(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Error::OAuth {
        operation,
        detail: format!("{}: {}", status, body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_config(base: &str) -> GoogleConfig {
        GoogleConfig {
            client_id: "google-id".to_string(),
            client_secret: "google-secret".to_string(),
            redirect_uri: "http://localhost:3000/api/auth/callback/google".to_string(),
            auth_url: format!("{}/o/oauth2/v2/auth", base),
            token_url: format!("{}/token", base),
            userinfo_url: format!("{}/userinfo", base),
        }
    }

    #[test]
    fn test_validate_requires_client_id_first() {
        let mut config = test_config("https://accounts.example.com");
        config.client_id.clear();
        config.client_secret.clear();
        assert!(matches!(
            config.validate(),
            Err(Error::MissingCredential("GOOGLE_CLIENT_ID"))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_redirect_uri() {
        let mut config = test_config("https://accounts.example.com");
        config.redirect_uri = "not a url".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_authorization_url_contains_parameters() {
        let provider = GoogleProvider::new(&test_config("https://accounts.example.com"));
        let url = provider.authorization_url("abc123").unwrap();

        assert!(url.starts_with("https://accounts.example.com/o/oauth2/v2/auth?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=google-id"));
        assert!(url.contains("state=abc123"));
        assert!(url.contains("scope=openid+email+profile"));
    }

    #[tokio::test]
    async fn test_exchange_code_and_fetch_profile() {
        let mut server = Server::new_async().await;
        let token = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "auth-code".into()),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("client_secret".into(), "google-secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "access-1", "token_type": "Bearer"}"#)
            .create_async()
            .await;
        let userinfo = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer access-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sub": "u1", "name": "User One", "email": "u1@example.com", "picture": "u1.png"}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(&server.url()));
        let access_token = provider.exchange_code("auth-code").await.unwrap();
        let user = provider.fetch_profile(&access_token).await.unwrap();

        token.assert_async().await;
        userinfo.assert_async().await;
        assert_eq!(user.id, "u1");
        assert_eq!(user.image.as_deref(), Some("u1.png"));
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(&server.url()));
        let result = provider.exchange_code("bad-code").await;
        m.assert_async().await;
        assert!(matches!(result, Err(Error::OAuth { .. })));
    }
}
