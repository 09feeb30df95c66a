use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::token::Token;

/// The user fields the rest of the application sees.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A per-request projection of the current token. Never persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    /// RFC 3339 expiry of the underlying session token.
    pub expires: String,
}

impl Session {
    pub fn new(user: Option<SessionUser>, expires: DateTime<Utc>) -> Self {
        Session {
            user,
            expires: expires.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// The default session for a token: profile fields only, no id.
    pub fn for_token(token: &Token, max_age: i64) -> Self {
        let user = SessionUser {
            id: None,
            name: token.name.clone(),
            email: token.email.clone(),
            image: token.picture.clone(),
        };
        Session::new(Some(user), Utc::now() + Duration::seconds(max_age))
    }
}
