use serde::{Deserialize, Serialize};

use super::user::{AuthUser, StoredUserRecord};

/// The identity payload persisted between requests inside the session JWT.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Token {
    /// Absent until the first reconciliation assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl Token {
    /// The token the OAuth handshake produces before any reconciliation.
    pub fn from_profile(user: &AuthUser) -> Self {
        Token {
            id: None,
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.image.clone(),
        }
    }

    /// A token built solely from a stored record; `image` becomes `picture`.
    pub fn from_record(record: &StoredUserRecord) -> Self {
        Token {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            email: record.email.clone(),
            picture: record.image.clone(),
        }
    }
}
