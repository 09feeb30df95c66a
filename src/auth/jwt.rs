use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::models::Token;

#[derive(Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    token: Token,
    iat: i64,
    exp: i64,
}

/// Sign a token into the HS256 JWT carried by the session cookie.
pub fn encode_token(token: &Token, config: &SessionConfig) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        token: token.clone(),
        iat: now,
        exp: now + config.max_age,
    };
    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
    Ok(encode(&Header::default(), &claims, &encoding_key)?)
}

/// Verify signature and expiry, returning the carried token.
pub fn decode_token(jwt: &str, config: &SessionConfig) -> Result<Token> {
    let mut validation = Validation::default();
    validation.validate_aud = false;

    let data = decode::<SessionClaims>(
        jwt,
        &DecodingKey::from_secret(config.secret.as_ref()),
        &validation,
    )?;
    Ok(data.claims.token)
}
