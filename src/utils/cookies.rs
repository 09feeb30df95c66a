use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::config::SessionConfig;

pub const SESSION_COOKIE_NAME: &str = "sessiontron.session-token";
pub const STATE_COOKIE_NAME: &str = "sessiontron.state";

/// How long a sign-in attempt may take before its state cookie lapses.
const STATE_TTL_MINUTES: i64 = 10;

/// Cookie carrying the signed session token.
pub fn session_cookie(jwt: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, jwt))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(config.max_age))
        .build()
}

/// Removal cookie for the session.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Cookie remembering the OAuth `state` sent to the provider.
pub fn state_cookie(state: String, secure: bool) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE_NAME, state))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::minutes(STATE_TTL_MINUTES))
        .build()
}

/// Removal cookie for the OAuth `state`.
pub fn clear_state_cookie() -> Cookie<'static> {
    Cookie::build((STATE_COOKIE_NAME, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
