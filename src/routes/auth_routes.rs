//! Sign-in, callback, session and sign-out handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::jwt::{decode_token, encode_token};
use crate::auth::{materialize, on_redirect};
use crate::error::{Error, Result};
use crate::models::{Session, Token};
use crate::state::AppState;
use crate::utils::cookies::{
    clear_session_cookie, clear_state_cookie, session_cookie, state_cookie, STATE_COOKIE_NAME,
};
use crate::utils::http_helpers::{HTTPError, SessionJwt};

/// Registers the authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signin", get(sign_in))
        .route("/api/auth/callback/google", get(callback))
        .route("/api/auth/session", get(session))
        .route("/api/auth/signout", post(sign_out))
}

#[derive(Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Starts the OAuth handshake by sending the browser to Google.
async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
) -> std::result::Result<(CookieJar, Redirect), HTTPError> {
    let csrf = Uuid::new_v4().to_string();
    let url = state.google.authorization_url(&csrf).map_err(|e| {
        error!("Cannot build authorization URL: {}", e);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in unavailable")
    })?;

    let jar = jar.add(state_cookie(csrf, state.config.session.secure_cookies));
    Ok((jar, Redirect::to(&url)))
}

/// Completes the handshake: exchange, profile, first reconciliation, cookie.
async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> (CookieJar, Redirect) {
    let expected_state = jar
        .get(STATE_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(clear_state_cookie());

    match complete_sign_in(&state, &query, expected_state.as_deref()).await {
        Ok(jwt) => {
            let jar = jar.add(session_cookie(jwt, &state.config.session));
            (jar, Redirect::to(on_redirect()))
        }
        Err(e) => {
            warn!("Sign-in callback failed: {}", e);
            let target = format!("{}?error=Callback", state.config.session.sign_in_page);
            (jar, Redirect::to(&target))
        }
    }
}

async fn complete_sign_in(
    state: &AppState,
    query: &CallbackQuery,
    expected_state: Option<&str>,
) -> Result<String> {
    if let Some(reason) = &query.error {
        return Err(Error::OAuth {
            operation: "authorization",
            detail: reason.clone(),
        });
    }
    match (query.state.as_deref(), expected_state) {
        (Some(received), Some(expected)) if received == expected => {}
        _ => {
            return Err(Error::OAuth {
                operation: "state check",
                detail: "state does not match the sign-in request".to_string(),
            })
        }
    }
    let code = query.code.as_deref().ok_or_else(|| Error::OAuth {
        operation: "authorization",
        detail: "missing authorization code".to_string(),
    })?;

    let access_token = state.google.exchange_code(code).await?;
    let user = state.google.fetch_profile(&access_token).await?;
    let token = state
        .reconciler
        .reconcile(Token::from_profile(&user), Some(&user))
        .await?;

    info!(user_id = token.id.as_deref().unwrap_or_default(), "user signed in");
    encode_token(&token, &state.config.session)
}

/// Returns the current session, refreshing the token from the store first.
///
/// Requests without a usable token get an empty object.
async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
    SessionJwt(jwt): SessionJwt,
) -> std::result::Result<Response, HTTPError> {
    let session_config = &state.config.session;
    let Some(jwt) = jwt else {
        return Ok(Json(json!({})).into_response());
    };
    let token = match decode_token(&jwt, session_config) {
        Ok(token) => token,
        Err(e) => {
            debug!("Ignoring unusable session token: {}", e);
            return Ok(Json(json!({})).into_response());
        }
    };

    let token = state.reconciler.reconcile(token, None).await.map_err(|e| {
        error!("Session refresh failed: {}", e);
        HTTPError::new(StatusCode::UNAUTHORIZED, "Authentication failed")
    })?;
    let refreshed = encode_token(&token, session_config).map_err(|e| {
        error!("Cannot sign refreshed session token: {}", e);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Session unavailable")
    })?;

    let session = materialize(
        Session::for_token(&token, session_config.max_age),
        Some(&token),
    );
    let jar = jar.add(session_cookie(refreshed, session_config));
    Ok((jar, Json(session)).into_response())
}

/// Drops the session cookie.
async fn sign_out(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(clear_session_cookie()), Redirect::to(on_redirect()))
}
