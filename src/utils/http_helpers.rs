use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;
use http::request::Parts;
use serde_json::json;

use super::cookies::SESSION_COOKIE_NAME;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }
}

/// Converts our `HTTPError` into a JSON `{"error": ...}` response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// The raw session JWT of a request, if it carries one.
///
/// An `Authorization: Bearer` header wins over the session cookie.
pub struct SessionJwt(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for SessionJwt
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, credentials)| credentials.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if bearer.is_some() {
            return Ok(SessionJwt(bearer));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        Ok(SessionJwt(
            jar.get(SESSION_COOKIE_NAME)
                .map(|cookie| cookie.value().to_string()),
        ))
    }
}
