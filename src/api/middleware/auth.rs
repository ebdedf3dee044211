//! Authentication gate.
//!
//! Protected handlers take a [`CurrentUser`] argument; extraction fails
//! the request with 401 before the handler body runs. The token may
//! arrive as an `Authorization: Bearer` header or as the HTTP-only
//! `token` cookie, and is always cryptographically verified before any
//! claim is trusted. CORS preflights are answered by the `CorsLayer` and
//! never reach the gate.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, TOKEN_COOKIE};
use crate::errors::AppError;

/// Authenticated user extracted from a verified token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = bearer_token(&parts.headers)
            .or_else(|| jar.get(TOKEN_COOKIE).map(|c| c.value().to_owned()))
            .ok_or(AppError::Unauthorized)?;

        let claims = state.tokens.verify(&token)?;

        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_strips_the_scheme_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_absence() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);
    }
}
