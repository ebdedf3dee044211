//! CSRF protection.
//!
//! Double-submit scheme: `GET /api/csrf-token` sets an HTTP-only cookie
//! and returns the same value in the body; mutating requests outside the
//! users/places routers must echo it in the `x-csrf-token` header. The
//! users and places routers carry their own bearer-token protection and
//! are exempt.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{CSRF_COOKIE, CSRF_HEADER};
use crate::errors::AppError;

/// Body of the CSRF token endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// Issue a fresh CSRF token as cookie + body pair
pub async fn csrf_token(jar: CookieJar) -> (CookieJar, Json<CsrfTokenResponse>) {
    let token = Uuid::new_v4().simple().to_string();

    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .http_only(true)
        .path("/")
        .build();

    (jar.add(cookie), Json(CsrfTokenResponse { csrf_token: token }))
}

/// Reject mutating requests whose header token does not match the cookie
pub async fn csrf_middleware(
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !requires_csrf(request.method(), request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let cookie = jar
        .get(CSRF_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(AppError::Forbidden)?;

    let header = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Forbidden)?;

    if header != cookie {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Mutating methods need a token unless the route carries bearer auth
fn requires_csrf(method: &Method, path: &str) -> bool {
    let mutating = matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );

    mutating && !path.starts_with("/api/users") && !path.starts_with("/api/places")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_methods_never_require_a_token() {
        assert!(!requires_csrf(&Method::GET, "/api/other"));
        assert!(!requires_csrf(&Method::HEAD, "/api/other"));
        assert!(!requires_csrf(&Method::OPTIONS, "/api/other"));
    }

    #[test]
    fn users_and_places_routers_are_exempt() {
        assert!(!requires_csrf(&Method::POST, "/api/users/signup"));
        assert!(!requires_csrf(&Method::DELETE, "/api/places/123"));
    }

    #[test]
    fn other_mutating_routes_require_a_token() {
        assert!(requires_csrf(&Method::POST, "/api/other"));
        assert!(requires_csrf(&Method::PATCH, "/admin/thing"));
    }
}
