//! User handlers: listing, signup, and login.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{format_validation_errors, UploadForm, ValidatedJson};
use crate::api::AppState;
use crate::config::{MAX_UPLOAD_BYTES, TOKEN_COOKIE};
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::AuthSession;

/// Signup request assembled from the multipart form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "SecurePass123!", min_length = 6)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Listing envelope, `{"users": [...]}`
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct UsersEnvelope {
    pub users: Vec<UserResponse>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 201, description = "List of users without credentials", body = UsersEnvelope),
        (status = 422, description = "Fetching users failed")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<UsersEnvelope>)> {
    let users = state.user_service.list_users().await?;

    // The SPA expects 201 from this endpoint
    Ok((
        StatusCode::CREATED,
        Json(UsersEnvelope {
            users: users.into_iter().map(UserResponse::from).collect(),
        }),
    ))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users/signup",
    tag = "Users",
    responses(
        (status = 201, description = "User registered", body = AuthSession),
        (status = 422, description = "Validation error or email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    form: UploadForm,
) -> AppResult<(CookieJar, (StatusCode, Json<AuthSession>))> {
    let request = SignupRequest {
        name: form.text("name")?,
        email: form.text("email")?,
        password: form.text("password")?,
    };
    request
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    // Fields are valid; now the file write is worth doing
    let image = form.image()?;
    let image_path = state.images.save(&image.content_type, &image.data).await?;

    match state
        .user_service
        .register(request.name, request.email, request.password, image_path.clone())
        .await
    {
        Ok(session) => {
            let jar = jar.add(auth_cookie(session.token.clone()));
            Ok((jar, (StatusCode::CREATED, Json(session))))
        }
        Err(e) => {
            // The file was already written; clean it up best-effort
            state.images.remove(&image_path).await;
            Err(e)
        }
    }
}

/// Login and get a session token
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthSession),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthSession>)> {
    let session = state
        .user_service
        .login(payload.email, payload.password)
        .await?;

    let jar = jar.add(auth_cookie(session.token.clone()));
    Ok((jar, Json(session)))
}

/// Build the HTTP-only session cookie
fn auth_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .path("/")
        .build()
}
