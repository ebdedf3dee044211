//! Application route configuration.

use std::path::Path;

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{place_routes, user_routes};
use super::middleware::{csrf_middleware, csrf_token};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Uploaded images are public, the SPA bundle is the catch-all
    let uploads = ServeDir::new(&state.config.upload_dir);
    let spa = ServeDir::new(&state.config.static_dir).not_found_service(ServeFile::new(
        Path::new(&state.config.static_dir).join("index.html"),
    ));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/csrf-token", get(csrf_token))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/users", user_routes())
        .nest("/api/places", place_routes())
        .nest_service("/uploads/images", uploads)
        .fallback_service(spa)
        // Global middleware; CORS sits outside CSRF so preflights never
        // hit the token check
        .layer(middleware::from_fn(csrf_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                error: Some(e.to_string()),
            }),
        ),
    }
}
