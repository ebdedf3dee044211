//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{place_handler, user_handler};
use crate::api::middleware::csrf::CsrfTokenResponse;
use crate::domain::{Coordinates, PlaceResponse, UserResponse};
use crate::services::AuthSession;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Placez API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Placez API",
        version = "0.1.0",
        description = "REST API for the places listing application",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        // User endpoints
        user_handler::list_users,
        user_handler::signup,
        user_handler::login,
        // Place endpoints
        place_handler::get_place,
        place_handler::get_places_by_user,
        place_handler::create_place,
        place_handler::update_place,
        place_handler::delete_place,
    ),
    components(
        schemas(
            // Domain types
            Coordinates,
            UserResponse,
            PlaceResponse,
            AuthSession,
            MessageResponse,
            CsrfTokenResponse,
            // Request types
            user_handler::SignupRequest,
            user_handler::LoginRequest,
            place_handler::CreatePlaceRequest,
            place_handler::UpdatePlaceRequest,
            // Envelopes
            user_handler::UsersEnvelope,
            place_handler::PlaceEnvelope,
            place_handler::PlacesEnvelope,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login, and user listing"),
        (name = "Places", description = "Place management operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/users/login"))
                        .build(),
                ),
            );
        }
    }
}
