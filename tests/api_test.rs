//! API-shape tests.
//!
//! These tests pin the wire contract: error status codes, `{message}`
//! error bodies, and the envelope/field names the front end depends on.

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use placez::domain::{Coordinates, Place, PlaceResponse};
use placez::errors::AppError;
use placez::services::AuthSession;
use placez::types::MessageResponse;

async fn response_parts(error: AppError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn error_statuses_match_the_wire_contract() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (
            AppError::conflict("User"),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            AppError::validation("Title is required"),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (AppError::AddressNotFound, StatusCode::UNPROCESSABLE_ENTITY),
        (
            AppError::internal("boom"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let (status, _) = response_parts(error).await;
        assert_eq!(status, expected);
    }
}

#[tokio::test]
async fn error_bodies_are_message_objects() {
    let (_, body) = response_parts(AppError::validation("Title is required")).await;
    assert_eq!(body["message"], "Title is required");

    let (_, body) = response_parts(AppError::conflict("User")).await;
    assert_eq!(body["message"], "User already exists");

    // Internal detail never reaches the client
    let (_, body) = response_parts(AppError::internal("connection pool exhausted")).await;
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn invalid_credentials_uses_a_single_uniform_message() {
    let (status, body) = response_parts(AppError::InvalidCredentials).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials, could not log you in");
}

#[test]
fn auth_session_serializes_to_the_expected_field_names() {
    let session = AuthSession {
        user_id: Uuid::new_v4(),
        email: "a@b.com".to_string(),
        token: "signed".to_string(),
    };

    let value = serde_json::to_value(&session).unwrap();
    assert!(value.get("userId").is_some());
    assert_eq!(value["email"], "a@b.com");
    assert_eq!(value["token"], "signed");
    assert!(value.get("user_id").is_none());
}

#[test]
fn place_envelope_carries_public_field_names() {
    let place = Place::new(
        "Cafe".to_string(),
        "Nice spot downtown".to_string(),
        "1600 Amphitheatre Pkwy, Mountain View, CA".to_string(),
        Coordinates {
            lat: 37.4224,
            lng: -122.0841,
        },
        "uploads/images/cafe.png".to_string(),
        Uuid::new_v4(),
    );

    let value = serde_json::to_value(PlaceResponse::from(place)).unwrap();
    for field in ["id", "title", "description", "address", "location", "image", "creator"] {
        assert!(value.get(field).is_some(), "missing field {}", field);
    }
}

#[test]
fn message_response_shape() {
    let value = serde_json::to_value(MessageResponse::new("Deleted place")).unwrap();
    assert_eq!(value["message"], "Deleted place");
}
