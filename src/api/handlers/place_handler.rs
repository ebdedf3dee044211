//! Place handlers: lookups, creation, editing, and deletion.

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{format_validation_errors, UploadForm, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::MAX_UPLOAD_BYTES;
use crate::domain::PlaceResponse;
use crate::errors::{AppError, AppResult};
use crate::types::MessageResponse;

/// Place creation request assembled from the multipart form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Empire State Building")]
    pub title: String,
    #[validate(length(min = 4, message = "Description must be at least 4 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "20 W 34th St, New York, NY 10001")]
    pub address: String,
}

/// Place update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 4, message = "Description must be at least 4 characters"))]
    pub description: String,
}

/// Single place envelope, `{"place": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceEnvelope {
    pub place: PlaceResponse,
}

/// Listing envelope, `{"places": [...]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct PlacesEnvelope {
    pub places: Vec<PlaceResponse>,
}

/// Create place routes.
///
/// The mutating handlers take a [`CurrentUser`] argument, which is the
/// auth gate: extraction rejects the request before the handler runs.
pub fn place_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_place))
        .route(
            "/:pid",
            get(get_place).patch(update_place).delete(delete_place),
        )
        .route("/user/:uid", get(get_places_by_user))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Fetch a single place
#[utoipa::path(
    get,
    path = "/api/places/{pid}",
    tag = "Places",
    params(("pid" = Uuid, Path, description = "Place id")),
    responses(
        (status = 200, description = "The place", body = PlaceEnvelope),
        (status = 404, description = "No place with this id")
    )
)]
pub async fn get_place(
    State(state): State<AppState>,
    Path(pid): Path<Uuid>,
) -> AppResult<Json<PlaceEnvelope>> {
    let place = state.place_service.get_by_id(pid).await?;
    Ok(Json(PlaceEnvelope {
        place: place.into(),
    }))
}

/// Fetch all places owned by a user
#[utoipa::path(
    get,
    path = "/api/places/user/{uid}",
    tag = "Places",
    params(("uid" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user's places", body = PlacesEnvelope),
        (status = 404, description = "No places for this user")
    )
)]
pub async fn get_places_by_user(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> AppResult<Json<PlacesEnvelope>> {
    let places = state.place_service.get_by_user(uid).await?;
    Ok(Json(PlacesEnvelope {
        places: places.into_iter().map(PlaceResponse::from).collect(),
    }))
}

/// Create a new place
#[utoipa::path(
    post,
    path = "/api/places",
    tag = "Places",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Place created", body = PlaceEnvelope),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Validation error or address not found")
    )
)]
pub async fn create_place(
    State(state): State<AppState>,
    user: CurrentUser,
    form: UploadForm,
) -> AppResult<(StatusCode, Json<PlaceEnvelope>)> {
    let request = CreatePlaceRequest {
        title: form.text("title")?,
        description: form.text("description")?,
        address: form.text("address")?,
    };
    request
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let image = form.image()?;
    let image_path = state.images.save(&image.content_type, &image.data).await?;

    match state
        .place_service
        .create(
            request.title,
            request.description,
            request.address,
            user.id,
            image_path.clone(),
        )
        .await
    {
        Ok(place) => Ok((
            StatusCode::CREATED,
            Json(PlaceEnvelope {
                place: place.into(),
            }),
        )),
        Err(e) => {
            // The file was already written; clean it up best-effort
            state.images.remove(&image_path).await;
            Err(e)
        }
    }
}

/// Update a place's title and description
#[utoipa::path(
    patch,
    path = "/api/places/{pid}",
    tag = "Places",
    security(("bearer_auth" = [])),
    params(("pid" = Uuid, Path, description = "Place id")),
    request_body = UpdatePlaceRequest,
    responses(
        (status = 200, description = "Updated place", body = PlaceEnvelope),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No place with this id")
    )
)]
pub async fn update_place(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(pid): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePlaceRequest>,
) -> AppResult<Json<PlaceEnvelope>> {
    let place = state
        .place_service
        .update(pid, payload.title, payload.description, user.id)
        .await?;

    Ok(Json(PlaceEnvelope {
        place: place.into(),
    }))
}

/// Delete a place
#[utoipa::path(
    delete,
    path = "/api/places/{pid}",
    tag = "Places",
    security(("bearer_auth" = [])),
    params(("pid" = Uuid, Path, description = "Place id")),
    responses(
        (status = 200, description = "Place deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No place with this id")
    )
)]
pub async fn delete_place(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(pid): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.place_service.delete(pid, user.id).await?;
    Ok(Json(MessageResponse::new("Deleted place")))
}
