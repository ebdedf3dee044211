//! Place service - creation, editing, deletion, and lookups.
//!
//! Mutations check existence before ownership, and the create/delete
//! paths go through the Unit of Work's atomic dual writes so a place and
//! its owner's reference list can never diverge.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Place;
use crate::errors::{AppError, AppResult};
use crate::infra::{Geocoder, ImageStore, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Place service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PlaceService: Send + Sync {
    /// Create a place owned by `creator_id` at the geocoded address
    async fn create(
        &self,
        title: String,
        description: String,
        address: String,
        creator_id: Uuid,
        image_path: String,
    ) -> AppResult<Place>;

    /// Update a place's title and description; owner only
    async fn update(
        &self,
        place_id: Uuid,
        title: String,
        description: String,
        requester_id: Uuid,
    ) -> AppResult<Place>;

    /// Delete a place and its owner's reference; owner only
    async fn delete(&self, place_id: Uuid, requester_id: Uuid) -> AppResult<()>;

    /// Fetch a single place
    async fn get_by_id(&self, place_id: Uuid) -> AppResult<Place>;

    /// Fetch all places owned by a user
    async fn get_by_user(&self, user_id: Uuid) -> AppResult<Vec<Place>>;
}

/// Concrete implementation of PlaceService using Unit of Work.
pub struct PlaceManager<U: UnitOfWork> {
    uow: Arc<U>,
    geocoder: Arc<dyn Geocoder>,
    images: Arc<ImageStore>,
}

impl<U: UnitOfWork> PlaceManager<U> {
    /// Create new place service instance
    pub fn new(uow: Arc<U>, geocoder: Arc<dyn Geocoder>, images: Arc<ImageStore>) -> Self {
        Self {
            uow,
            geocoder,
            images,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> PlaceService for PlaceManager<U> {
    async fn create(
        &self,
        title: String,
        description: String,
        address: String,
        creator_id: Uuid,
        image_path: String,
    ) -> AppResult<Place> {
        // Resolve coordinates first; an unknown address persists nothing
        let location = self.geocoder.resolve(&address).await?;

        let creator = self
            .uow
            .users()
            .find_by_id(creator_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let place = Place::new(title, description, address, location, image_path, creator.id);
        self.uow.create_place_with_owner(place).await
    }

    async fn update(
        &self,
        place_id: Uuid,
        title: String,
        description: String,
        requester_id: Uuid,
    ) -> AppResult<Place> {
        // Existence first, ownership second
        let mut place = self
            .uow
            .places()
            .find_by_id(place_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if place.creator_id != requester_id {
            return Err(AppError::Forbidden);
        }

        place.edit(title, description);
        self.uow.places().update(place).await
    }

    async fn delete(&self, place_id: Uuid, requester_id: Uuid) -> AppResult<()> {
        // Existence first, ownership second
        let place = self
            .uow
            .places()
            .find_by_id(place_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if place.creator_id != requester_id {
            return Err(AppError::Forbidden);
        }

        let image_path = place.image_path.clone();
        self.uow.delete_place_with_owner(place).await?;

        // Best-effort cleanup; a stale file never fails the delete
        self.images.remove(&image_path).await;
        Ok(())
    }

    async fn get_by_id(&self, place_id: Uuid) -> AppResult<Place> {
        self.uow
            .places()
            .find_by_id(place_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn get_by_user(&self, user_id: Uuid) -> AppResult<Vec<Place>> {
        let places = self.uow.places().find_by_creator(user_id).await?;

        // The SPA relies on a 404 to render its empty state
        if places.is_empty() {
            return Err(AppError::NotFound);
        }

        Ok(places)
    }
}
