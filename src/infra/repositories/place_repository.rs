//! Place repository implementation.
//!
//! Writes that must stay consistent with the owning user's place list
//! (insert, remove) are not exposed here; they live on the Unit of Work
//! so they always run inside one transaction.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::place::{self, ActiveModel, Entity as PlaceEntity};
use crate::domain::Place;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Place repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Find place by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Place>>;

    /// Find all places owned by the given user
    async fn find_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Place>>;

    /// Persist the editable fields of an existing place
    async fn update(&self, place: Place) -> AppResult<Place>;
}

/// Concrete implementation of PlaceRepository
pub struct PlaceStore {
    db: DatabaseConnection,
}

impl PlaceStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlaceRepository for PlaceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Place>> {
        let result = PlaceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Place::from))
    }

    async fn find_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Place>> {
        let models = PlaceEntity::find()
            .filter(place::Column::CreatorId.eq(creator_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Place::from).collect())
    }

    async fn update(&self, place: Place) -> AppResult<Place> {
        let existing = PlaceEntity::find_by_id(place.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(place.title);
        active.description = Set(place.description);
        active.updated_at = Set(place.updated_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Place::from(model))
    }
}
