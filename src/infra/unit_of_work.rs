//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the atomic multi-record writes
//! that keep a place row and its owner's `place_ids` list consistent.
//! A concurrent reader must never observe a place without its owner's
//! reference, or the reference without the place; both writes therefore
//! run inside a single database transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{place, user};
use super::repositories::{PlaceRepository, PlaceStore, UserRepository, UserStore};
use crate::domain::Place;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories plus the atomic
/// dual-write operations spanning the places and users tables.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get place repository
    fn places(&self) -> Arc<dyn PlaceRepository>;

    /// Insert a place and append its id to the owner's place list.
    ///
    /// Either both records are committed or neither is visible.
    async fn create_place_with_owner(&self, place: Place) -> AppResult<Place>;

    /// Remove a place and drop its id from the owner's place list.
    ///
    /// Either both records are committed or neither is visible.
    async fn delete_place_with_owner(&self, place: Place) -> AppResult<()>;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction. The context borrows the transaction
/// to ensure proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    /// Get place repository for this transaction
    pub fn places(&self) -> TxPlaceRepository<'_> {
        TxPlaceRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    place_repo: Arc<PlaceStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let place_repo = Arc::new(PlaceStore::new(db.clone()));
        Self {
            db,
            user_repo,
            place_repo,
        }
    }

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Serializable isolation: two concurrent creates for the same owner
    /// must not lose a `place_ids` update to a write race.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&'a DatabaseTransaction) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        match f(&txn).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn places(&self) -> Arc<dyn PlaceRepository> {
        self.place_repo.clone()
    }

    async fn create_place_with_owner(&self, place: Place) -> AppResult<Place> {
        self.transaction(|txn| {
            Box::pin(async move {
                let ctx = TransactionContext::new(txn);
                let created = ctx.places().insert(place).await?;
                ctx.users().add_place(created.creator_id, created.id).await?;
                Ok(created)
            })
        })
        .await
    }

    async fn delete_place_with_owner(&self, place: Place) -> AppResult<()> {
        self.transaction(|txn| {
            Box::pin(async move {
                let ctx = TransactionContext::new(txn);
                ctx.places().remove(place.id).await?;
                ctx.users().remove_place(place.creator_id, place.id).await?;
                Ok(())
            })
        })
        .await
    }
}

/// Transaction-aware user repository.
///
/// Executes all operations within the provided transaction.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Append a place id to the owner's place list
    pub async fn add_place(&self, user_id: Uuid, place_id: Uuid) -> AppResult<()> {
        let owner = user::Entity::find_by_id(user_id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut place_ids = owner.place_ids.clone();
        place_ids.push(place_id);

        let mut active: user::ActiveModel = owner.into();
        active.place_ids = Set(place_ids);
        active.updated_at = Set(chrono::Utc::now());

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    /// Drop a place id from the owner's place list
    pub async fn remove_place(&self, user_id: Uuid, place_id: Uuid) -> AppResult<()> {
        let owner = user::Entity::find_by_id(user_id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut place_ids = owner.place_ids.clone();
        place_ids.retain(|id| *id != place_id);

        let mut active: user::ActiveModel = owner.into();
        active.place_ids = Set(place_ids);
        active.updated_at = Set(chrono::Utc::now());

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}

/// Transaction-aware place repository.
pub struct TxPlaceRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPlaceRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new place row
    pub async fn insert(&self, new_place: Place) -> AppResult<Place> {
        let model = place::ActiveModel::from(new_place)
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(Place::from(model))
    }

    /// Delete a place row
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let result = place::Entity::delete_by_id(id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
