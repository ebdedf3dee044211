//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, ImageStore};
use crate::services::{PlaceService, ServiceContainer, Services, TokenService, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Place service
    pub place_service: Arc<dyn PlaceService>,
    /// Token service (used by the auth gate)
    pub tokens: Arc<dyn TokenService>,
    /// Uploaded image store
    pub images: Arc<ImageStore>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// # Errors
    /// Fails when the geocoding HTTP client cannot be constructed.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let images = Arc::new(ImageStore::new(&config.upload_dir));
        let container = Services::from_connection(database.get_connection(), &config, images.clone())?;

        Ok(Self {
            user_service: container.users(),
            place_service: container.places(),
            tokens: container.tokens(),
            images,
            database,
            config,
        })
    }
}
