//! Service Container - Centralized service access.
//!
//! Wires concrete services from a database connection so the rest of the
//! application depends on service traits only.

use std::sync::Arc;

use super::{PlaceManager, PlaceService, TokenService, TokenSigner, UserManager, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Geocoder, GoogleGeocoder, ImageStore, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get place service
    fn places(&self) -> Arc<dyn PlaceService>;

    /// Get token service
    fn tokens(&self) -> Arc<dyn TokenService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    place_service: Arc<dyn PlaceService>,
    token_service: Arc<dyn TokenService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        user_service: Arc<dyn UserService>,
        place_service: Arc<dyn PlaceService>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            user_service,
            place_service,
            token_service,
        }
    }

    /// Create service container from a database connection and config.
    ///
    /// # Errors
    /// Fails when the geocoding HTTP client cannot be constructed.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: &Config,
        images: Arc<ImageStore>,
    ) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));
        let tokens: Arc<dyn TokenService> = Arc::new(TokenSigner::new(config));
        let geocoder: Arc<dyn Geocoder> = Arc::new(GoogleGeocoder::new(config)?);

        let user_service = Arc::new(UserManager::new(uow.clone(), tokens.clone()));
        let place_service = Arc::new(PlaceManager::new(uow, geocoder, images));

        Ok(Self {
            user_service,
            place_service,
            token_service: tokens,
        })
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn places(&self) -> Arc<dyn PlaceService> {
        self.place_service.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenService> {
        self.token_service.clone()
    }
}
