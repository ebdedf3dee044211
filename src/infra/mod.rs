//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Unit of Work for transaction management
//! - Geocoding client
//! - Uploaded image storage

pub mod db;
pub mod geocoder;
pub mod repositories;
pub mod unit_of_work;
pub mod uploads;

pub use db::{Database, Migrator};
pub use geocoder::{Geocoder, GoogleGeocoder};
pub use repositories::{PlaceRepository, PlaceStore, UserRepository, UserStore};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
pub use uploads::ImageStore;

#[cfg(any(test, feature = "test-utils"))]
pub use geocoder::MockGeocoder;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockPlaceRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
