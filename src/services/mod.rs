//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and receive the requesting user's identity as
//! an explicit parameter rather than ambient request state.

pub mod container;
mod place_service;
mod token_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use place_service::{PlaceManager, PlaceService};
pub use token_service::{Claims, TokenService, TokenSigner};
pub use user_service::{AuthSession, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use place_service::MockPlaceService;
#[cfg(any(test, feature = "test-utils"))]
pub use token_service::MockTokenService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
