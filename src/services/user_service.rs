//! User service - registration, login, and user listing.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::services::TokenService;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authenticated session returned after signup or login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Id of the authenticated user
    pub user_id: Uuid,
    /// Email bound to the token
    pub email: String,
    /// Signed bearer token
    pub token: String,
}

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user and issue a session token
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        image_path: String,
    ) -> AppResult<AuthSession>;

    /// Authenticate an existing user and issue a session token
    async fn login(&self, email: String, password: String) -> AppResult<AuthSession>;

    /// List all users. Password hashes never leave the domain entity's
    /// serialization boundary.
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<dyn TokenService>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance
    pub fn new(uow: Arc<U>, tokens: Arc<dyn TokenService>) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        image_path: String,
    ) -> AppResult<AuthSession> {
        // Field shape is validated at the handler boundary; the email
        // uniqueness invariant is enforced here, before any write
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(User::new(name, email, password_hash, image_path))
            .await?;

        let token = self.tokens.issue(user.id, &user.email)?;
        Ok(AuthSession {
            user_id: user.id,
            email: user.email,
            token,
        })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthSession> {
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        // Unknown email and wrong password must be indistinguishable
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        let user = user_result.unwrap();
        let token = self.tokens.issue(user.id, &user.email)?;
        Ok(AuthSession {
            user_id: user.id,
            email: user.email,
            token,
        })
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }
}
