//! API middleware.

pub mod auth;
pub mod csrf;

pub use auth::CurrentUser;
pub use csrf::{csrf_middleware, csrf_token};
