//! HTTP request handlers.

pub mod place_handler;
pub mod user_handler;

pub use place_handler::place_routes;
pub use user_handler::user_routes;
