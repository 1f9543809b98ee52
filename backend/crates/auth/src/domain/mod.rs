//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the token
//! service contract.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::{refresh_token::RefreshToken, user::User};
pub use repository::{RefreshTokenRepository, UserRepository};
pub use token::{IssuedRefreshToken, TokenService};
