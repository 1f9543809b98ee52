//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, token contract
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations and the JWT token service
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Register / login with e-mail + password
//! - Short-lived HS256 access tokens (`Authorization: Bearer …`)
//! - Single-use refresh tokens with rotation
//! - Idempotent logout
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Refresh tokens stored only as SHA-256 fingerprints
//! - Rotation revokes conditionally, so concurrent reuse has one winner
//! - Unknown e-mail and wrong password are indistinguishable

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::repository::{RefreshTokenRepository, UserRepository};
pub use domain::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, JwtTokenService, PgAuthRepository};
pub use presentation::middleware::require_access_token;
pub use presentation::router::auth_router_generic;
