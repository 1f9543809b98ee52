//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed entity IDs shared by every bounded context
//! - The authenticated caller placed on each request
//! - The JSON request/response envelope used by the HTTP surface
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod context;
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod response;
