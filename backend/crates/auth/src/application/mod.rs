//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod token_pair;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginUseCase};
pub use logout::{LogoutInput, LogoutUseCase};
pub use refresh_token::{RefreshTokenInput, RefreshTokenUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token_pair::TokenPair;
