//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::JwtTokenService;
pub use memory::InMemoryAuthRepository;
pub use postgres::PgAuthRepository;
