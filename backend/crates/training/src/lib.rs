//! Training Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Session State Machine
//! - `active` -> `completed` (finish) or `abandoned` (abandon), exactly once
//! - At most one active session per user
//! - Sets are accepted only while the session is active, once per
//!   (session, exercise, set number)
//!
//! ## Ownership Model
//! - The caller's id comes from the access token, never from the body
//! - A session owned by someone else is reported as not found

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::{
    ExerciseRepository, SessionRepository, SetRecordRepository, WorkoutRepository,
};
pub use error::{TrainingError, TrainingResult};
pub use infra::{InMemoryTrainingRepository, PgTrainingRepository};
pub use presentation::{TrainingRepository, training_router_generic};
