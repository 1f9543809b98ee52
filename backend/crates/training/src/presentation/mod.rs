//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{TrainingAppState, TrainingRepository};
pub use router::training_router_generic;
