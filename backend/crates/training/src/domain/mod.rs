//! Training Domain Layer

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{Exercise, SetRecord, TrainingSession, Workout};
pub use repository::{
    ExerciseRepository, SessionRepository, SetRecordRepository, WorkoutRepository,
};
pub use value_objects::{SessionOutcome, SessionStatus, SetMeasurement, SetStatus};
