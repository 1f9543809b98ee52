//! Repository Traits
//!
//! Terminal transitions and set inserts are conditional writes: they report
//! whether this call effected the change, so concurrent requests cannot both
//! win.

use chrono::{DateTime, Utc};
use kernel::id::{ExerciseId, TrainingSessionId, UserId, WorkoutId};

use super::entities::{SetRecord, TrainingSession};
use super::value_objects::SessionOutcome;
use crate::error::TrainingResult;

/// Ownership predicate over the workout library
#[trait_variant::make(WorkoutRepository: Send)]
pub trait LocalWorkoutRepository {
    /// Workout exists and belongs to the user
    async fn is_owned_by(&self, workout_id: &WorkoutId, user_id: &UserId) -> TrainingResult<bool>;
}

/// Attachment predicate over the exercise library
#[trait_variant::make(ExerciseRepository: Send)]
pub trait LocalExerciseRepository {
    async fn is_attached_to_workout(
        &self,
        exercise_id: &ExerciseId,
        workout_id: &WorkoutId,
    ) -> TrainingResult<bool>;
}

#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Fails with `ActiveSessionExists` if the user already has one
    async fn create(&self, session: &TrainingSession) -> TrainingResult<()>;

    async fn find_by_id(&self, id: &TrainingSessionId) -> TrainingResult<Option<TrainingSession>>;

    async fn find_active_by_user(&self, user_id: &UserId)
    -> TrainingResult<Option<TrainingSession>>;

    /// Move an active session into `outcome`.
    ///
    /// Returns `false` when the session was no longer active. `notes` of
    /// `None` keeps the stored notes.
    async fn close(
        &self,
        id: &TrainingSessionId,
        outcome: SessionOutcome,
        finished_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> TrainingResult<bool>;
}

#[trait_variant::make(SetRecordRepository: Send)]
pub trait LocalSetRecordRepository {
    async fn exists(
        &self,
        session_id: &TrainingSessionId,
        exercise_id: &ExerciseId,
        set_number: i32,
    ) -> TrainingResult<bool>;

    /// Insert while the owning session is still active.
    ///
    /// Returns `false` if the session left `active` first; fails with
    /// `SetAlreadyRecorded` on a duplicate slot.
    async fn create_for_active_session(&self, record: &SetRecord) -> TrainingResult<bool>;

    /// Ordered by (exercise, set number)
    async fn list_by_session(&self, session_id: &TrainingSessionId)
    -> TrainingResult<Vec<SetRecord>>;
}
