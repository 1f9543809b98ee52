//! Training Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{ExerciseId, SetRecordId, TrainingSessionId, UserId, WorkoutId};

use super::value_objects::{SessionOutcome, SessionStatus, SetMeasurement, SetStatus};

/// Workout from the exercise library
///
/// `user_id` is `None` for shared templates.
#[derive(Debug, Clone)]
pub struct Workout {
    pub id: WorkoutId,
    pub user_id: Option<UserId>,
    pub name: String,
}

impl Workout {
    pub fn new(user_id: Option<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: WorkoutId::new(),
            user_id,
            name: name.into(),
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Exercise from the exercise library
#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ExerciseId::new(),
            name: name.into(),
        }
    }
}

/// A user's run through one workout
#[derive(Debug, Clone)]
pub struct TrainingSession {
    pub id: TrainingSessionId,
    pub user_id: UserId,
    pub workout_id: WorkoutId,
    pub status: SessionStatus,
    pub notes: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrainingSession {
    /// New active session with empty notes
    pub fn start(user_id: UserId, workout_id: WorkoutId, now: DateTime<Utc>) -> Self {
        Self {
            id: TrainingSessionId::new(),
            user_id,
            workout_id,
            status: SessionStatus::Active,
            notes: String::new(),
            started_at: now,
            finished_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Mirror a transition the repository already committed.
    pub fn apply_close(
        &mut self,
        outcome: SessionOutcome,
        finished_at: DateTime<Utc>,
        notes: Option<String>,
    ) {
        self.status = outcome.status();
        self.finished_at = Some(finished_at);
        self.updated_at = finished_at;
        if let Some(notes) = notes {
            self.notes = notes;
        }
    }
}

/// One recorded set; immutable once stored
#[derive(Debug, Clone)]
pub struct SetRecord {
    pub id: SetRecordId,
    pub session_id: TrainingSessionId,
    pub exercise_id: ExerciseId,
    pub set_number: i32,
    pub weight_grams: i32,
    pub reps: i32,
    pub status: SetStatus,
    pub recorded_at: DateTime<Utc>,
}

impl SetRecord {
    pub fn new(
        session_id: TrainingSessionId,
        exercise_id: ExerciseId,
        measurement: SetMeasurement,
        status: SetStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SetRecordId::new(),
            session_id,
            exercise_id,
            set_number: measurement.set_number,
            weight_grams: measurement.weight_grams,
            reps: measurement.reps,
            status,
            recorded_at: now,
        }
    }

    /// Uniqueness key within a session
    pub fn slot(&self) -> (TrainingSessionId, ExerciseId, i32) {
        (self.session_id, self.exercise_id, self.set_number)
    }
}
