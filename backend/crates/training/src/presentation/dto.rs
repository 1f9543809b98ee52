//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{ExerciseId, SetRecordId, TrainingSessionId, WorkoutId};
use serde::{Deserialize, Serialize};

use crate::application::SessionDetails;
use crate::domain::entities::{SetRecord, TrainingSession};
use crate::domain::value_objects::{SessionStatus, SetStatus};

/// POST /sessions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub workout_id: String,
}

/// POST /sessions/{id}/sets
///
/// `weight` is in grams.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetRequest {
    pub exercise_id: String,
    pub set_number: i64,
    pub weight: i64,
    pub reps: i64,
    pub status: String,
}

/// PATCH /sessions/{id}/finish
#[derive(Debug, Deserialize)]
pub struct FinishSessionRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: TrainingSessionId,
    pub workout_id: WorkoutId,
    pub status: SessionStatus,
    pub notes: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<TrainingSession> for SessionResponse {
    fn from(session: TrainingSession) -> Self {
        Self {
            id: session.id,
            workout_id: session.workout_id,
            status: session.status,
            notes: session.notes,
            started_at: session.started_at,
            finished_at: session.finished_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecordResponse {
    pub id: SetRecordId,
    pub session_id: TrainingSessionId,
    pub exercise_id: ExerciseId,
    pub set_number: i32,
    pub weight: i32,
    pub reps: i32,
    pub status: SetStatus,
    pub recorded_at: DateTime<Utc>,
}

impl From<SetRecord> for SetRecordResponse {
    fn from(record: SetRecord) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            exercise_id: record.exercise_id,
            set_number: record.set_number,
            weight: record.weight_grams,
            reps: record.reps,
            status: record.status,
            recorded_at: record.recorded_at,
        }
    }
}

/// Session with its sets
#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub sets: Vec<SetRecordResponse>,
}

impl From<SessionDetails> for SessionDetailResponse {
    fn from(details: SessionDetails) -> Self {
        Self {
            session: details.session.into(),
            sets: details.sets.into_iter().map(Into::into).collect(),
        }
    }
}
