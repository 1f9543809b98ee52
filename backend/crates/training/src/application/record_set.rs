//! Record Set Use Case

use std::sync::Arc;

use audit::{AuditEntry, AuditSink, append_best_effort};
use chrono::Utc;
use kernel::id::{ExerciseId, TrainingSessionId, UserId};
use platform::client::ClientInfo;
use serde_json::json;

use super::parse_id;
use crate::domain::entities::SetRecord;
use crate::domain::repository::{ExerciseRepository, SessionRepository, SetRecordRepository};
use crate::domain::value_objects::{SetMeasurement, SetStatus};
use crate::error::{TrainingError, TrainingResult};

/// Record set input
///
/// Numbers arrive unvalidated; weight is in grams.
pub struct RecordSetInput {
    pub user_id: UserId,
    pub session_id: String,
    pub exercise_id: String,
    pub set_number: i64,
    pub weight: i64,
    pub reps: i64,
    pub status: String,
    pub client: ClientInfo,
}

/// Record set use case
pub struct RecordSetUseCase<R, A>
where
    R: SessionRepository + ExerciseRepository + SetRecordRepository,
    A: AuditSink,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> RecordSetUseCase<R, A>
where
    R: SessionRepository + ExerciseRepository + SetRecordRepository + Sync,
    A: AuditSink + Sync,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn execute(&self, input: RecordSetInput) -> TrainingResult<SetRecord> {
        let session_id: TrainingSessionId = parse_id(&input.session_id, "sessionId")?;
        let exercise_id: ExerciseId = parse_id(&input.exercise_id, "exerciseId")?;
        let measurement = SetMeasurement::new(input.set_number, input.weight, input.reps)?;
        let status = SetStatus::parse(&input.status)?;

        let session = self
            .repo
            .find_by_id(&session_id)
            .await?
            .filter(|s| s.is_owned_by(input.user_id))
            .ok_or(TrainingError::NotFound)?;

        if !session.is_active() {
            return Err(TrainingError::SessionNotActive);
        }

        if !self
            .repo
            .is_attached_to_workout(&exercise_id, &session.workout_id)
            .await?
        {
            return Err(TrainingError::ExerciseNotFound);
        }

        if self
            .repo
            .exists(&session_id, &exercise_id, measurement.set_number)
            .await?
        {
            return Err(TrainingError::SetAlreadyRecorded);
        }

        let record = SetRecord::new(session_id, exercise_id, measurement, status, Utc::now());

        // Duplicate slots surface as SetAlreadyRecorded from the unique key
        if !self.repo.create_for_active_session(&record).await? {
            return Err(TrainingError::SessionNotActive);
        }

        append_best_effort(
            self.audit.as_ref(),
            AuditEntry::new(session.user_id, "set_record", record.id, "created")
                .with_data(json!({
                    "sessionId": record.session_id,
                    "exerciseId": record.exercise_id,
                    "setNumber": record.set_number,
                    "weight": record.weight_grams,
                    "reps": record.reps,
                    "status": record.status,
                }))
                .with_client(&input.client),
        )
        .await;

        tracing::debug!(
            session_id = %record.session_id,
            exercise_id = %record.exercise_id,
            set_number = record.set_number,
            "Set recorded"
        );

        Ok(record)
    }
}
