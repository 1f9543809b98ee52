//! Start Session Use Case

use std::sync::Arc;

use audit::{AuditEntry, AuditSink, append_best_effort};
use chrono::Utc;
use kernel::id::{UserId, WorkoutId};
use platform::client::ClientInfo;
use serde_json::json;

use super::parse_id;
use crate::domain::entities::TrainingSession;
use crate::domain::repository::{SessionRepository, WorkoutRepository};
use crate::error::{TrainingError, TrainingResult};

/// Start session input
pub struct StartSessionInput {
    pub user_id: UserId,
    pub workout_id: String,
    pub client: ClientInfo,
}

/// Start session use case
pub struct StartSessionUseCase<R, A>
where
    R: WorkoutRepository + SessionRepository,
    A: AuditSink,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> StartSessionUseCase<R, A>
where
    R: WorkoutRepository + SessionRepository + Sync,
    A: AuditSink + Sync,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn execute(&self, input: StartSessionInput) -> TrainingResult<TrainingSession> {
        let workout_id: WorkoutId = parse_id(&input.workout_id, "workoutId")?;

        if !self.repo.is_owned_by(&workout_id, &input.user_id).await? {
            return Err(TrainingError::WorkoutNotFound);
        }

        if self.repo.find_active_by_user(&input.user_id).await?.is_some() {
            return Err(TrainingError::ActiveSessionExists);
        }

        let session = TrainingSession::start(input.user_id, workout_id, Utc::now());
        // The unique index on active sessions catches a concurrent start
        self.repo.create(&session).await?;

        append_best_effort(
            self.audit.as_ref(),
            AuditEntry::new(session.user_id, "session", session.id, "created")
                .with_data(json!({
                    "workoutId": session.workout_id,
                    "startedAt": session.started_at,
                }))
                .with_client(&input.client),
        )
        .await;

        tracing::info!(
            user_id = %session.user_id,
            session_id = %session.id,
            workout_id = %session.workout_id,
            "Training session started"
        );

        Ok(session)
    }
}
