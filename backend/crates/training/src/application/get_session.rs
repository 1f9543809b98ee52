//! Session Read Use Cases

use std::sync::Arc;

use kernel::id::{TrainingSessionId, UserId};

use super::parse_id;
use crate::domain::entities::{SetRecord, TrainingSession};
use crate::domain::repository::{SessionRepository, SetRecordRepository};
use crate::error::{TrainingError, TrainingResult};

/// Session together with its recorded sets
#[derive(Debug, Clone)]
pub struct SessionDetails {
    pub session: TrainingSession,
    pub sets: Vec<SetRecord>,
}

/// Get the caller's active session, if any
pub struct GetActiveSessionUseCase<R>
where
    R: SessionRepository,
{
    repo: Arc<R>,
}

impl<R> GetActiveSessionUseCase<R>
where
    R: SessionRepository + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> TrainingResult<Option<TrainingSession>> {
        self.repo.find_active_by_user(&user_id).await
    }
}

/// Get session input
pub struct GetSessionInput {
    pub user_id: UserId,
    pub session_id: String,
}

/// Get session use case
pub struct GetSessionUseCase<R>
where
    R: SessionRepository + SetRecordRepository,
{
    repo: Arc<R>,
}

impl<R> GetSessionUseCase<R>
where
    R: SessionRepository + SetRecordRepository + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: GetSessionInput) -> TrainingResult<SessionDetails> {
        let session_id: TrainingSessionId = parse_id(&input.session_id, "sessionId")?;

        let session = self
            .repo
            .find_by_id(&session_id)
            .await?
            .filter(|s| s.is_owned_by(input.user_id))
            .ok_or(TrainingError::NotFound)?;

        let sets = self.repo.list_by_session(&session.id).await?;

        Ok(SessionDetails { session, sets })
    }
}
