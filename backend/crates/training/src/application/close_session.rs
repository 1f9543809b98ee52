//! Finish / Abandon Session Use Cases
//!
//! Both transitions share one path: ownership check, then a conditional
//! write that only succeeds while the session is still active. Losing a
//! race to another close yields `SessionAlreadyClosed`.

use std::sync::Arc;

use audit::{AuditEntry, AuditSink, append_best_effort};
use chrono::Utc;
use kernel::id::{TrainingSessionId, UserId};
use platform::client::ClientInfo;
use serde_json::json;

use super::parse_id;
use crate::domain::entities::TrainingSession;
use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::SessionOutcome;
use crate::error::{TrainingError, TrainingResult};

/// Finish session input
pub struct FinishSessionInput {
    pub user_id: UserId,
    pub session_id: String,
    /// `None` keeps the current notes
    pub notes: Option<String>,
    pub client: ClientInfo,
}

/// Abandon session input
pub struct AbandonSessionInput {
    pub user_id: UserId,
    pub session_id: String,
    pub client: ClientInfo,
}

/// Finish session use case
pub struct FinishSessionUseCase<R, A>
where
    R: SessionRepository,
    A: AuditSink,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> FinishSessionUseCase<R, A>
where
    R: SessionRepository + Sync,
    A: AuditSink + Sync,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn execute(&self, input: FinishSessionInput) -> TrainingResult<TrainingSession> {
        close_session(
            self.repo.as_ref(),
            self.audit.as_ref(),
            CloseRequest {
                user_id: input.user_id,
                session_id: &input.session_id,
                outcome: SessionOutcome::Completed,
                notes: input.notes,
                client: &input.client,
            },
        )
        .await
    }
}

/// Abandon session use case
pub struct AbandonSessionUseCase<R, A>
where
    R: SessionRepository,
    A: AuditSink,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> AbandonSessionUseCase<R, A>
where
    R: SessionRepository + Sync,
    A: AuditSink + Sync,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn execute(&self, input: AbandonSessionInput) -> TrainingResult<TrainingSession> {
        close_session(
            self.repo.as_ref(),
            self.audit.as_ref(),
            CloseRequest {
                user_id: input.user_id,
                session_id: &input.session_id,
                outcome: SessionOutcome::Abandoned,
                notes: None,
                client: &input.client,
            },
        )
        .await
    }
}

struct CloseRequest<'a> {
    user_id: UserId,
    session_id: &'a str,
    outcome: SessionOutcome,
    notes: Option<String>,
    client: &'a ClientInfo,
}

async fn close_session<R, A>(
    repo: &R,
    audit: &A,
    request: CloseRequest<'_>,
) -> TrainingResult<TrainingSession>
where
    R: SessionRepository + Sync,
    A: AuditSink + Sync,
{
    let session_id: TrainingSessionId = parse_id(request.session_id, "sessionId")?;

    let mut session = repo
        .find_by_id(&session_id)
        .await?
        .filter(|s| s.is_owned_by(request.user_id))
        .ok_or(TrainingError::NotFound)?;

    if session.status.is_terminal() {
        return Err(TrainingError::SessionAlreadyClosed);
    }

    let finished_at = Utc::now();
    let closed = repo
        .close(
            &session.id,
            request.outcome,
            finished_at,
            request.notes.as_deref(),
        )
        .await?;

    if !closed {
        tracing::debug!(session_id = %session.id, "Lost close race");
        return Err(TrainingError::SessionAlreadyClosed);
    }

    session.apply_close(request.outcome, finished_at, request.notes);

    append_best_effort(
        audit,
        AuditEntry::new(session.user_id, "session", session.id, request.outcome.action())
            .with_data(json!({ "finishedAt": finished_at }))
            .with_client(request.client),
    )
    .await;

    tracing::info!(
        user_id = %session.user_id,
        session_id = %session.id,
        status = %session.status,
        "Training session closed"
    );

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SessionStatus;
    use crate::infra::InMemoryTrainingRepository;
    use audit::InMemoryAuditLog;

    async fn active_session(repo: &InMemoryTrainingRepository) -> TrainingSession {
        let user = UserId::new();
        let workout = repo.add_workout(Some(user), "Push").await;
        let session = TrainingSession::start(user, workout, Utc::now());
        repo.create(&session).await.unwrap();
        session
    }

    fn finish(session: &TrainingSession, notes: &str) -> FinishSessionInput {
        FinishSessionInput {
            user_id: session.user_id,
            session_id: session.id.to_string(),
            notes: Some(notes.to_string()),
            client: ClientInfo::default(),
        }
    }

    fn abandon(session: &TrainingSession) -> AbandonSessionInput {
        AbandonSessionInput {
            user_id: session.user_id,
            session_id: session.id.to_string(),
            client: ClientInfo::default(),
        }
    }

    #[tokio::test]
    async fn test_finish_is_absorbing() {
        let repo = Arc::new(InMemoryTrainingRepository::new());
        let audit = InMemoryAuditLog::new();
        let finish_uc = FinishSessionUseCase::new(repo.clone(), Arc::new(audit.clone()));
        let abandon_uc = AbandonSessionUseCase::new(repo.clone(), Arc::new(audit.clone()));
        let session = active_session(&repo).await;

        let finished = finish_uc.execute(finish(&session, "ok")).await.unwrap();
        assert_eq!(finished.status, SessionStatus::Completed);
        assert_eq!(finished.notes, "ok");
        assert!(finished.finished_at.is_some());

        assert!(matches!(
            finish_uc.execute(finish(&session, "again")).await,
            Err(TrainingError::SessionAlreadyClosed)
        ));
        assert!(matches!(
            abandon_uc.execute(abandon(&session)).await,
            Err(TrainingError::SessionAlreadyClosed)
        ));

        let stored = repo.find_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Completed);
        assert_eq!(stored.notes, "ok");
        assert_eq!(audit.event_names().await, vec!["session.completed"]);
    }

    #[tokio::test]
    async fn test_abandon() {
        let repo = Arc::new(InMemoryTrainingRepository::new());
        let audit = InMemoryAuditLog::new();
        let use_case = AbandonSessionUseCase::new(repo.clone(), Arc::new(audit.clone()));
        let session = active_session(&repo).await;

        let abandoned = use_case.execute(abandon(&session)).await.unwrap();
        assert_eq!(abandoned.status, SessionStatus::Abandoned);
        assert!(abandoned.notes.is_empty());
        assert!(repo.find_active_by_user(&session.user_id).await.unwrap().is_none());
        assert_eq!(audit.event_names().await, vec!["session.abandoned"]);
    }

    #[tokio::test]
    async fn test_foreign_session_is_not_found() {
        let repo = Arc::new(InMemoryTrainingRepository::new());
        let use_case = FinishSessionUseCase::new(repo.clone(), Arc::new(InMemoryAuditLog::new()));
        let session = active_session(&repo).await;

        let mut input = finish(&session, "");
        input.user_id = UserId::new();
        assert!(matches!(
            use_case.execute(input).await,
            Err(TrainingError::NotFound)
        ));

        let stored = repo.find_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Active);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_finish_and_abandon() {
        let repo = Arc::new(InMemoryTrainingRepository::new());
        let audit = InMemoryAuditLog::new();
        let finish_uc = FinishSessionUseCase::new(repo.clone(), Arc::new(audit.clone()));
        let abandon_uc = AbandonSessionUseCase::new(repo.clone(), Arc::new(audit.clone()));
        let session = active_session(&repo).await;

        let (finished, abandoned) = tokio::join!(
            finish_uc.execute(finish(&session, "race")),
            abandon_uc.execute(abandon(&session))
        );

        // Exactly one transition wins; the loser sees the session closed
        let winner = match (finished, abandoned) {
            (Ok(s), Err(TrainingError::SessionAlreadyClosed))
            | (Err(TrainingError::SessionAlreadyClosed), Ok(s)) => s,
            other => panic!("expected exactly one winner, got {other:?}"),
        };

        let stored = repo.find_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.status, winner.status);
        assert_eq!(audit.entries().await.len(), 1);
    }
}
