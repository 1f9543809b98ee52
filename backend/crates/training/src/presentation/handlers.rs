//! HTTP Handlers
//!
//! Every route expects a `CurrentUser` placed in the request extensions by
//! the access-token middleware.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use audit::AuditSink;
use kernel::context::CurrentUser;
use kernel::extract::JsonBody;
use kernel::response::Envelope;
use platform::client::ClientInfo;

use crate::application::{
    AbandonSessionInput, AbandonSessionUseCase, FinishSessionInput, FinishSessionUseCase,
    GetActiveSessionUseCase, GetSessionInput, GetSessionUseCase, RecordSetInput,
    RecordSetUseCase, StartSessionInput, StartSessionUseCase,
};
use crate::domain::repository::{
    ExerciseRepository, SessionRepository, SetRecordRepository, WorkoutRepository,
};
use crate::error::TrainingResult;
use crate::presentation::dto::{
    FinishSessionRequest, RecordSetRequest, SessionDetailResponse, SessionResponse,
    SetRecordResponse, StartSessionRequest,
};

/// Capability set the training handlers need from a repository
pub trait TrainingRepository:
    WorkoutRepository + ExerciseRepository + SessionRepository + SetRecordRepository
{
}

impl<T> TrainingRepository for T where
    T: WorkoutRepository + ExerciseRepository + SessionRepository + SetRecordRepository
{
}

/// Shared state for training handlers
pub struct TrainingAppState<R, A>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub audit: Arc<A>,
}

impl<R, A> Clone for TrainingAppState<R, A>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            audit: self.audit.clone(),
        }
    }
}

/// POST /sessions
pub async fn start_session<R, A>(
    State(state): State<TrainingAppState<R, A>>,
    current_user: CurrentUser,
    client: ClientInfo,
    JsonBody(req): JsonBody<StartSessionRequest>,
) -> TrainingResult<impl IntoResponse>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = StartSessionUseCase::new(state.repo.clone(), state.audit.clone());

    let session = use_case
        .execute(StartSessionInput {
            user_id: current_user.user_id,
            workout_id: req.workout_id,
            client,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Envelope::new(SessionResponse::from(session)),
    ))
}

/// POST /sessions/{id}/sets
pub async fn record_set<R, A>(
    State(state): State<TrainingAppState<R, A>>,
    current_user: CurrentUser,
    client: ClientInfo,
    Path(session_id): Path<String>,
    JsonBody(req): JsonBody<RecordSetRequest>,
) -> TrainingResult<impl IntoResponse>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = RecordSetUseCase::new(state.repo.clone(), state.audit.clone());

    let record = use_case
        .execute(RecordSetInput {
            user_id: current_user.user_id,
            session_id,
            exercise_id: req.exercise_id,
            set_number: req.set_number,
            weight: req.weight,
            reps: req.reps,
            status: req.status,
            client,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Envelope::new(SetRecordResponse::from(record)),
    ))
}

/// PATCH /sessions/{id}/finish
pub async fn finish_session<R, A>(
    State(state): State<TrainingAppState<R, A>>,
    current_user: CurrentUser,
    client: ClientInfo,
    Path(session_id): Path<String>,
    JsonBody(req): JsonBody<FinishSessionRequest>,
) -> TrainingResult<Envelope<SessionResponse>>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = FinishSessionUseCase::new(state.repo.clone(), state.audit.clone());

    let session = use_case
        .execute(FinishSessionInput {
            user_id: current_user.user_id,
            session_id,
            notes: req.notes,
            client,
        })
        .await?;

    Ok(Envelope::new(session.into()))
}

/// PATCH /sessions/{id}/abandon
pub async fn abandon_session<R, A>(
    State(state): State<TrainingAppState<R, A>>,
    current_user: CurrentUser,
    client: ClientInfo,
    Path(session_id): Path<String>,
) -> TrainingResult<Envelope<SessionResponse>>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = AbandonSessionUseCase::new(state.repo.clone(), state.audit.clone());

    let session = use_case
        .execute(AbandonSessionInput {
            user_id: current_user.user_id,
            session_id,
            client,
        })
        .await?;

    Ok(Envelope::new(session.into()))
}

/// GET /sessions/active
pub async fn get_active_session<R, A>(
    State(state): State<TrainingAppState<R, A>>,
    current_user: CurrentUser,
) -> TrainingResult<Envelope<Option<SessionResponse>>>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = GetActiveSessionUseCase::new(state.repo.clone());
    let session = use_case.execute(current_user.user_id).await?;

    Ok(Envelope::new(session.map(Into::into)))
}

/// GET /sessions/{id}
pub async fn get_session<R, A>(
    State(state): State<TrainingAppState<R, A>>,
    current_user: CurrentUser,
    Path(session_id): Path<String>,
) -> TrainingResult<Envelope<SessionDetailResponse>>
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = GetSessionUseCase::new(state.repo.clone());
    let details = use_case
        .execute(GetSessionInput {
            user_id: current_user.user_id,
            session_id,
        })
        .await?;

    Ok(Envelope::new(details.into()))
}
