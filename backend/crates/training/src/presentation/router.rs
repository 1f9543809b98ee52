//! Training Router

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use audit::AuditSink;

use crate::presentation::handlers::{self, TrainingAppState, TrainingRepository};

/// Create a generic Training router for any repository implementation
///
/// Routes are unauthenticated on their own; the caller layers the
/// access-token middleware on top.
pub fn training_router_generic<R, A>(repo: R, audit: A) -> Router
where
    R: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let state = TrainingAppState {
        repo: Arc::new(repo),
        audit: Arc::new(audit),
    };

    Router::new()
        .route("/sessions", post(handlers::start_session::<R, A>))
        .route("/sessions/active", get(handlers::get_active_session::<R, A>))
        .route("/sessions/{id}", get(handlers::get_session::<R, A>))
        .route("/sessions/{id}/sets", post(handlers::record_set::<R, A>))
        .route("/sessions/{id}/finish", patch(handlers::finish_session::<R, A>))
        .route("/sessions/{id}/abandon", patch(handlers::abandon_session::<R, A>))
        .with_state(state)
}
