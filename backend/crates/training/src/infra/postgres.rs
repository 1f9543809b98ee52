//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{ExerciseId, SetRecordId, TrainingSessionId, UserId, WorkoutId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{SetRecord, TrainingSession};
use crate::domain::repository::{
    ExerciseRepository, SessionRepository, SetRecordRepository, WorkoutRepository,
};
use crate::domain::value_objects::{SessionOutcome, SessionStatus, SetStatus};
use crate::error::{TrainingError, TrainingResult, is_unique_violation};

/// PostgreSQL-backed training repository
#[derive(Clone)]
pub struct PgTrainingRepository {
    pool: PgPool,
}

impl PgTrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Library Predicates
// ============================================================================

impl WorkoutRepository for PgTrainingRepository {
    async fn is_owned_by(&self, workout_id: &WorkoutId, user_id: &UserId) -> TrainingResult<bool> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM workouts WHERE id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(workout_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(owned)
    }
}

impl ExerciseRepository for PgTrainingRepository {
    async fn is_attached_to_workout(
        &self,
        exercise_id: &ExerciseId,
        workout_id: &WorkoutId,
    ) -> TrainingResult<bool> {
        let attached = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM workout_exercises
                WHERE workout_id = $1 AND exercise_id = $2
            )
            "#,
        )
        .bind(workout_id.as_uuid())
        .bind(exercise_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(attached)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgTrainingRepository {
    async fn create(&self, session: &TrainingSession) -> TrainingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id,
                user_id,
                workout_id,
                status,
                notes,
                started_at,
                finished_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.workout_id.as_uuid())
        .bind(session.status.as_str())
        .bind(&session.notes)
        .bind(session.started_at)
        .bind(session.finished_at)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // sessions_one_active_per_user
            if is_unique_violation(&e) {
                TrainingError::ActiveSessionExists
            } else {
                TrainingError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &TrainingSessionId) -> TrainingResult<Option<TrainingSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id,
                user_id,
                workout_id,
                status,
                notes,
                started_at,
                finished_at,
                created_at,
                updated_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> TrainingResult<Option<TrainingSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id,
                user_id,
                workout_id,
                status,
                notes,
                started_at,
                finished_at,
                created_at,
                updated_at
            FROM sessions
            WHERE user_id = $1 AND status = 'active'
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn close(
        &self,
        id: &TrainingSessionId,
        outcome: SessionOutcome,
        finished_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> TrainingResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET status = $2,
                finished_at = $3,
                notes = COALESCE($4, notes),
                updated_at = $3
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(id.as_uuid())
        .bind(outcome.status().as_str())
        .bind(finished_at)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

// ============================================================================
// Set Record Repository Implementation
// ============================================================================

impl SetRecordRepository for PgTrainingRepository {
    async fn exists(
        &self,
        session_id: &TrainingSessionId,
        exercise_id: &ExerciseId,
        set_number: i32,
    ) -> TrainingResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM set_records
                WHERE session_id = $1 AND exercise_id = $2 AND set_number = $3
            )
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(exercise_id.as_uuid())
        .bind(set_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_for_active_session(&self, record: &SetRecord) -> TrainingResult<bool> {
        // FOR SHARE blocks a concurrent close until this insert commits, and
        // re-checks the status if a close committed first.
        let result = sqlx::query(
            r#"
            INSERT INTO set_records (
                id,
                session_id,
                exercise_id,
                set_number,
                weight,
                reps,
                status,
                recorded_at
            )
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE EXISTS (
                SELECT 1 FROM sessions
                WHERE id = $2 AND status = 'active'
                FOR SHARE
            )
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.session_id.as_uuid())
        .bind(record.exercise_id.as_uuid())
        .bind(record.set_number)
        .bind(record.weight_grams)
        .bind(record.reps)
        .bind(record.status.as_str())
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // set_records_session_exercise_set_key
            if is_unique_violation(&e) {
                TrainingError::SetAlreadyRecorded
            } else {
                TrainingError::Database(e)
            }
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_by_session(
        &self,
        session_id: &TrainingSessionId,
    ) -> TrainingResult<Vec<SetRecord>> {
        let rows = sqlx::query_as::<_, SetRecordRow>(
            r#"
            SELECT
                id,
                session_id,
                exercise_id,
                set_number,
                weight,
                reps,
                status,
                recorded_at
            FROM set_records
            WHERE session_id = $1
            ORDER BY exercise_id, set_number
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SetRecordRow::into_set_record).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    workout_id: Uuid,
    status: String,
    notes: String,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> TrainingResult<TrainingSession> {
        Ok(TrainingSession {
            id: TrainingSessionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            workout_id: WorkoutId::from_uuid(self.workout_id),
            status: self.status.parse::<SessionStatus>()?,
            notes: self.notes,
            started_at: self.started_at,
            finished_at: self.finished_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SetRecordRow {
    id: Uuid,
    session_id: Uuid,
    exercise_id: Uuid,
    set_number: i32,
    weight: i32,
    reps: i32,
    status: String,
    recorded_at: DateTime<Utc>,
}

impl SetRecordRow {
    fn into_set_record(self) -> TrainingResult<SetRecord> {
        let status = SetStatus::parse(&self.status)
            .map_err(|_| TrainingError::Internal(format!("unknown set status: {}", self.status)))?;

        Ok(SetRecord {
            id: SetRecordId::from_uuid(self.id),
            session_id: TrainingSessionId::from_uuid(self.session_id),
            exercise_id: ExerciseId::from_uuid(self.exercise_id),
            set_number: self.set_number,
            weight_grams: self.weight,
            reps: self.reps,
            status,
            recorded_at: self.recorded_at,
        })
    }
}
