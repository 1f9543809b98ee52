//! In-memory Repository Implementation
//!
//! One mutex guards the whole store, so the conditional close and the
//! active-session check inside set inserts are atomic, matching the
//! PostgreSQL contracts.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{ExerciseId, TrainingSessionId, UserId, WorkoutId};
use tokio::sync::Mutex;

use crate::domain::entities::{Exercise, SetRecord, TrainingSession, Workout};
use crate::domain::repository::{
    ExerciseRepository, SessionRepository, SetRecordRepository, WorkoutRepository,
};
use crate::domain::value_objects::SessionOutcome;
use crate::error::{TrainingError, TrainingResult};

#[derive(Default)]
struct TrainingStore {
    workouts: HashMap<WorkoutId, Workout>,
    exercises: HashMap<ExerciseId, Exercise>,
    workout_exercises: HashSet<(WorkoutId, ExerciseId)>,
    sessions: HashMap<TrainingSessionId, TrainingSession>,
    sets: Vec<SetRecord>,
}

/// In-memory training repository
#[derive(Clone, Default)]
pub struct InMemoryTrainingRepository {
    store: Arc<Mutex<TrainingStore>>,
}

impl InMemoryTrainingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a workout into the library
    pub async fn add_workout(&self, owner: Option<UserId>, name: &str) -> WorkoutId {
        let workout = Workout::new(owner, name);
        let id = workout.id;
        self.store.lock().await.workouts.insert(id, workout);
        id
    }

    /// Seed an exercise and attach it to `workout_id`
    pub async fn add_exercise(&self, workout_id: WorkoutId, name: &str) -> ExerciseId {
        let exercise = Exercise::new(name);
        let id = exercise.id;
        let mut store = self.store.lock().await;
        store.exercises.insert(id, exercise);
        store.workout_exercises.insert((workout_id, id));
        id
    }
}

impl WorkoutRepository for InMemoryTrainingRepository {
    async fn is_owned_by(&self, workout_id: &WorkoutId, user_id: &UserId) -> TrainingResult<bool> {
        let store = self.store.lock().await;
        Ok(store
            .workouts
            .get(workout_id)
            .is_some_and(|w| w.is_owned_by(*user_id)))
    }
}

impl ExerciseRepository for InMemoryTrainingRepository {
    async fn is_attached_to_workout(
        &self,
        exercise_id: &ExerciseId,
        workout_id: &WorkoutId,
    ) -> TrainingResult<bool> {
        let store = self.store.lock().await;
        Ok(store.workout_exercises.contains(&(*workout_id, *exercise_id)))
    }
}

impl SessionRepository for InMemoryTrainingRepository {
    async fn create(&self, session: &TrainingSession) -> TrainingResult<()> {
        let mut store = self.store.lock().await;

        if session.is_active()
            && store
                .sessions
                .values()
                .any(|s| s.user_id == session.user_id && s.is_active())
        {
            return Err(TrainingError::ActiveSessionExists);
        }

        store.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TrainingSessionId) -> TrainingResult<Option<TrainingSession>> {
        let store = self.store.lock().await;
        Ok(store.sessions.get(id).cloned())
    }

    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> TrainingResult<Option<TrainingSession>> {
        let store = self.store.lock().await;
        Ok(store
            .sessions
            .values()
            .find(|s| &s.user_id == user_id && s.is_active())
            .cloned())
    }

    async fn close(
        &self,
        id: &TrainingSessionId,
        outcome: SessionOutcome,
        finished_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> TrainingResult<bool> {
        let mut store = self.store.lock().await;

        match store.sessions.get_mut(id) {
            Some(session) if session.is_active() => {
                session.apply_close(outcome, finished_at, notes.map(str::to_string));
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl SetRecordRepository for InMemoryTrainingRepository {
    async fn exists(
        &self,
        session_id: &TrainingSessionId,
        exercise_id: &ExerciseId,
        set_number: i32,
    ) -> TrainingResult<bool> {
        let store = self.store.lock().await;
        Ok(store
            .sets
            .iter()
            .any(|r| r.slot() == (*session_id, *exercise_id, set_number)))
    }

    async fn create_for_active_session(&self, record: &SetRecord) -> TrainingResult<bool> {
        let mut store = self.store.lock().await;

        let active = store
            .sessions
            .get(&record.session_id)
            .is_some_and(TrainingSession::is_active);
        if !active {
            return Ok(false);
        }

        if store.sets.iter().any(|r| r.slot() == record.slot()) {
            return Err(TrainingError::SetAlreadyRecorded);
        }

        store.sets.push(record.clone());
        Ok(true)
    }

    async fn list_by_session(
        &self,
        session_id: &TrainingSessionId,
    ) -> TrainingResult<Vec<SetRecord>> {
        let store = self.store.lock().await;
        let mut sets: Vec<SetRecord> = store
            .sets
            .iter()
            .filter(|r| &r.session_id == session_id)
            .cloned()
            .collect();
        sets.sort_by_key(|r| (*r.exercise_id.as_uuid(), r.set_number));
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{SessionStatus, SetMeasurement, SetStatus};

    #[tokio::test]
    async fn test_close_reports_transition_once() {
        let repo = InMemoryTrainingRepository::new();
        let user = UserId::new();
        let workout = repo.add_workout(Some(user), "Push").await;
        let session = TrainingSession::start(user, workout, Utc::now());
        repo.create(&session).await.unwrap();

        let now = Utc::now();
        assert!(
            repo.close(&session.id, SessionOutcome::Completed, now, Some("done"))
                .await
                .unwrap()
        );
        assert!(
            !repo
                .close(&session.id, SessionOutcome::Abandoned, now, None)
                .await
                .unwrap()
        );
        assert!(
            !repo
                .close(&TrainingSessionId::new(), SessionOutcome::Completed, now, None)
                .await
                .unwrap()
        );

        let stored = repo.find_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Completed);
        assert_eq!(stored.notes, "done");
    }

    #[tokio::test]
    async fn test_one_active_session_per_user() {
        let repo = InMemoryTrainingRepository::new();
        let user = UserId::new();
        let workout = repo.add_workout(Some(user), "Push").await;

        let first = TrainingSession::start(user, workout, Utc::now());
        repo.create(&first).await.unwrap();

        let second = TrainingSession::start(user, workout, Utc::now());
        assert!(matches!(
            repo.create(&second).await,
            Err(TrainingError::ActiveSessionExists)
        ));

        repo.close(&first.id, SessionOutcome::Abandoned, Utc::now(), None)
            .await
            .unwrap();
        repo.create(&second).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_insert_requires_active_session() {
        let repo = InMemoryTrainingRepository::new();
        let user = UserId::new();
        let workout = repo.add_workout(Some(user), "Push").await;
        let exercise = repo.add_exercise(workout, "Bench").await;
        let session = TrainingSession::start(user, workout, Utc::now());
        repo.create(&session).await.unwrap();

        let record = |n| {
            SetRecord::new(
                session.id,
                exercise,
                SetMeasurement::new(n, 1_000, 5).unwrap(),
                SetStatus::Skipped,
                Utc::now(),
            )
        };

        assert!(repo.create_for_active_session(&record(1)).await.unwrap());
        assert!(matches!(
            repo.create_for_active_session(&record(1)).await,
            Err(TrainingError::SetAlreadyRecorded)
        ));

        repo.close(&session.id, SessionOutcome::Completed, Utc::now(), None)
            .await
            .unwrap();
        assert!(!repo.create_for_active_session(&record(2)).await.unwrap());
        assert!(repo.exists(&session.id, &exercise, 1).await.unwrap());
        assert!(!repo.exists(&session.id, &exercise, 2).await.unwrap());
    }
}
