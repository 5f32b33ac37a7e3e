//! SQLite event repository implementation.
//!
//! Persists inbound tutoring events exactly as received. The question/attempt
//! snapshot is nested and question-type dependent, so it is stored as a JSON
//! text column rather than flattened into the schema.

use chrono::Utc;
use uuid::Uuid;

use mentor_core::repository::event::EventRepository;
use mentor_types::error::RepositoryError;
use mentor_types::event::TutoringEvent;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `EventRepository`.
pub struct SqliteEventRepository {
    pool: DatabasePool,
}

impl SqliteEventRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl EventRepository for SqliteEventRepository {
    async fn save(&self, event: &TutoringEvent) -> Result<(), RepositoryError> {
        let questions = serde_json::to_string(&event.questions)
            .map_err(|e| RepositoryError::Query(format!("cannot serialize questions: {e}")))?;

        sqlx::query(
            r#"INSERT INTO request_actions (id, request_type, user_id, course_id, quiz_id, attempt_id, quiz_name, questions, received_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(event.kind.to_string())
        .bind(event.user_id)
        .bind(event.course_id)
        .bind(event.quiz_id)
        .bind(event.attempt_id)
        .bind(&event.quiz_name)
        .bind(questions)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
