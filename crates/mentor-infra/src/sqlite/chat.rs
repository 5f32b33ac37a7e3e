//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `mentor-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, reader for lookups,
//! writer for inserts.

use sqlx::Row;

use mentor_core::chat::repository::ChatRepository;
use mentor_types::chat::{ChatEntry, SpeakerRole};
use mentor_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatEntry.
struct ChatMessageRow {
    message_id: i64,
    chat_owner_id: i64,
    quiz_id: i64,
    message: String,
    role: String,
    context: Option<String>,
    timestamp: i64,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            message_id: row.try_get("message_id")?,
            chat_owner_id: row.try_get("chat_owner_id")?,
            quiz_id: row.try_get("quiz_id")?,
            message: row.try_get("message")?,
            role: row.try_get("role")?,
            context: row.try_get("context")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_entry(self) -> Result<ChatEntry, RepositoryError> {
        let role: SpeakerRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatEntry {
            id: Some(self.message_id),
            owner_id: self.chat_owner_id,
            quiz_id: self.quiz_id,
            role,
            text: self.message,
            context: self.context,
            timestamp: self.timestamp,
        })
    }
}

impl ChatRepository for SqliteChatRepository {
    async fn find_by_owner_and_quiz(
        &self,
        owner_id: i64,
        quiz_id: i64,
    ) -> Result<Vec<ChatEntry>, RepositoryError> {
        // Secondary sort on message_id keeps insertion order for entries
        // written within the same second.
        let rows = sqlx::query(
            r#"SELECT * FROM chat_messages
               WHERE chat_owner_id = ? AND quiz_id = ?
               ORDER BY timestamp ASC, message_id ASC"#,
        )
        .bind(owner_id)
        .bind(quiz_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = ChatMessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            entries.push(msg_row.into_entry()?);
        }

        Ok(entries)
    }

    async fn save(&self, entry: ChatEntry) -> Result<ChatEntry, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO chat_messages (chat_owner_id, quiz_id, message, role, context, timestamp)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(entry.owner_id)
        .bind(entry.quiz_id)
        .bind(&entry.text)
        .bind(entry.role.to_string())
        .bind(&entry.context)
        .bind(entry.timestamp)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatEntry {
            id: Some(result.last_insert_rowid()),
            ..entry
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_entry(owner_id: i64, quiz_id: i64, role: SpeakerRole, text: &str) -> ChatEntry {
        ChatEntry {
            id: None,
            owner_id,
            quiz_id,
            role,
            text: text.to_string(),
            context: None,
            timestamp: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let saved = repo
            .save(make_entry(42, 11, SpeakerRole::Student, "<p>hello</p>"))
            .await
            .unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.text, "<p>hello</p>");
    }

    #[tokio::test]
    async fn test_find_returns_entries_in_insertion_order() {
        let repo = SqliteChatRepository::new(test_pool().await);

        // Same timestamp on purpose: ordering must still be insertion order.
        for i in 0..3 {
            repo.save(make_entry(42, 11, SpeakerRole::Student, &format!("m{i}")))
                .await
                .unwrap();
        }
        repo.save(make_entry(42, 11, SpeakerRole::Assistant, "reply"))
            .await
            .unwrap();

        let entries = repo.find_by_owner_and_quiz(42, 11).await.unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].text, "m0");
        assert_eq!(entries[1].text, "m1");
        assert_eq!(entries[2].text, "m2");
        assert_eq!(entries[3].text, "reply");
        assert_eq!(entries[3].role, SpeakerRole::Assistant);
    }

    #[tokio::test]
    async fn test_find_scoped_to_owner_and_quiz() {
        let repo = SqliteChatRepository::new(test_pool().await);

        repo.save(make_entry(42, 11, SpeakerRole::Student, "mine"))
            .await
            .unwrap();
        repo.save(make_entry(42, 12, SpeakerRole::Student, "other quiz"))
            .await
            .unwrap();
        repo.save(make_entry(99, 11, SpeakerRole::Student, "other student"))
            .await
            .unwrap();

        let entries = repo.find_by_owner_and_quiz(42, 11).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "mine");
    }

    #[tokio::test]
    async fn test_find_empty_conversation() {
        let repo = SqliteChatRepository::new(test_pool().await);
        let entries = repo.find_by_owner_and_quiz(1, 1).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_role_and_context_roundtrip() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let entry = ChatEntry {
            context: Some("question 3".to_string()),
            ..make_entry(42, 11, SpeakerRole::Assistant, "try again")
        };
        repo.save(entry).await.unwrap();

        let entries = repo.find_by_owner_and_quiz(42, 11).await.unwrap();
        assert_eq!(entries[0].role, SpeakerRole::Assistant);
        assert_eq!(entries[0].context.as_deref(), Some("question 3"));
    }
}
