//! Chat service for transcript reads and student-authored messages.
//!
//! Assistant replies are written by the dispatch layer; this service covers
//! the remaining chat surface: fetching a conversation and appending a
//! student message.

use chrono::Utc;

use mentor_types::chat::{ChatEntry, SpeakerRole};
use mentor_types::error::RepositoryError;

use crate::chat::repository::ChatRepository;

/// Transcript reads and student message writes over a `ChatRepository`.
///
/// Generic over the repository trait so the core never depends on
/// mentor-infra.
pub struct ChatService<C: ChatRepository> {
    chat_repo: C,
}

impl<C: ChatRepository> ChatService<C> {
    /// Create a new chat service with the given repository.
    pub fn new(chat_repo: C) -> Self {
        Self { chat_repo }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    /// Get the conversation for a student and quiz, in insertion order.
    pub async fn get_messages(
        &self,
        owner_id: i64,
        quiz_id: i64,
    ) -> Result<Vec<ChatEntry>, RepositoryError> {
        self.chat_repo.find_by_owner_and_quiz(owner_id, quiz_id).await
    }

    /// Append a student-authored message to a conversation.
    ///
    /// The raw text is wrapped in an HTML paragraph so the chat surface can
    /// render stored entries uniformly, stamped with the current epoch
    /// second, and persisted immediately.
    pub async fn add_student_message(
        &self,
        owner_id: i64,
        quiz_id: i64,
        text: &str,
        context: Option<String>,
    ) -> Result<ChatEntry, RepositoryError> {
        let entry = ChatEntry {
            id: None,
            owner_id,
            quiz_id,
            role: SpeakerRole::Student,
            text: format!("<p>{text}</p>"),
            context,
            timestamp: Utc::now().timestamp(),
        };

        self.chat_repo.save(entry).await
    }
}
