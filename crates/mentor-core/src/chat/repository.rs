//! ChatRepository trait definition.

use mentor_types::chat::ChatEntry;
use mentor_types::error::RepositoryError;

/// Repository trait for chat transcript persistence.
///
/// Implementations live in mentor-infra (e.g. `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT).
pub trait ChatRepository: Send + Sync {
    /// Get the full conversation for a student and quiz, in insertion order.
    fn find_by_owner_and_quiz(
        &self,
        owner_id: i64,
        quiz_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatEntry>, RepositoryError>> + Send;

    /// Persist a new entry. Returns the stored entry with its assigned id.
    fn save(
        &self,
        entry: ChatEntry,
    ) -> impl std::future::Future<Output = Result<ChatEntry, RepositoryError>> + Send;
}
