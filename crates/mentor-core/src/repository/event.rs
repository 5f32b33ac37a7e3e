//! EventRepository trait definition.

use mentor_types::error::RepositoryError;
use mentor_types::event::TutoringEvent;

/// Repository trait for raw tutoring event persistence.
///
/// Implementations live in mentor-infra (e.g. `SqliteEventRepository`).
/// Uses native async fn in traits (RPITIT).
pub trait EventRepository: Send + Sync {
    /// Persist an inbound event exactly as received.
    fn save(
        &self,
        event: &TutoringEvent,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
