//! CourseBackend trait definition.
//!
//! This is the core abstraction that all course backend adapters implement.
//! Uses native async fn in traits (RPITIT); `BoxCourseBackend` provides the
//! object-safe wrapper when heterogeneous backends live in one registry.

use mentor_types::chat::ChatEntry;
use mentor_types::error::BackendError;
use mentor_types::event::TutoringEvent;

/// Trait for course backend adapters.
///
/// One implementation per integration style; implementations live in
/// mentor-infra (e.g. `RemoteCourseBackend`). Adapters hold no per-call
/// mutable state: every method must be safe to invoke concurrently from
/// multiple requests.
pub trait CourseBackend: Send + Sync {
    /// Stable identifier matching the configured adapter name. Never empty.
    fn name(&self) -> &str;

    /// Probe the backend for liveness.
    ///
    /// Ordinary unavailability is `Ok(false)`; an `Err` means the probe
    /// itself failed in transit, which callers fold to `false` by policy.
    fn check_availability(
        &self,
    ) -> impl std::future::Future<Output = Result<bool, BackendError>> + Send;

    /// Produce the next assistant reply for an event, given the full prior
    /// conversation for that student and quiz.
    fn process_event(
        &self,
        event: &TutoringEvent,
        history: &[ChatEntry],
    ) -> impl std::future::Future<Output = Result<String, BackendError>> + Send;
}
