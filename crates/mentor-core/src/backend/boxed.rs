//! BoxCourseBackend -- object-safe dynamic dispatch wrapper for CourseBackend.
//!
//! 1. Define an object-safe `CourseBackendDyn` trait with boxed futures
//! 2. Blanket-impl `CourseBackendDyn` for all `T: CourseBackend`
//! 3. `BoxCourseBackend` wraps `Box<dyn CourseBackendDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use mentor_types::chat::ChatEntry;
use mentor_types::error::BackendError;
use mentor_types::event::TutoringEvent;

use super::contract::CourseBackend;

/// Object-safe version of [`CourseBackend`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn CourseBackendDyn`).
/// A blanket implementation is provided for all types implementing
/// `CourseBackend`.
pub trait CourseBackendDyn: Send + Sync {
    fn name(&self) -> &str;

    fn check_availability_boxed(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<bool, BackendError>> + Send + '_>>;

    fn process_event_boxed<'a>(
        &'a self,
        event: &'a TutoringEvent,
        history: &'a [ChatEntry],
    ) -> Pin<Box<dyn Future<Output = Result<String, BackendError>> + Send + 'a>>;
}

/// Blanket implementation: any `CourseBackend` automatically implements
/// `CourseBackendDyn`.
impl<T: CourseBackend> CourseBackendDyn for T {
    fn name(&self) -> &str {
        CourseBackend::name(self)
    }

    fn check_availability_boxed(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<bool, BackendError>> + Send + '_>> {
        Box::pin(self.check_availability())
    }

    fn process_event_boxed<'a>(
        &'a self,
        event: &'a TutoringEvent,
        history: &'a [ChatEntry],
    ) -> Pin<Box<dyn Future<Output = Result<String, BackendError>> + Send + 'a>> {
        Box::pin(self.process_event(event, history))
    }
}

/// Type-erased course backend for runtime adapter selection.
///
/// Since `CourseBackend` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxCourseBackend` provides equivalent methods that delegate to
/// the inner `CourseBackendDyn` trait object, so the registry can hold
/// backends of different concrete types in one map.
pub struct BoxCourseBackend {
    inner: Box<dyn CourseBackendDyn + Send + Sync>,
}

impl std::fmt::Debug for BoxCourseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxCourseBackend")
            .field("name", &self.name())
            .finish()
    }
}

impl BoxCourseBackend {
    /// Wrap a concrete `CourseBackend` in a type-erased box.
    pub fn new<T: CourseBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    /// Stable identifier matching the configured adapter name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Probe the backend for liveness.
    pub async fn check_availability(&self) -> Result<bool, BackendError> {
        self.inner.check_availability_boxed().await
    }

    /// Produce the next assistant reply for an event.
    pub async fn process_event(
        &self,
        event: &TutoringEvent,
        history: &[ChatEntry],
    ) -> Result<String, BackendError> {
        self.inner.process_event_boxed(event, history).await
    }
}
