//! Backend registry for course -> adapter resolution.
//!
//! The registry holds two read-only maps built once at startup: adapter
//! instances indexed by name, and the course mapping from configuration.
//! Resolution is the two-step id -> name -> instance lookup, so operators can
//! repoint a course at a different backend by editing the mapping alone, and
//! several courses can share one adapter instance.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use mentor_types::error::ResolveError;

use super::boxed::BoxCourseBackend;

/// Registry of course backend adapters, indexed by name, plus the
/// course -> adapter-name mapping.
///
/// Built before the first request is served and never mutated afterwards, so
/// reads need no synchronization.
#[derive(Debug)]
pub struct BackendRegistry {
    backends: HashMap<String, Arc<BoxCourseBackend>>,
    course_mapping: HashMap<i64, String>,
}

impl BackendRegistry {
    /// Create a registry with the given course mapping and no adapters yet.
    pub fn new(course_mapping: HashMap<i64, String>) -> Self {
        Self {
            backends: HashMap::new(),
            course_mapping,
        }
    }

    /// Register an adapter under the given name.
    ///
    /// If an adapter with this name already exists, it is replaced.
    pub fn register(&mut self, name: impl Into<String>, backend: BoxCourseBackend) {
        self.backends.insert(name.into(), Arc::new(backend));
    }

    /// Resolve a course id to its configured adapter.
    ///
    /// Pure O(1) read with no side effects. Fails when the course is not in
    /// the mapping, or when the mapping names an adapter that was never
    /// registered (a dangling configuration reference -- detected here, at
    /// resolution time, since the mapping is not validated eagerly).
    /// Identity-stable: repeated calls return the same instance.
    pub fn resolve(&self, course_id: i64) -> Result<Arc<BoxCourseBackend>, ResolveError> {
        let name = self
            .course_mapping
            .get(&course_id)
            .ok_or(ResolveError::CourseNotMapped { course_id })?;

        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::AdapterNotRegistered { name: name.clone() })
    }

    /// Report whether the backend serving a course is currently available.
    ///
    /// Absence of configuration is modeled as "not available", and a probe
    /// that fails in transit counts as unavailable too: the consumer only
    /// needs a boolean, so this never raises.
    pub async fn is_available(&self, course_id: i64) -> bool {
        let backend = match self.resolve(course_id) {
            Ok(backend) => backend,
            Err(err) => {
                warn!(course_id, %err, "availability check on unresolvable course");
                return false;
            }
        };

        match backend.check_availability().await {
            Ok(available) => available,
            Err(err) => {
                warn!(backend = backend.name(), %err, "availability probe failed");
                false
            }
        }
    }

    /// List all registered adapter names.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::contract::CourseBackend;
    use mentor_types::chat::ChatEntry;
    use mentor_types::error::BackendError;
    use mentor_types::event::TutoringEvent;

    struct StubBackend {
        name: String,
        availability: Result<bool, ()>,
    }

    impl StubBackend {
        fn available(name: &str) -> Self {
            Self {
                name: name.to_string(),
                availability: Ok(true),
            }
        }

        fn unavailable(name: &str) -> Self {
            Self {
                name: name.to_string(),
                availability: Ok(false),
            }
        }

        fn failing(name: &str) -> Self {
            Self {
                name: name.to_string(),
                availability: Err(()),
            }
        }
    }

    impl CourseBackend for StubBackend {
        fn name(&self) -> &str {
            &self.name
        }

        async fn check_availability(&self) -> Result<bool, BackendError> {
            self.availability
                .map_err(|_| BackendError::Http("connection refused".to_string()))
        }

        async fn process_event(
            &self,
            _event: &TutoringEvent,
            _history: &[ChatEntry],
        ) -> Result<String, BackendError> {
            Ok("stub reply".to_string())
        }
    }

    fn registry_with(mapping: &[(i64, &str)], backends: Vec<StubBackend>) -> BackendRegistry {
        let course_mapping = mapping
            .iter()
            .map(|(id, name)| (*id, name.to_string()))
            .collect();
        let mut registry = BackendRegistry::new(course_mapping);
        for backend in backends {
            let name = backend.name.clone();
            registry.register(name, BoxCourseBackend::new(backend));
        }
        registry
    }

    #[test]
    fn test_resolve_returns_configured_adapter() {
        let registry = registry_with(&[(7, "foo")], vec![StubBackend::available("foo")]);
        let backend = registry.resolve(7).unwrap();
        assert_eq!(backend.name(), "foo");
    }

    #[test]
    fn test_resolve_is_identity_stable() {
        let registry = registry_with(
            &[(7, "foo"), (8, "foo")],
            vec![StubBackend::available("foo")],
        );
        let first = registry.resolve(7).unwrap();
        let second = registry.resolve(7).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Two courses mapped to the same name share one instance.
        let shared = registry.resolve(8).unwrap();
        assert!(Arc::ptr_eq(&first, &shared));
    }

    #[test]
    fn test_resolve_unmapped_course() {
        let registry = registry_with(&[(7, "foo")], vec![StubBackend::available("foo")]);
        let err = registry.resolve(9).unwrap_err();
        assert_eq!(err, ResolveError::CourseNotMapped { course_id: 9 });
    }

    #[test]
    fn test_resolve_dangling_adapter_name() {
        // Course 5 points at a name nobody registered.
        let registry = registry_with(
            &[(5, "missing"), (7, "foo")],
            vec![StubBackend::available("foo")],
        );
        let err = registry.resolve(5).unwrap_err();
        assert_eq!(
            err,
            ResolveError::AdapterNotRegistered {
                name: "missing".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_is_available_true_for_healthy_backend() {
        let registry = registry_with(&[(7, "foo")], vec![StubBackend::available("foo")]);
        assert!(registry.is_available(7).await);
    }

    #[tokio::test]
    async fn test_is_available_false_for_down_backend() {
        let registry = registry_with(&[(7, "foo")], vec![StubBackend::unavailable("foo")]);
        assert!(!registry.is_available(7).await);
    }

    #[tokio::test]
    async fn test_is_available_false_for_unmapped_course() {
        let registry = registry_with(&[(7, "foo")], vec![StubBackend::available("foo")]);
        assert!(!registry.is_available(9).await);
    }

    #[tokio::test]
    async fn test_is_available_false_for_dangling_name() {
        let registry = registry_with(&[(5, "missing")], vec![StubBackend::available("foo")]);
        assert!(!registry.is_available(5).await);
    }

    #[tokio::test]
    async fn test_is_available_folds_probe_transport_error() {
        let registry = registry_with(&[(7, "foo")], vec![StubBackend::failing("foo")]);
        assert!(!registry.is_available(7).await);
    }
}
