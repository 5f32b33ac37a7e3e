use thiserror::Error;

/// Errors from resolving a course to a backend adapter.
///
/// These are configuration errors, not runtime errors: the fix is always an
/// operator editing the routing configuration. The dispatch boundary folds
/// them into a fixed fallback reply; they never surface to the chat caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no adapter configured for course {course_id}")]
    CourseNotMapped { course_id: i64 },

    #[error("no adapter registered with name {name}")]
    AdapterNotRegistered { name: String },
}

/// Errors from a course backend while probing or producing a reply.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("http error: {0}")]
    Http(String),

    #[error("backend returned status {code}")]
    Status { code: u16 },

    #[error("malformed backend response: {0}")]
    Decode(String),

    #[error("backend timed out")]
    Timeout,
}

/// Errors from repository operations (used by trait definitions in mentor-core).
///
/// Never recovered by the dispatch layer: a transcript entry that cannot be
/// persisted must fail the whole request rather than be silently dropped.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from loading settings or instantiating adapters at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {detail}")]
    Read { path: String, detail: String },

    #[error("cannot parse config file: {0}")]
    Parse(String),

    #[error("course mapping key '{0}' is not a numeric course id")]
    InvalidCourseId(String),

    #[error("adapter '{adapter}' needs an API key but '{env}' is not set")]
    MissingApiKey { adapter: String, env: String },

    #[error("adapter '{adapter}' is missing a required field: {field}")]
    MissingField { adapter: String, field: String },

    #[error("cannot build http client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_messages() {
        let err = ResolveError::CourseNotMapped { course_id: 9 };
        assert_eq!(err.to_string(), "no adapter configured for course 9");

        let err = ResolveError::AdapterNotRegistered {
            name: "foo".to_string(),
        };
        assert_eq!(err.to_string(), "no adapter registered with name foo");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Status { code: 503 };
        assert_eq!(err.to_string(), "backend returned status 503");
        assert_eq!(BackendError::Timeout.to_string(), "backend timed out");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingApiKey {
            adapter: "llm-backend".to_string(),
            env: "MENTOR_LLM_KEY".to_string(),
        };
        assert!(err.to_string().contains("llm-backend"));
        assert!(err.to_string().contains("MENTOR_LLM_KEY"));
    }
}
