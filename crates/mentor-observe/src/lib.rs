//! Observability support for Mentor: tracing subscriber initialization.

pub mod tracing_setup;
