//! Business logic and repository trait definitions for Mentor.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, plus the two pieces of the service with actual decision
//! content: the backend registry (course -> adapter resolution) and the
//! dispatch protocol (invoke the adapter, fall back safely). It depends only
//! on `mentor-types` -- never on `mentor-infra` or any database/IO crate.

pub mod backend;
pub mod chat;
pub mod dispatch;
pub mod repository;
pub mod text;
