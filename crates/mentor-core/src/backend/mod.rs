//! Course backend abstractions for Mentor.
//!
//! This module defines the adapter seam of the service:
//! - `CourseBackend`: RPITIT trait for concrete backend implementations
//! - `BoxCourseBackend`: Object-safe wrapper for dynamic dispatch
//! - `BackendRegistry`: Configuration-driven course -> adapter resolution

pub mod boxed;
pub mod contract;
pub mod registry;
