//! Infrastructure implementations for Mentor.
//!
//! Concrete course backend adapters (HTTP clients), SQLite repositories, and
//! the startup configuration loader. Everything here implements a trait
//! defined in `mentor-core` or assembles those implementations.

pub mod backends;
pub mod config;
pub mod sqlite;
