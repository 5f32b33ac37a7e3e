//! Shared domain types for Mentor.
//!
//! This crate contains the domain types used across the Mentor service:
//! tutoring events, chat entries, backend adapter configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, thiserror, url.

pub mod backend;
pub mod chat;
pub mod error;
pub mod event;
