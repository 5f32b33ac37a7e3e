//! SQLite persistence for chat transcripts and raw tutoring events.

pub mod chat;
pub mod event;
pub mod pool;
