//! Chat transcript persistence abstractions for Mentor.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, and the `ChatService` used by the chat HTTP surface.

pub mod repository;
pub mod service;
