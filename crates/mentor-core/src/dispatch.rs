//! Dispatch and fallback protocol for tutoring events.
//!
//! `ActionService::handle` is the caller-visible entry point of the service:
//! persist the raw event, resolve the course's backend, invoke it with the
//! prior conversation, and persist the reply. The contract toward the chat
//! surface is that configuration and backend failures terminate in a fixed,
//! well-formed fallback reply rather than a raised error; only persistence
//! failures propagate, since a dropped transcript entry would be worse than
//! a failed request.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{error, info, warn};

use mentor_types::chat::{ChatEntry, SpeakerRole};
use mentor_types::error::RepositoryError;
use mentor_types::event::TutoringEvent;

use crate::backend::registry::BackendRegistry;
use crate::chat::repository::ChatRepository;
use crate::repository::event::EventRepository;

/// Reply returned when the course cannot be resolved to a backend.
pub const CONFIG_FALLBACK_REPLY: &str =
    "A configuration error occurred in the tutoring service. Please contact your course administrator.";

/// Reply returned when the resolved backend fails to answer.
pub const BACKEND_FALLBACK_REPLY: &str =
    "I'm sorry, I can't offer a hint right now. Let's talk again a little later.";

/// Routes tutoring events to course backends and persists the exchange.
///
/// Generic over the event and chat repository traits; the backend registry is
/// shared (it is also consumed by the availability endpoint).
pub struct ActionService<E: EventRepository, C: ChatRepository> {
    event_repo: E,
    chat_repo: C,
    registry: Arc<BackendRegistry>,
    reply_timeout: Duration,
}

impl<E: EventRepository, C: ChatRepository> ActionService<E, C> {
    /// Create a new dispatch service.
    ///
    /// `reply_timeout` bounds one backend invocation; expiry is treated as a
    /// backend failure so a slow backend cannot hold the request forever.
    pub fn new(
        event_repo: E,
        chat_repo: C,
        registry: Arc<BackendRegistry>,
        reply_timeout: Duration,
    ) -> Self {
        Self {
            event_repo,
            chat_repo,
            registry,
            reply_timeout,
        }
    }

    /// Handle one tutoring event and return the assistant's transcript entry.
    ///
    /// Sequence:
    /// 1. Persist the raw event (failure propagates).
    /// 2. Resolve the backend; a resolution failure yields the fixed
    ///    configuration fallback.
    /// 3. Fetch the prior conversation (failure propagates).
    /// 4. Invoke the backend under `reply_timeout`; any backend failure or
    ///    expiry yields the fixed backend fallback, with distinct text from
    ///    step 2 so the two degradations stay distinguishable in transcripts.
    /// 5. Persist the successful reply and return the stored entry.
    ///
    /// Fallback entries are returned but not persisted: the transcript
    /// records real exchanges only.
    pub async fn handle(&self, event: TutoringEvent) -> Result<ChatEntry, RepositoryError> {
        self.event_repo.save(&event).await?;

        let backend = match self.registry.resolve(event.course_id) {
            Ok(backend) => backend,
            Err(err) => {
                warn!(course_id = event.course_id, %err, "cannot route tutoring event");
                return Ok(fallback_entry(&event, CONFIG_FALLBACK_REPLY));
            }
        };

        let history = self
            .chat_repo
            .find_by_owner_and_quiz(event.user_id, event.quiz_id)
            .await?;

        let reply = match timeout(self.reply_timeout, backend.process_event(&event, &history)).await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                error!(backend = backend.name(), %err, "backend failed to produce a reply");
                return Ok(fallback_entry(&event, BACKEND_FALLBACK_REPLY));
            }
            Err(_) => {
                error!(
                    backend = backend.name(),
                    timeout_secs = self.reply_timeout.as_secs(),
                    "backend timed out"
                );
                return Ok(fallback_entry(&event, BACKEND_FALLBACK_REPLY));
            }
        };

        info!(
            backend = backend.name(),
            course_id = event.course_id,
            user_id = event.user_id,
            "backend produced a reply"
        );

        let entry = ChatEntry {
            id: None,
            owner_id: event.user_id,
            quiz_id: event.quiz_id,
            role: SpeakerRole::Assistant,
            text: reply,
            context: None,
            timestamp: Utc::now().timestamp(),
        };

        self.chat_repo.save(entry).await
    }
}

/// Build an unpersisted assistant entry carrying a fallback reply.
fn fallback_entry(event: &TutoringEvent, text: &str) -> ChatEntry {
    ChatEntry {
        id: None,
        owner_id: event.user_id,
        quiz_id: event.quiz_id,
        role: SpeakerRole::Assistant,
        text: text.to_string(),
        context: None,
        timestamp: Utc::now().timestamp(),
    }
}
