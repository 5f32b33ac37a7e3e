//! Remote course backend adapter.
//!
//! Fronts an external tutoring backend that speaks the process-event HTTP
//! protocol: the event plus prior chat is POSTed to
//! `{endpoint}/api/process_action` and the reply comes back as a string body;
//! liveness is `GET {endpoint}/api/status/check_availability` returning
//! `{ "available": bool }`.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;

use mentor_core::backend::contract::CourseBackend;
use mentor_core::text::unquote_and_unescape;
use mentor_types::chat::{ChatEntry, SpeakerRole};
use mentor_types::error::{BackendError, ConfigError};
use mentor_types::event::{EventKind, QuestionAttempt, TutoringEvent};

/// Adapter for a remote course backend.
#[derive(Debug)]
pub struct RemoteCourseBackend {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

/// Wire payload for `POST /api/process_action`.
///
/// The backend receives everything it needs in one request: the event fields
/// plus the prior conversation, all camelCase like the inbound wire format.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessEventPayload<'a> {
    request_type: EventKind,
    quiz_name: &'a str,
    current_timestamp: i64,
    chat: Vec<ChatTurn<'a>>,
    questions: &'a [QuestionAttempt],
}

#[derive(Serialize)]
struct ChatTurn<'a> {
    message: &'a str,
    context: Option<&'a str>,
    timestamp: i64,
    role: SpeakerRole,
}

#[derive(Deserialize)]
struct AvailabilityBody {
    available: bool,
}

impl RemoteCourseBackend {
    /// Create an adapter for the backend at `endpoint`.
    ///
    /// `request_timeout` bounds each HTTP call at the transport level; the
    /// dispatch layer imposes its own overall reply timeout on top.
    pub fn new(
        name: impl Into<String>,
        endpoint: &Url,
        request_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            base_url: endpoint.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn payload<'a>(
        event: &'a TutoringEvent,
        history: &'a [ChatEntry],
    ) -> ProcessEventPayload<'a> {
        ProcessEventPayload {
            request_type: event.kind,
            quiz_name: &event.quiz_name,
            current_timestamp: Utc::now().timestamp(),
            chat: history
                .iter()
                .map(|entry| ChatTurn {
                    message: &entry.text,
                    context: entry.context.as_deref(),
                    timestamp: entry.timestamp,
                    role: entry.role,
                })
                .collect(),
            questions: &event.questions,
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Http(err.to_string())
    }
}

impl CourseBackend for RemoteCourseBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check_availability(&self) -> Result<bool, BackendError> {
        let url = format!("{}/api/status/check_availability", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        // A reachable backend answering anything but a well-formed positive
        // body is "not available", not an error.
        if !response.status().is_success() {
            return Ok(false);
        }

        match response.json::<AvailabilityBody>().await {
            Ok(body) => Ok(body.available),
            Err(_) => Ok(false),
        }
    }

    async fn process_event(
        &self,
        event: &TutoringEvent,
        history: &[ChatEntry],
    ) -> Result<String, BackendError> {
        let url = format!("{}/api/process_action", self.base_url);
        let payload = Self::payload(event, history);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        Ok(unquote_and_unescape(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};
    use axum::{Json, Router};

    async fn spawn_backend(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}").parse().unwrap()
    }

    fn make_event() -> TutoringEvent {
        TutoringEvent {
            kind: EventKind::Advice,
            user_id: 42,
            course_id: 7,
            attempt_id: 3,
            quiz_id: 11,
            quiz_name: "Loops".to_string(),
            questions: Vec::new(),
        }
    }

    fn adapter(endpoint: &Url) -> RemoteCourseBackend {
        RemoteCourseBackend::new("foo", endpoint, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_process_event_unquotes_reply() {
        let router = Router::new().route(
            "/api/process_action",
            post(|Json(payload): Json<serde_json::Value>| async move {
                // The payload must carry the event kind and chat in wire form.
                assert_eq!(payload["requestType"], "ADVICE");
                assert!(payload["chat"].is_array());
                "\"Try re-reading the loop invariant.\"".to_string()
            }),
        );
        let endpoint = spawn_backend(router).await;

        let history = vec![ChatEntry {
            id: Some(1),
            owner_id: 42,
            quiz_id: 11,
            role: SpeakerRole::Student,
            text: "<p>help</p>".to_string(),
            context: None,
            timestamp: 1_700_000_000,
        }];

        let reply = adapter(&endpoint)
            .process_event(&make_event(), &history)
            .await
            .unwrap();
        assert_eq!(reply, "Try re-reading the loop invariant.");
    }

    #[tokio::test]
    async fn test_process_event_maps_error_status() {
        let router = Router::new().route(
            "/api/process_action",
            post(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let endpoint = spawn_backend(router).await;

        let err = adapter(&endpoint)
            .process_event(&make_event(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Status { code: 500 }));
    }

    #[tokio::test]
    async fn test_availability_true() {
        let router = Router::new().route(
            "/api/status/check_availability",
            get(|| async { Json(serde_json::json!({ "available": true })) }),
        );
        let endpoint = spawn_backend(router).await;

        assert!(adapter(&endpoint).check_availability().await.unwrap());
    }

    #[tokio::test]
    async fn test_availability_false_on_negative_body() {
        let router = Router::new().route(
            "/api/status/check_availability",
            get(|| async { Json(serde_json::json!({ "available": false })) }),
        );
        let endpoint = spawn_backend(router).await;

        assert!(!adapter(&endpoint).check_availability().await.unwrap());
    }

    #[tokio::test]
    async fn test_availability_false_on_error_status() {
        let router = Router::new(); // no availability route -> 404
        let endpoint = spawn_backend(router).await;

        assert!(!adapter(&endpoint).check_availability().await.unwrap());
    }

    #[tokio::test]
    async fn test_availability_transport_failure_is_error() {
        // Nothing listens on this port.
        let endpoint: Url = "http://127.0.0.1:1".parse().unwrap();
        let result = adapter(&endpoint).check_availability().await;
        assert!(result.is_err());
    }
}
