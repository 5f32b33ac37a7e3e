//! OpenAI-compatible course backend adapter.
//!
//! Some courses skip the dedicated tutoring backend and talk straight to an
//! OpenAI-compatible chat-completions endpoint. One adapter serves any such
//! endpoint via a configurable base URL and model.
//!
//! Uses [`async_openai`] for type-safe request/response handling.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use mentor_core::backend::contract::CourseBackend;
use mentor_types::chat::{ChatEntry, SpeakerRole};
use mentor_types::error::BackendError;
use mentor_types::event::TutoringEvent;

/// System instruction used when the descriptor does not override it.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a tutoring assistant embedded in a \
programming course. Use the question data and test results in the student's \
request to nudge them toward the answer. Never hand over a complete solution.";

/// Adapter for a direct OpenAI-compatible chat-completions backend.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatBackend {
    name: String,
    client: Client<OpenAIConfig>,
    model: String,
    system_prompt: String,
}

impl OpenAiCompatBackend {
    /// Create an adapter against `endpoint` with the given model and key.
    pub fn new(
        name: impl Into<String>,
        endpoint: &Url,
        model: impl Into<String>,
        api_key: SecretString,
        system_prompt: Option<String>,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(endpoint.as_str().trim_end_matches('/'));

        Self {
            name: name.into(),
            client: Client::with_config(config),
            model: model.into(),
            system_prompt: system_prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    /// Build the message list: system instruction, prior conversation, then
    /// the event itself (rendered as JSON) as the final user turn.
    fn build_messages(
        &self,
        event: &TutoringEvent,
        history: &[ChatEntry],
    ) -> Result<Vec<ChatCompletionRequestMessage>, BackendError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(history.len() + 2);

        messages.push(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(
                    self.system_prompt.clone(),
                ),
                name: None,
            },
        ));

        for entry in history {
            let message = match entry.role {
                SpeakerRole::Student => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(entry.text.clone()),
                        name: None,
                    })
                }
                SpeakerRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            entry.text.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            };
            messages.push(message);
        }

        let event_json = serde_json::to_string(event)
            .map_err(|e| BackendError::Decode(format!("cannot serialize event: {e}")))?;
        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(event_json),
                name: None,
            },
        ));

        Ok(messages)
    }
}

fn map_openai_error(err: OpenAIError) -> BackendError {
    match err {
        OpenAIError::ApiError(api_err) => BackendError::Http(api_err.message),
        other => BackendError::Http(other.to_string()),
    }
}

impl CourseBackend for OpenAiCompatBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check_availability(&self) -> Result<bool, BackendError> {
        // A models listing is the cheapest authenticated round trip the API
        // offers. An API-level rejection means "not available"; a transport
        // failure is reported as such and folded to false by the caller.
        match self.client.models().list().await {
            Ok(_) => Ok(true),
            Err(OpenAIError::ApiError(_)) => Ok(false),
            Err(err) => Err(BackendError::Http(err.to_string())),
        }
    }

    async fn process_event(
        &self,
        event: &TutoringEvent,
        history: &[ChatEntry],
    ) -> Result<String, BackendError> {
        let request = CreateChatCompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(event, history)?,
            ..Default::default()
        };

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(BackendError::Decode(
                "backend returned an empty completion".to_string(),
            ));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_types::event::EventKind;

    fn adapter(system_prompt: Option<String>) -> OpenAiCompatBackend {
        OpenAiCompatBackend::new(
            "llm-backend",
            &"http://localhost:9999/v1".parse().unwrap(),
            "test-model",
            SecretString::from("test-key"),
            system_prompt,
        )
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

    fn entry(role: SpeakerRole, text: &str) -> ChatEntry {
        ChatEntry {
            id: None,
            owner_id: 42,
            quiz_id: 11,
            role,
            text: text.to_string(),
            context: None,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_build_messages_maps_roles_in_order() {
        let adapter = adapter(None);
        let history = vec![
            entry(SpeakerRole::Student, "<p>help</p>"),
            entry(SpeakerRole::Assistant, "what have you tried?"),
            entry(SpeakerRole::Student, "<p>a loop</p>"),
        ];

        let messages = adapter.build_messages(&make_event(), &history).unwrap();

        // system + 3 history turns + event as final user turn
        assert_eq!(messages.len(), 5);
        assert!(matches!(
            messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(
            messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert!(matches!(messages[4], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_final_turn_carries_event_json() {
        let adapter = adapter(None);
        let messages = adapter.build_messages(&make_event(), &[]).unwrap();

        let ChatCompletionRequestMessage::User(user) = messages.last().unwrap() else {
            panic!("final turn should be a user message");
        };
        let ChatCompletionRequestUserMessageContent::Text(text) = &user.content else {
            panic!("final turn should be text");
        };
        assert!(text.contains("\"requestType\":\"ADVICE\""));
        assert!(text.contains("\"quizName\":\"Loops\""));
    }

    #[test]
    fn test_system_prompt_override() {
        let adapter = adapter(Some("Answer in French.".to_string()));
        let messages = adapter.build_messages(&make_event(), &[]).unwrap();

        let ChatCompletionRequestMessage::System(system) = &messages[0] else {
            panic!("first message should be the system instruction");
        };
        let ChatCompletionRequestSystemMessageContent::Text(text) = &system.content else {
            panic!("system instruction should be text");
        };
        assert_eq!(text, "Answer in French.");
    }
}
