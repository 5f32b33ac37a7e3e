//! Response DTOs shared by the chat and action endpoints.
//!
//! The wire shapes mirror what the LMS plugin consumes: a message is always
//! `{ "role": ..., "message": ... }`, wrapped either singly or as a list.

use serde::Serialize;

use mentor_types::chat::{ChatEntry, SpeakerRole};

/// One chat message as the API exposes it.
#[derive(Debug, Serialize)]
pub struct ChatMessageDto {
    pub role: SpeakerRole,
    pub message: String,
}

impl From<ChatEntry> for ChatMessageDto {
    fn from(entry: ChatEntry) -> Self {
        Self {
            role: entry.role,
            message: entry.text,
        }
    }
}

/// Envelope for endpoints returning a single message.
#[derive(Debug, Serialize)]
pub struct SingleMessageResponse {
    pub message: ChatMessageDto,
}

/// Envelope for endpoints returning a conversation.
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessageDto>,
}

/// Response for the availability endpoint.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_dto_from_entry() {
        let entry = ChatEntry {
            id: Some(1),
            owner_id: 42,
            quiz_id: 11,
            role: SpeakerRole::Assistant,
            text: "try again".to_string(),
            context: None,
            timestamp: 1_700_000_000,
        };

        let dto = ChatMessageDto::from(entry);
        let json = serde_json::to_string(&SingleMessageResponse { message: dto }).unwrap();
        assert_eq!(
            json,
            r#"{"message":{"role":"assistant","message":"try again"}}"#
        );
    }

    #[test]
    fn test_availability_response_shape() {
        let json = serde_json::to_string(&AvailabilityResponse { available: false }).unwrap();
        assert_eq!(json, r#"{"available":false}"#);
    }
}
