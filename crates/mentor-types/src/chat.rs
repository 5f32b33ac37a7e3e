//! Chat transcript types.
//!
//! A conversation is keyed by `(owner_id, quiz_id)`: every student/quiz pair
//! has one ordered transcript. Entries are written either by the chat surface
//! (student messages) or by the dispatch layer (assistant replies).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author of a chat entry.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('student', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    Student,
    Assistant,
}

impl fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerRole::Student => write!(f, "student"),
            SpeakerRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for SpeakerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(SpeakerRole::Student),
            "assistant" => Ok(SpeakerRole::Assistant),
            other => Err(format!("invalid speaker role: '{other}'")),
        }
    }
}

/// One turn in a persisted conversation.
///
/// `id` is `None` until the store assigns one on save. `timestamp` is epoch
/// seconds; within a second, store insertion order is preserved by the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: Option<i64>,
    pub owner_id: i64,
    pub quiz_id: i64,
    pub role: SpeakerRole,
    pub text: String,
    pub context: Option<String>,
    pub timestamp: i64,
}
