//! Tutoring event types.
//!
//! A [`TutoringEvent`] is one user-triggered action inside a quiz (asking for
//! advice, asking an error to be explained, ...) together with a snapshot of
//! the questions and attempts it concerns. Events arrive over HTTP in the
//! camelCase wire format the LMS plugin emits, are persisted raw, and are
//! handed by value to the dispatch layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of user-triggered action that needs an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Advice,
    ErrorExplain,
    ChatAnalyze,
    Explain,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Advice => write!(f, "ADVICE"),
            EventKind::ErrorExplain => write!(f, "ERROR_EXPLAIN"),
            EventKind::ChatAnalyze => write!(f, "CHAT_ANALYZE"),
            EventKind::Explain => write!(f, "EXPLAIN"),
        }
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADVICE" => Ok(EventKind::Advice),
            "ERROR_EXPLAIN" => Ok(EventKind::ErrorExplain),
            "CHAT_ANALYZE" => Ok(EventKind::ChatAnalyze),
            "EXPLAIN" => Ok(EventKind::Explain),
            other => Err(format!("invalid event kind: '{other}'")),
        }
    }
}

/// One user-triggered action needing an assistant reply.
///
/// Carries the course identifier that selects the backend adapter, plus the
/// question/attempt snapshot the backend needs to produce a useful answer.
/// Never mutated by the dispatch layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutoringEvent {
    #[serde(rename = "requestType")]
    pub kind: EventKind,
    pub user_id: i64,
    pub course_id: i64,
    pub attempt_id: i64,
    pub quiz_id: i64,
    #[serde(default)]
    pub quiz_name: String,
    #[serde(default)]
    pub questions: Vec<QuestionAttempt>,
}

/// A question paired with the student's attempt at it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAttempt {
    pub question: Question,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt: Option<Attempt>,
}

/// A quiz question as presented to the student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: i64,
    pub question_name: String,
    /// Question-type identifier from the LMS (e.g. "qtype_coderunner").
    #[serde(rename = "type")]
    pub kind: String,
    pub time_modified: i64,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<QuestionExtraData>,
}

/// The student's recorded attempt at a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub attempt_id: i64,
    pub time_modified: i64,
    pub last_touched: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<AttemptExtraData>,
}

/// Question-type-specific payload attached to a [`Question`].
///
/// Internally tagged on `type` so each question type carries its own shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionExtraData {
    #[serde(rename = "qtype_coderunner")]
    CodeRunner(CodeRunnerQuestionData),
}

/// Question-type-specific payload attached to an [`Attempt`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttemptExtraData {
    #[serde(rename = "qtype_coderunner")]
    CodeRunner(CodeRunnerAttemptData),
}

/// CodeRunner question data: reference solution and grading test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRunnerQuestionData {
    pub language: String,
    pub answer: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// CodeRunner attempt data: the student's code and per-test outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRunnerAttemptData {
    #[serde(default)]
    pub current_answer: Option<String>,
    #[serde(default)]
    pub submitted_answer: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<AttemptTestCase>,
}

/// A grading test case as defined by the question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub stdin: String,
    pub expected: String,
    pub visibility: Visibility,
}

/// A test case outcome recorded against a student's attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptTestCase {
    pub stdin: String,
    pub expected: String,
    pub got: String,
    pub correct: bool,
    pub visibility: Visibility,
}

/// Whether a test case is shown to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Show,
    Hide,
}
