//! Course backend adapter configuration types.
//!
//! `BackendSettings` is the startup configuration that drives routing: a list
//! of adapter descriptors (which backends exist and how to reach them) and a
//! course mapping (which course talks to which backend by name). Both are
//! loaded once at process start and read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Integration style of a configured course backend.
///
/// Closed set: adding a new integration style means adding a variant here and
/// a constructor arm in the registry builder; the registry and dispatch logic
/// are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    /// A course backend speaking the process-event HTTP protocol
    /// (`POST /api/process_action`, `GET /api/status/check_availability`).
    Remote,
    /// A direct OpenAI-compatible chat-completions endpoint.
    OpenaiCompat,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterKind::Remote => write!(f, "remote"),
            AdapterKind::OpenaiCompat => write!(f, "openai_compat"),
        }
    }
}

impl FromStr for AdapterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(AdapterKind::Remote),
            "openai_compat" => Ok(AdapterKind::OpenaiCompat),
            other => Err(format!("invalid adapter kind: '{other}'")),
        }
    }
}

/// Static description of one configured course backend.
///
/// Built from startup configuration; immutable after load. `name` is the
/// unique key the course mapping refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterDescriptor {
    pub name: String,
    pub kind: AdapterKind,
    pub endpoint: Url,
    /// Model identifier, required for `openai_compat` backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Environment variable holding the API key, for backends that need one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// System instruction override for `openai_compat` backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

/// Routing configuration loaded once at startup.
///
/// The course mapping may reference adapter names that are not in `adapters`;
/// such dangling references are deliberately not validated here and surface
/// as resolution failures at request time.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub adapters: Vec<AdapterDescriptor>,
    pub course_mapping: HashMap<i64, String>,
    pub reply_timeout_secs: u64,
}

impl BackendSettings {
    /// Upper bound on one backend invocation before it is treated as failed.
    pub const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 30;
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            adapters: Vec::new(),
            course_mapping: HashMap::new(),
            reply_timeout_secs: Self::DEFAULT_REPLY_TIMEOUT_SECS,
        }
    }
}
