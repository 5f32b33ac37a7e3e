//! Startup configuration loader for Mentor.
//!
//! Reads a TOML file into [`BackendSettings`]. The file names the available
//! course backends and maps courses onto them:
//!
//! ```toml
//! reply_timeout_secs = 30
//!
//! [[adapters]]
//! name = "algo-backend"
//! kind = "remote"
//! endpoint = "http://tutor.example.edu:8000"
//!
//! [[adapters]]
//! name = "llm-backend"
//! kind = "openai_compat"
//! endpoint = "https://api.studio.nebius.com/v1"
//! model = "Qwen/Qwen2.5-Coder-32B-Instruct-fast"
//! api_key_env = "MENTOR_LLM_KEY"
//!
//! [course_mapping]
//! 7 = "algo-backend"
//! 12 = "llm-backend"
//! ```
//!
//! Unlike most optional settings, a missing file is an error: without a
//! course mapping the service cannot route anything. Cross-references from
//! the mapping to adapter names are deliberately NOT validated here -- they
//! surface at resolution time.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use mentor_types::backend::{AdapterDescriptor, BackendSettings};
use mentor_types::error::ConfigError;

/// Raw TOML shape. Course mapping keys arrive as strings (TOML table keys)
/// and are parsed into numeric course ids below.
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    adapters: Vec<AdapterDescriptor>,
    #[serde(default)]
    course_mapping: HashMap<String, String>,
    #[serde(default = "default_reply_timeout")]
    reply_timeout_secs: u64,
}

fn default_reply_timeout() -> u64 {
    BackendSettings::DEFAULT_REPLY_TIMEOUT_SECS
}

/// Load routing settings from a TOML file.
pub async fn load_settings(path: &Path) -> Result<BackendSettings, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            detail: err.to_string(),
        })?;

    let raw: RawSettings =
        toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;

    let mut course_mapping = HashMap::with_capacity(raw.course_mapping.len());
    for (course, name) in raw.course_mapping {
        let course_id: i64 = course
            .parse()
            .map_err(|_| ConfigError::InvalidCourseId(course.clone()))?;
        course_mapping.insert(course_id, name);
    }

    Ok(BackendSettings {
        adapters: raw.adapters,
        course_mapping,
        reply_timeout_secs: raw.reply_timeout_secs,
    })
}
