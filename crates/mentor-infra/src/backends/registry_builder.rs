//! Registry assembly from startup configuration.
//!
//! Instantiating one adapter per configured descriptor is an explicit,
//! required startup step: a registry that silently comes up empty would turn
//! every request into a fallback reply. Unknown kinds cannot occur (the kind
//! set is closed), but a missing API key or model fails startup here rather
//! than at request time.

use std::time::Duration;

use secrecy::SecretString;
use tracing::info;

use mentor_core::backend::boxed::BoxCourseBackend;
use mentor_core::backend::registry::BackendRegistry;
use mentor_types::backend::{AdapterDescriptor, AdapterKind, BackendSettings};
use mentor_types::error::ConfigError;

use super::direct::OpenAiCompatBackend;
use super::remote::RemoteCourseBackend;

/// Build a populated `BackendRegistry` from settings.
///
/// Course mapping entries pointing at names not in the adapter list are left
/// as-is; they surface as resolution failures at request time.
pub fn build_registry(settings: &BackendSettings) -> Result<BackendRegistry, ConfigError> {
    let mut registry = BackendRegistry::new(settings.course_mapping.clone());
    let request_timeout = Duration::from_secs(settings.reply_timeout_secs);

    for descriptor in &settings.adapters {
        let backend = instantiate(descriptor, request_timeout)?;
        info!(
            adapter = %descriptor.name,
            kind = %descriptor.kind,
            endpoint = %descriptor.endpoint,
            "registered course backend"
        );
        registry.register(descriptor.name.clone(), backend);
    }

    Ok(registry)
}

fn instantiate(
    descriptor: &AdapterDescriptor,
    request_timeout: Duration,
) -> Result<BoxCourseBackend, ConfigError> {
    match descriptor.kind {
        AdapterKind::Remote => {
            let backend =
                RemoteCourseBackend::new(&descriptor.name, &descriptor.endpoint, request_timeout)?;
            Ok(BoxCourseBackend::new(backend))
        }
        AdapterKind::OpenaiCompat => {
            let model = descriptor.model.as_ref().ok_or_else(|| {
                ConfigError::MissingField {
                    adapter: descriptor.name.clone(),
                    field: "model".to_string(),
                }
            })?;
            let env = descriptor.api_key_env.as_ref().ok_or_else(|| {
                ConfigError::MissingField {
                    adapter: descriptor.name.clone(),
                    field: "api_key_env".to_string(),
                }
            })?;
            let api_key = std::env::var(env).map_err(|_| ConfigError::MissingApiKey {
                adapter: descriptor.name.clone(),
                env: env.clone(),
            })?;

            let backend = OpenAiCompatBackend::new(
                &descriptor.name,
                &descriptor.endpoint,
                model,
                SecretString::from(api_key),
                descriptor.system_prompt.clone(),
            );
            Ok(BoxCourseBackend::new(backend))
        }
    }
}
