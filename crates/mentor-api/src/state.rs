//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository traits, but AppState pins them to
//! the concrete infra implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mentor_core::backend::registry::BackendRegistry;
use mentor_core::chat::service::ChatService;
use mentor_core::dispatch::ActionService;
use mentor_infra::backends::registry_builder::build_registry;
use mentor_infra::config::load_settings;
use mentor_infra::sqlite::chat::SqliteChatRepository;
use mentor_infra::sqlite::event::SqliteEventRepository;
use mentor_infra::sqlite::pool::DatabasePool;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteActionService = ActionService<SqliteEventRepository, SqliteChatRepository>;

pub type ConcreteChatService = ChatService<SqliteChatRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub action_service: Arc<ConcreteActionService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub registry: Arc<BackendRegistry>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load settings, connect to the DB,
    /// instantiate the configured adapters, wire services.
    pub async fn init(config_path: &Path, database_url: Option<String>) -> anyhow::Result<Self> {
        let settings = load_settings(config_path).await?;

        let db_url = match database_url {
            Some(url) => url,
            None => {
                let data_dir = std::env::var("MENTOR_DATA_DIR").unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                    format!("{home}/.mentor")
                });
                tokio::fs::create_dir_all(&data_dir).await?;
                format!("sqlite://{data_dir}/mentor.db?mode=rwc")
            }
        };
        let db_pool = DatabasePool::new(&db_url).await?;

        // Adapter instantiation is a required startup step: a registry left
        // empty would turn every request into a fallback reply.
        let registry = Arc::new(build_registry(&settings)?);

        let action_service = ActionService::new(
            SqliteEventRepository::new(db_pool.clone()),
            SqliteChatRepository::new(db_pool.clone()),
            registry.clone(),
            Duration::from_secs(settings.reply_timeout_secs),
        );
        let chat_service = ChatService::new(SqliteChatRepository::new(db_pool.clone()));

        Ok(Self {
            action_service: Arc::new(action_service),
            chat_service: Arc::new(chat_service),
            registry,
            db_pool,
        })
    }
}
