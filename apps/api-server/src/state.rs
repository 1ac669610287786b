//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    BlobStorage, PostRepository, TagRepository, TextCompletion, TokenService, UserRepository,
};
use quill_core::services::{AssistantService, ContentService, CredentialService, DashboardService};
use quill_infra::{
    Argon2PasswordService, GeminiCompletion, InMemoryPostRepository, InMemoryTagRepository,
    InMemoryUserRepository, JwtTokenService, LocalBlobStorage, SyntheticEngagement,
    UnavailableCompletion,
};

#[cfg(feature = "postgres")]
use quill_infra::{
    DatabaseConfig, DatabaseConnections, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn TokenService>,
    pub credentials: Arc<CredentialService>,
    pub content: Arc<ContentService>,
    pub dashboard: Arc<DashboardService>,
    pub assistant: Arc<AssistantService>,
    /// Which repository backend is active, reported by the health check.
    pub storage: &'static str,
    pub max_image_bytes: usize,
}

/// Port implementations the services are wired from.
pub struct Adapters {
    pub users: Arc<dyn UserRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub blobs: Arc<dyn BlobStorage>,
    pub completion: Arc<dyn TextCompletion>,
    pub tokens: Arc<dyn TokenService>,
    pub storage: &'static str,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    tags: Arc<dyn TagRepository>,
    posts: Arc<dyn PostRepository>,
    storage: &'static str,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            tags: Arc::new(InMemoryTagRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            storage: "memory",
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &DatabaseConfig, run_migrations: bool) -> Option<Self> {
        use migration::{Migrator, MigratorTrait};

        let connections = match DatabaseConnections::init(config).await {
            Ok(connections) => connections,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return None;
            }
        };

        if run_migrations {
            if let Err(e) = Migrator::up(&connections.main, None).await {
                tracing::error!("Migrations failed: {}. Using in-memory fallback.", e);
                return None;
            }
            tracing::info!("Database migrations applied");
        }

        let db = connections.main;
        Some(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db)),
            storage: "postgres",
        })
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let repositories = match &config.database {
            Some(db_config) => Repositories::connect(db_config, config.run_migrations)
                .await
                .unwrap_or_else(Repositories::in_memory),
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Repositories::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repositories = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        let completion: Arc<dyn TextCompletion> = match GeminiCompletion::new(config.gemini.clone()) {
            Ok(Some(client)) => Arc::new(client),
            Ok(None) => {
                tracing::warn!("GEMINI_API_KEY not set. Assistant endpoints will fail.");
                Arc::new(UnavailableCompletion)
            }
            Err(e) => {
                tracing::error!("Failed to build completion client: {}", e);
                Arc::new(UnavailableCompletion)
            }
        };

        let adapters = Adapters {
            users: repositories.users,
            tags: repositories.tags,
            posts: repositories.posts,
            blobs: Arc::new(LocalBlobStorage::new(config.uploads.clone())),
            completion,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            storage: repositories.storage,
        };

        let state = Self::from_adapters(adapters, config.uploads.max_bytes);
        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }

    /// Wire services from explicit adapters.
    pub fn from_adapters(adapters: Adapters, max_image_bytes: usize) -> Self {
        let content = Arc::new(ContentService::new(
            adapters.posts,
            adapters.tags,
            adapters.users.clone(),
            adapters.blobs,
        ));

        Self {
            tokens: adapters.tokens,
            credentials: Arc::new(CredentialService::new(
                adapters.users,
                Arc::new(Argon2PasswordService::new()),
            )),
            dashboard: Arc::new(DashboardService::new(
                content.clone(),
                Arc::new(SyntheticEngagement),
            )),
            assistant: Arc::new(AssistantService::new(adapters.completion)),
            content,
            storage: adapters.storage,
            max_image_bytes,
        }
    }
}
