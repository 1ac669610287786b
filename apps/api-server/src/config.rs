//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::{DatabaseConfig, GeminiConfig, JwtConfig, LocalBlobConfig, RateLimitConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations at startup.
    pub run_migrations: bool,
    pub jwt: JwtConfig,
    pub uploads: LocalBlobConfig,
    pub gemini: GeminiConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            run_migrations: env::var("DB_RUN_MIGRATIONS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            jwt: JwtConfig::from_env(),
            uploads: LocalBlobConfig::from_env(),
            gemini: GeminiConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
