//! Application configuration loaded from the environment

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// SeaORM connection string, e.g. `sqlite://bibliotek.db?mode=rwc`
    pub database_url: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Exact origins allowed by CORS; empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://bibliotek.db?mode=rwc".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            database_url,
            port,
            cors_allowed_origins,
        }
    }
}
