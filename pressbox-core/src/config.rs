//! Database configuration
//!
//! The connection target defaults to the local development database and
//! can be overridden with `DATABASE_URL`. Pool size and assembly fan-out
//! width carry their own env knobs.

use std::env;

/// Local development database, used when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/pressbox";

/// Default maximum connections for the pool.
/// Kept low for a single-application backend.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default cap on concurrent per-post assembly queries during listings.
const DEFAULT_ASSEMBLY_CONCURRENCY: usize = 8;

/// Configuration for the database layer
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub assembly_concurrency: usize,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            assembly_concurrency: DEFAULT_ASSEMBLY_CONCURRENCY,
        }
    }
}

impl DbConfig {
    /// Load configuration from the environment, reading a `.env` file
    /// first if one is present.
    ///
    /// Recognized variables:
    /// - `DATABASE_URL`
    /// - `PRESSBOX_MAX_CONNECTIONS`
    /// - `PRESSBOX_ASSEMBLY_CONCURRENCY`
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(max) = env::var("PRESSBOX_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_connections = max;
        }

        if let Some(cap) = env::var("PRESSBOX_ASSEMBLY_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.assembly_concurrency = cap;
        }

        config
    }
}
