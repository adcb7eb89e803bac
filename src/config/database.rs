use crate::config::env_or;
use crate::core::{AppError, Result};
use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Where entities are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    MySql,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(StorageBackend::MySql),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::Configuration(format!(
                "Invalid STORAGE_BACKEND '{}', expected 'mysql' or 'memory'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: Option<String>,
    pub pool_size: u32,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let backend = env_or("STORAGE_BACKEND", StorageBackend::MySql)?;

        let url = match backend {
            StorageBackend::MySql => Some(
                env::var("DATABASE_URL")
                    .map_err(|_| AppError::Configuration("DATABASE_URL not set".to_string()))?,
            ),
            StorageBackend::Memory => env::var("DATABASE_URL").ok(),
        };

        Ok(DatabaseConfig {
            backend,
            url,
            pool_size: env_or("DATABASE_POOL_SIZE", 5)?,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 20)?,
            run_migrations: env_or("DATABASE_RUN_MIGRATIONS", true)?,
        })
    }

    /// Process-local storage, no database needed
    pub fn memory() -> Self {
        DatabaseConfig {
            backend: StorageBackend::Memory,
            url: None,
            pool_size: 5,
            max_connections: 20,
            run_migrations: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }

        if self.pool_size > self.max_connections {
            return Err(AppError::Configuration(format!(
                "DATABASE_POOL_SIZE ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                self.pool_size, self.max_connections
            )));
        }

        if self.backend == StorageBackend::MySql && self.url.is_none() {
            return Err(AppError::Configuration("DATABASE_URL not set".to_string()));
        }

        Ok(())
    }

    /// Create a MySQL connection pool
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::Configuration("DATABASE_URL not set".to_string()))?;

        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600)) // 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // 30 minutes
            .test_before_acquire(true)
            .connect(url)
            .await
            .map_err(AppError::Database)
    }
}
