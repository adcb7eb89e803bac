use crate::config::env_or;
use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Server configuration for HTTP server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            workers: default_workers(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("SERVER_PORT", 8080)?,
            workers: env_or("SERVER_WORKERS", default_workers())?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::Configuration(
                "SERVER_PORT must be greater than 0".to_string(),
            ));
        }

        if self.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// 2x CPU cores for I/O-bound workload
fn default_workers() -> usize {
    num_cpus::get() * 2
}
