//! Configuration module for RideWise.
//!
//! Structured configuration loaded from environment variables, organized by
//! concern: HTTP server, model artifacts and the LLM feature extractor.

mod llm_config;
mod model_config;
mod server_config;

pub use llm_config::LlmEnvConfig;
pub use model_config::{DEFAULT_MODEL_DIR, ModelEnvConfig};
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub models: ModelEnvConfig,
    pub llm: LlmEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparseable numbers fall back to their defaults; only a listen address
    /// that cannot form a socket address is an error.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server: ServerEnvConfig::from_env(),
            models: ModelEnvConfig::from_env(),
            llm: LlmEnvConfig::from_env(),
        };
        config.socket_addr()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = self.server.listen_address();
        addr.parse::<SocketAddr>()
            .with_context(|| format!("Invalid listen address: {}", addr))
    }
}
