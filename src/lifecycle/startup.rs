//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration (or fall back to defaults)
//! - Bind the listener once everything else is ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::path::Path;

use tokio::net::TcpListener;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, ListenerConfig, ServerConfig};

/// Load the config file if one was given, otherwise use defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ServerConfig::default()),
    }
}

/// Load the config, apply a bind address override and validate the result.
pub fn load_with_bind_override(
    path: Option<&Path>,
    bind: Option<String>,
) -> Result<ServerConfig, ConfigError> {
    let mut config = load_or_default(path)?;
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

/// Bind the TCP listener described by `config`.
pub async fn bind_listener(config: &ListenerConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok(listener)
}
