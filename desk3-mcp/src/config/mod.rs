// Configuration module for the MCP server
//
// This module handles loading the settings the server is constructed
// with. Settings are built once at startup and shared by reference.

mod settings;

pub use settings::{Settings, ServerSettings, UpstreamSettings, API_KEY_VAR, ENV_PREFIX};

use std::sync::Arc;
use crate::errors::ServerError;

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Load configuration from defaults, an optional file and the environment
pub fn load_config(path: Option<&str>) -> Result<Arc<Settings>, ServerError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    settings::load(config_path)
        .map(Arc::new)
        .map_err(|e| ServerError::Config(format!("Failed to load config: {}", e)))
}
