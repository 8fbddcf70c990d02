// Settings module for configuration
//
// This module defines the settings structure and the layered loading of
// defaults, an optional TOML file and `DESK3_*` environment variables.

use serde::{Deserialize, Serialize};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use anyhow::{bail, Result};

/// Environment variable prefix for all settings
pub const ENV_PREFIX: &str = "DESK3";

/// Environment variable holding the Desk3 API key
pub const API_KEY_VAR: &str = "DESK3_API_KEY";

/// Settings for the outbound Desk3 API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    /// Base URL every operation path is appended to
    pub base_url: String,
    /// Request timeout in seconds; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: crate::defaults::UPSTREAM_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Server settings for the SSE transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Enable CORS
    pub cors_enabled: bool,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: crate::defaults::SERVER_HOST.to_string(),
            port: crate::defaults::SERVER_PORT,
            workers: num_cpus::get(),
            cors_enabled: false,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Complete settings for the MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Environment (development, staging, production)
    pub environment: String,
    /// Log level
    pub log_level: String,
    /// Desk3 API key sent with every upstream request
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Upstream API settings
    pub upstream: UpstreamSettings,
    /// Server settings
    pub server: ServerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            api_key: String::new(),
            upstream: UpstreamSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

/// Builder pre-populated with the built-in defaults
pub(crate) fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    let d = Settings::default();
    let builder = Config::builder()
        .set_default("environment", d.environment)?
        .set_default("log_level", d.log_level)?
        .set_default("upstream.base_url", d.upstream.base_url)?
        .set_default("server.host", d.server.host)?
        .set_default("server.port", i64::from(d.server.port))?
        .set_default("server.workers", d.server.workers as i64)?
        .set_default("server.cors_enabled", d.server.cors_enabled)?
        .set_default("server.cors_origins", d.server.cors_origins)?;
    Ok(builder)
}

/// Load settings: defaults, then the optional file, then the environment
pub fn load(path: &str) -> Result<Settings> {
    let builder = defaults()?
        .add_source(File::new(path, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );
    build(builder)
}

/// Finalize a builder into validated settings
pub(crate) fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Check the invariants the rest of the server relies on
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("Missing {} environment variable", API_KEY_VAR);
        }
        if let Err(e) = url::Url::parse(&self.upstream.base_url) {
            bail!("Invalid upstream base URL '{}': {}", self.upstream.base_url, e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_api_key_are_rejected() {
        let err = build(defaults().unwrap()).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_defaults_with_api_key() {
        let builder = defaults().unwrap().set_override("api_key", "secret").unwrap();
        let settings = build(builder).unwrap();

        assert_eq!(settings.api_key, "secret");
        assert_eq!(settings.upstream.base_url, "https://mcp.desk3.io/v1");
        assert_eq!(settings.upstream.timeout_secs, None);
        assert_eq!(settings.server.port, 8100);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert!(!settings.server.cors_enabled);
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let builder = defaults().unwrap().set_override("api_key", "   ").unwrap();
        assert!(build(builder).is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("desk3-mcp-{}.toml", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            "log_level = \"debug\"\n\n[server]\nport = 9200\n\n[upstream]\nbase_url = \"http://127.0.0.1:1234\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let builder = defaults()
            .unwrap()
            .add_source(File::new(path.to_str().unwrap(), FileFormat::Toml))
            .set_override("api_key", "k")
            .unwrap();
        let settings = build(builder).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.server.port, 9200);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.upstream.base_url, "http://127.0.0.1:1234");
        assert_eq!(settings.upstream.timeout_secs, Some(5));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let builder = defaults()
            .unwrap()
            .set_override("api_key", "k")
            .unwrap()
            .set_override("upstream.base_url", "not a url")
            .unwrap();
        assert!(build(builder).is_err());
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let settings = Settings {
            api_key: "secret".to_string(),
            ..Settings::default()
        };
        let rendered = serde_json::to_string(&settings).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
