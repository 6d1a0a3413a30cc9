//! Configuration management for the HealthStride client
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: HS__)

use anyhow::Result;
use healthstride_shared::UnitSystem;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API, e.g. `http://localhost:8080/api`
    pub base_url: String,
}

/// Where the selected user is remembered between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub state_file: PathBuf,
}

/// Presentation preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub units: UnitSystem,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080/api".to_string(),
            },
            session: SessionConfig {
                state_file: default_state_file(),
            },
            display: DisplayConfig::default(),
        }
    }
}

/// `<data dir>/healthstride/session.json`, or a local dot-directory when the
/// platform has no data dir
fn default_state_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("healthstride"))
        .unwrap_or_else(|| PathBuf::from(".healthstride"))
        .join("session.json")
}

impl ClientConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with HS__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&ClientConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (HS__ prefix)
            // e.g., HS__API__BASE_URL=http://api:8080/api sets api.base_url
            .add_source(config::Environment::with_prefix("HS").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
