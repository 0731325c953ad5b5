//! Configuration management for the AgroLens risk service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGROLENS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather data provider configuration
    pub weather: ProviderConfig,

    /// Satellite data provider configuration
    pub satellite: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Configuration shared by the external data providers.
///
/// The timeout doubles as the hard per-request deadline: a provider that
/// exceeds it fails the assessment, with no retries in this service.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider API endpoint
    pub api_endpoint: String,

    /// Provider API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGROLENS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_seconds", 10)?
            .set_default(
                "satellite.api_endpoint",
                "https://api.agromonitoring.com/agro/1.0",
            )?
            .set_default("satellite.api_key", "")?
            .set_default("satellite.timeout_seconds", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGROLENS_ prefix)
            .add_source(
                Environment::with_prefix("AGROLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            host: "0.0.0.0".to_string(),
        }
    }
}
