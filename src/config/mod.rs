//! Application configuration module
//!
//! Configuration is read from environment variables with the `TRAILFIT`
//! prefix; nested values are separated by double underscores. Every section
//! has defaults, so an empty environment yields a single-process setup with
//! the in-memory broker.
//!
//! # Example
//!
//! ```no_run
//! use trailfit::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod broker;
mod error;
mod hrm;
mod server;
mod services;
mod telemetry;

pub use broker::{BrokerBackend, BrokerConfig};
pub use error::{ConfigError, ValidationError};
pub use hrm::HrmConfig;
pub use server::{Environment, ServerConfig};
pub use services::ServicesConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Listener, environment and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// Pub/sub backend and topic naming
    #[serde(default)]
    pub broker: BrokerConfig,

    /// Remote player and peripheral services
    #[serde(default)]
    pub services: ServicesConfig,

    /// HRM binding defaults
    #[serde(default)]
    pub hrm: HrmConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `TRAILFIT__<SECTION>__<KEY>`
    /// variables, e.g. `TRAILFIT__BROKER__URL=redis://localhost:6379`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRAILFIT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.broker.validate()?;
        self.services.validate()?;
        self.hrm.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
