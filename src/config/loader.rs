//! Configuration loading from the environment.

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the user service address. Required.
pub const USER_SERVICE_ADDR: &str = "USER_SERVICE_ADDR";
/// Environment variable naming the project service address. Required.
pub const PROJECT_SERVICE_ADDR: &str = "PROJECT_SERVICE_ADDR";
/// Optional listener port override.
pub const PORT: &str = "PORT";
/// Optional request timeout override, in seconds.
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    BadValue { name: &'static str, value: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

impl GatewayConfig {
    /// Load and validate the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = GatewayConfig::default();

        config.backends.user_service_addr = require_env(USER_SERVICE_ADDR)?;
        config.backends.project_service_addr = require_env(PROJECT_SERVICE_ADDR)?;

        if let Ok(port) = std::env::var(PORT) {
            if !port.is_empty() {
                port.parse::<u16>().map_err(|_| ConfigError::BadValue {
                    name: PORT,
                    value: port.clone(),
                })?;
                config.listener.bind_address = format!("0.0.0.0:{port}");
            }
        }

        if let Ok(secs) = std::env::var(REQUEST_TIMEOUT_SECS) {
            if !secs.is_empty() {
                config.timeouts.request_secs =
                    secs.parse().map_err(|_| ConfigError::BadValue {
                        name: REQUEST_TIMEOUT_SECS,
                        value: secs.clone(),
                    })?;
            }
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
