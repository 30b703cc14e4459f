//! Configuration validation.
//!
//! Semantic checks on an already-loaded config. Pure function; returns
//! every error, not just the first.

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bind address {0:?} is not a valid socket address")]
    BadBindAddress(String),

    #[error("{name} address {value:?} is not a valid host:port authority")]
    BadBackendAddress { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate the whole config, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (name, value) in [
        ("user service", &config.backends.user_service_addr),
        ("project service", &config.backends.project_service_addr),
    ] {
        let valid = Authority::from_str(value)
            .map(|authority| authority.port_u16().is_some())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::BadBackendAddress {
                name,
                value: value.clone(),
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request timeout"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect timeout"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
