//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables
//!     → loader.rs (read & coerce)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → passed by value to server construction
//! ```
//!
//! # Design Decisions
//! - One environment variable per backend service address, required,
//!   fail-fast when absent
//! - Config is immutable once loaded; no hot reload
//! - Validation separates syntactic (parsing) from semantic checks and
//!   reports every error, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{BackendsConfig, GatewayConfig, ListenerConfig, TimeoutConfig};
