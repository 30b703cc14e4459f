//! Raffle front gateway.
//!
//! An HTTP gateway exposing a REST surface backed by remote procedure
//! services.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                   GATEWAY                     │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│ server  │──▶│ routing  │──▶│    api    │  │
//!                    │  │ (axum)  │   │  (tree)  │   │ dispatch  │  │
//!                    │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                    │                                     │        │
//!   Client Response  │                               ┌─────▼─────┐  │     Backend
//!   ◀────────────────┼───────────────────────────────│  backend  │◀─┼──── Services
//!                    │                               │  channels │  │
//!                    │                               └───────────┘  │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │  config (env)  ·  tracing  ·  request-id │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! At startup a root node is bound to the route registry, each resource
//! module attaches its subtree, and the registry is frozen into the axum
//! router. At request time axum matches path and method directly; only
//! the manifest endpoint walks the tree.

pub mod api;
pub mod backend;
pub mod config;
pub mod routing;
pub mod server;

pub use config::GatewayConfig;
pub use routing::{ComposeError, RouteNode};
pub use server::GatewayServer;
