//! Route composition subsystem.
//!
//! # Data Flow
//! ```text
//! Startup composition (single-threaded):
//!     RouteNode::new(subpath, methods, handler)   — detached node
//!     → parent.add(&child)                        — validate, attach,
//!                                                   derive child scope,
//!                                                   register handler
//!     → Registry::into_router()                   — freeze as axum::Router
//!
//! Request time:
//!     axum matches path + method directly against the compiled router;
//!     the node tree is only walked by the manifest handler.
//! ```
//!
//! # Design Decisions
//! - Tree is mutated only during startup, immutable once the router is built
//! - Parent links are weak; ownership lives in the children vector
//! - A leaf handler is exposed twice: at its own scope root and at the
//!   parent scope under the literal subpath
//! - Composition failures abort startup rather than degrade routing

pub mod node;
pub mod registry;

pub use node::{ComposeError, RouteHandler, RouteNode};
pub use registry::{Registry, Scope};
