//! Gateway server setup.
//!
//! # Responsibilities
//! - Compose the route tree from every resource module
//! - Freeze the registry into the axum router
//! - Wire up middleware (tracing, request ID, timeout)
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Composition is synchronous and happens entirely before the listener
//!   starts accepting; a composition error aborts startup
//! - Handlers own their backend stubs through Arc'd closures, so the
//!   router needs no shared application state

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{manifest, project, user};
use crate::backend::{ProjectService, UserService};
use crate::config::GatewayConfig;
use crate::routing::{ComposeError, Registry, RouteNode};

/// The composed gateway: route tree plus the compiled axum router.
pub struct GatewayServer {
    router: Router,
    root: Arc<RouteNode>,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Build the full route tree and compile it. Runs once at startup,
    /// strictly before any connection is accepted.
    pub fn new(
        config: GatewayConfig,
        user_svc: Arc<dyn UserService>,
        project_svc: Arc<dyn ProjectService>,
    ) -> Result<Self, ComposeError> {
        let registry = Registry::new();

        let root = manifest::root_node();
        root.bind_root(&registry)?;

        user::register(&root, user_svc)?;
        project::register(&root, project_svc)?;

        let router = registry
            .into_router()
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Ok(Self {
            router,
            root,
            config,
        })
    }

    /// The compiled router. Cloning is cheap; tests drive this directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The root of the route tree.
    pub fn root(&self) -> &Arc<RouteNode> {
        &self.root
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
