use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use raffle_gateway::backend::{
    ProjectService, ProjectServiceClient, RpcChannel, UserService, UserServiceClient,
};
use raffle_gateway::{GatewayConfig, GatewayServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raffle_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("raffle-gateway v0.1.0 starting");

    // Load configuration from the environment; missing backend addresses
    // are fatal.
    let config = GatewayConfig::from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        user_service = %config.backends.user_service_addr,
        project_service = %config.backends.project_service_addr,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Establish the long-lived backend channels before building the tree.
    let connect_timeout = Duration::from_secs(config.timeouts.connect_secs);
    let user_channel =
        RpcChannel::connect(&config.backends.user_service_addr, connect_timeout).await?;
    let project_channel =
        RpcChannel::connect(&config.backends.project_service_addr, connect_timeout).await?;

    let user_svc: Arc<dyn UserService> = Arc::new(UserServiceClient::new(user_channel));
    let project_svc: Arc<dyn ProjectService> =
        Arc::new(ProjectServiceClient::new(project_channel));

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Compose the route tree and run the server
    let server = GatewayServer::new(config, user_svc, project_svc)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
