//! Long-lived backend channels and the service client stubs.
//!
//! # Responsibilities
//! - Establish one connection handle per backend at startup, fail-fast
//! - Issue JSON-over-HTTP calls, one POST per RPC method
//! - Decode typed responses; surface every failure as [`BackendError`]
//!
//! # Design Decisions
//! - hyper's pooled legacy client is the channel: cheap to clone, safe to
//!   share across concurrently dispatched requests
//! - A TCP probe at startup turns an unreachable backend into a fatal
//!   configuration error instead of a per-request surprise
//! - Error detail stays server-side; dispatch handlers collapse it to a
//!   fixed diagnostic for callers

use std::str::FromStr;
use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{header, Request, StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::backend::messages::*;
use crate::backend::{ProjectService, UserService};
use async_trait::async_trait;

/// Largest backend response body the gateway will buffer.
const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// Error talking to a backend service.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend address {0:?}")]
    InvalidAddress(String),

    #[error("backend {addr} unreachable: {reason}")]
    Unreachable { addr: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("building request failed: {0}")]
    Http(#[from] axum::http::Error),

    #[error("backend returned status {0}")]
    Status(StatusCode),

    #[error("reading response body failed: {0}")]
    Body(#[from] axum::Error),

    #[error("message encode/decode failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A long-lived connection handle to one backend service.
///
/// Cloning is cheap and clones share the underlying pool.
#[derive(Clone, Debug)]
pub struct RpcChannel {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl RpcChannel {
    /// Validate `addr`, probe it within `connect_timeout`, and return the
    /// channel. Startup calls this once per backend and treats any error
    /// as fatal.
    pub async fn connect(addr: &str, connect_timeout: Duration) -> Result<Self, BackendError> {
        let authority = Authority::from_str(addr)
            .map_err(|_| BackendError::InvalidAddress(addr.to_string()))?;
        if authority.port_u16().is_none() {
            return Err(BackendError::InvalidAddress(addr.to_string()));
        }

        let probe = tokio::time::timeout(
            connect_timeout,
            tokio::net::TcpStream::connect(authority.as_str()),
        )
        .await;
        match probe {
            Ok(Ok(_stream)) => {}
            Ok(Err(err)) => {
                return Err(BackendError::Unreachable {
                    addr: addr.to_string(),
                    reason: err.to_string(),
                })
            }
            Err(_elapsed) => {
                return Err(BackendError::Unreachable {
                    addr: addr.to_string(),
                    reason: "connect timed out".to_string(),
                })
            }
        }

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        tracing::info!(backend = %addr, "backend channel established");
        Ok(Self { client, authority })
    }

    /// Issue one RPC: POST the JSON-encoded request to `/rpc/{method}` and
    /// decode the JSON response.
    pub async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let uri = Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(format!("/rpc/{method}"))
            .build()?;

        let body = serde_json::to_vec(request)?;
        let http_request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))?;

        let response = self.client.request(http_request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        let bytes =
            axum::body::to_bytes(Body::new(response.into_body()), MAX_RESPONSE_BYTES).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// User service stub over an [`RpcChannel`].
#[derive(Clone)]
pub struct UserServiceClient {
    channel: RpcChannel,
}

impl UserServiceClient {
    pub fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl UserService for UserServiceClient {
    async fn login_user(&self, req: LoginUserRequest) -> Result<UserResponse, BackendError> {
        self.channel.call("LoginUser", &req).await
    }

    async fn get_user(&self, req: GetUserRequest) -> Result<UserResponse, BackendError> {
        self.channel.call("GetUser", &req).await
    }

    async fn update_user(&self, req: UpdateUserRequest) -> Result<UserResponse, BackendError> {
        self.channel.call("UpdateUser", &req).await
    }

    async fn create_user_project(
        &self,
        req: CreateUserProjectRequest,
    ) -> Result<UserProjectResponse, BackendError> {
        self.channel.call("CreateUserProject", &req).await
    }

    async fn get_user_project(
        &self,
        req: GetUserProjectRequest,
    ) -> Result<UserProjectsResponse, BackendError> {
        self.channel.call("GetUserProject", &req).await
    }

    async fn create_user_wallet(
        &self,
        req: CreateUserWalletRequest,
    ) -> Result<UserWalletResponse, BackendError> {
        self.channel.call("CreateUserWallet", &req).await
    }

    async fn get_user_wallet(
        &self,
        req: GetUserWalletRequest,
    ) -> Result<UserWalletsResponse, BackendError> {
        self.channel.call("GetUserWallet", &req).await
    }
}

/// Project service stub over an [`RpcChannel`].
#[derive(Clone)]
pub struct ProjectServiceClient {
    channel: RpcChannel,
}

impl ProjectServiceClient {
    pub fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ProjectService for ProjectServiceClient {
    async fn create_project(
        &self,
        req: CreateProjectRequest,
    ) -> Result<ProjectResponse, BackendError> {
        self.channel.call("CreateProject", &req).await
    }

    async fn get_all_projects(&self) -> Result<ProjectsResponse, BackendError> {
        self.channel.call("GetAllProjects", &serde_json::json!({})).await
    }

    async fn get_project(&self, req: GetProjectRequest) -> Result<ProjectResponse, BackendError> {
        self.channel.call("GetProject", &req).await
    }

    async fn update_project(
        &self,
        req: UpdateProjectRequest,
    ) -> Result<ProjectResponse, BackendError> {
        self.channel.call("UpdateProject", &req).await
    }
}
