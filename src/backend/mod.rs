//! Backend service subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RpcChannel::connect(addr)   — probe + long-lived hyper client
//!     → UserServiceClient / ProjectServiceClient wrap the channel
//!     → shared via Arc<dyn UserService> / Arc<dyn ProjectService>
//!
//! Per request:
//!     dispatch handler builds the typed RPC request
//!     → exactly one channel.call per HTTP request, no retries
//!     → response forwarded verbatim, errors collapsed by the handler
//! ```
//!
//! # Design Decisions
//! - The gateway only knows the stub signatures; business logic and
//!   persistence live behind the services
//! - Channels are established once and shared across all in-flight
//!   requests; the transport multiplexes internally
//! - Cancellation rides on future drop: a disconnected client drops the
//!   handler future, aborting the in-flight call

pub mod client;
pub mod messages;

use async_trait::async_trait;

pub use client::{BackendError, ProjectServiceClient, RpcChannel, UserServiceClient};
pub use messages::*;

/// Stub signatures of the remote user service.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn login_user(&self, req: LoginUserRequest) -> Result<UserResponse, BackendError>;
    async fn get_user(&self, req: GetUserRequest) -> Result<UserResponse, BackendError>;
    async fn update_user(&self, req: UpdateUserRequest) -> Result<UserResponse, BackendError>;

    async fn create_user_project(
        &self,
        req: CreateUserProjectRequest,
    ) -> Result<UserProjectResponse, BackendError>;
    async fn get_user_project(
        &self,
        req: GetUserProjectRequest,
    ) -> Result<UserProjectsResponse, BackendError>;

    async fn create_user_wallet(
        &self,
        req: CreateUserWalletRequest,
    ) -> Result<UserWalletResponse, BackendError>;
    async fn get_user_wallet(
        &self,
        req: GetUserWalletRequest,
    ) -> Result<UserWalletsResponse, BackendError>;
}

/// Stub signatures of the remote project service.
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn create_project(
        &self,
        req: CreateProjectRequest,
    ) -> Result<ProjectResponse, BackendError>;
    async fn get_all_projects(&self) -> Result<ProjectsResponse, BackendError>;
    async fn get_project(&self, req: GetProjectRequest) -> Result<ProjectResponse, BackendError>;
    async fn update_project(
        &self,
        req: UpdateProjectRequest,
    ) -> Result<ProjectResponse, BackendError>;
}
