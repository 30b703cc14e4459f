//! Shared utilities for integration testing: recording backend mocks.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::StatusCode;

use raffle_gateway::backend::*;

/// User service mock that records invocations and serves canned data.
#[derive(Default)]
pub struct MockUserService {
    /// When set, every call fails with a backend status error.
    pub fail: bool,

    pub user: UserResponse,

    pub login_calls: AtomicU32,
    pub get_calls: AtomicU32,
    pub update_calls: AtomicU32,
    pub project_calls: AtomicU32,
    pub wallet_calls: AtomicU32,

    pub last_login: Mutex<Option<LoginUserRequest>>,
    pub last_update: Mutex<Option<UpdateUserRequest>>,
    pub last_wallet: Mutex<Option<CreateUserWalletRequest>>,
    pub last_user_project: Mutex<Option<CreateUserProjectRequest>>,
}

impl MockUserService {
    fn check(&self) -> Result<(), BackendError> {
        if self.fail {
            Err(BackendError::Status(StatusCode::SERVICE_UNAVAILABLE))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn login_user(&self, req: LoginUserRequest) -> Result<UserResponse, BackendError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_login.lock().unwrap() = Some(req);
        self.check()?;
        Ok(self.user.clone())
    }

    async fn get_user(&self, req: GetUserRequest) -> Result<UserResponse, BackendError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(UserResponse {
            user_id: req.user_id,
            ..self.user.clone()
        })
    }

    async fn update_user(&self, req: UpdateUserRequest) -> Result<UserResponse, BackendError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_update.lock().unwrap() = Some(req.clone());
        self.check()?;
        Ok(UserResponse {
            user_id: req.user_id,
            telegram_id: req.telegram_id,
            discord_id: req.discord_id,
            twitter_id: req.twitter_id,
            ..self.user.clone()
        })
    }

    async fn create_user_project(
        &self,
        req: CreateUserProjectRequest,
    ) -> Result<UserProjectResponse, BackendError> {
        self.project_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_project.lock().unwrap() = Some(req.clone());
        self.check()?;
        Ok(UserProjectResponse {
            user_id: req.user_id,
            project_id: req.project_id,
            chain_id: req.chain_id,
            address: req.address,
        })
    }

    async fn get_user_project(
        &self,
        req: GetUserProjectRequest,
    ) -> Result<UserProjectsResponse, BackendError> {
        self.project_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(UserProjectsResponse {
            projects: vec![UserProjectResponse {
                user_id: req.user_id,
                project_id: 1,
                chain_id: 1,
                address: "0xabc".into(),
            }],
        })
    }

    async fn create_user_wallet(
        &self,
        req: CreateUserWalletRequest,
    ) -> Result<UserWalletResponse, BackendError> {
        self.wallet_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_wallet.lock().unwrap() = Some(req.clone());
        self.check()?;
        Ok(UserWalletResponse { wallet: req.wallet })
    }

    async fn get_user_wallet(
        &self,
        req: GetUserWalletRequest,
    ) -> Result<UserWalletsResponse, BackendError> {
        self.wallet_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(UserWalletsResponse {
            wallets: vec![UserWallet {
                user_id: req.user_id,
                chain_id: 1,
                address: "0xabc".into(),
            }],
        })
    }
}

/// Project service mock, same recording scheme.
#[derive(Default)]
pub struct MockProjectService {
    pub fail: bool,

    pub project: ProjectResponse,

    pub create_calls: AtomicU32,
    pub get_calls: AtomicU32,
    pub list_calls: AtomicU32,
    pub update_calls: AtomicU32,
}

impl MockProjectService {
    fn check(&self) -> Result<(), BackendError> {
        if self.fail {
            Err(BackendError::Status(StatusCode::SERVICE_UNAVAILABLE))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProjectService for MockProjectService {
    async fn create_project(
        &self,
        req: CreateProjectRequest,
    ) -> Result<ProjectResponse, BackendError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(ProjectResponse {
            project_id: self.project.project_id,
            project_name: req.project_name,
            chain_id: req.chain_id,
            raffle_contract: req.raffle_contract,
        })
    }

    async fn get_all_projects(&self) -> Result<ProjectsResponse, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(ProjectsResponse {
            projects: vec![self.project.clone()],
        })
    }

    async fn get_project(&self, req: GetProjectRequest) -> Result<ProjectResponse, BackendError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(ProjectResponse {
            project_id: req.project_id,
            ..self.project.clone()
        })
    }

    async fn update_project(
        &self,
        req: UpdateProjectRequest,
    ) -> Result<ProjectResponse, BackendError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(ProjectResponse {
            project_id: req.project_id,
            ..self.project.clone()
        })
    }
}
