//! Wire messages exchanged with the backend services.
//!
//! These mirror the services' own message shapes one to one; the gateway
//! forwards responses verbatim and never reshapes fields.

use serde::{Deserialize, Serialize};

/// Login provider discriminator. Carried as a bare integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginType(pub i64);

impl LoginType {
    pub const TELEGRAM: LoginType = LoginType(0);
    pub const DISCORD: LoginType = LoginType(1);
    pub const TWITTER: LoginType = LoginType(2);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginUserRequest {
    pub user_id: String,
    pub login_type: LoginType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub user_id: i64,
    pub telegram_id: String,
    pub discord_id: String,
    pub twitter_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserResponse {
    pub user_id: i64,
    pub login_type: LoginType,
    pub telegram_id: String,
    pub discord_id: String,
    pub twitter_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub chain_id: i64,
    pub raffle_contract: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetProjectRequest {
    pub project_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateProjectRequest {
    pub project_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectResponse {
    pub project_id: i64,
    pub project_name: String,
    pub chain_id: i64,
    pub raffle_contract: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserProjectRequest {
    pub user_id: i64,
    pub project_id: i64,
    pub chain_id: i64,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserProjectRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProjectResponse {
    pub user_id: i64,
    pub project_id: i64,
    pub chain_id: i64,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProjectsResponse {
    pub projects: Vec<UserProjectResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserWallet {
    pub user_id: i64,
    pub chain_id: i64,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserWalletRequest {
    pub wallet: UserWallet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserWalletRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserWalletResponse {
    pub wallet: UserWallet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserWalletsResponse {
    pub wallets: Vec<UserWallet>,
}
