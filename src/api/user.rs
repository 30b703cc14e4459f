//! User resource endpoints.
//!
//! Registers `/user` and `/user/{id}` leaves plus the `/user/{id}`
//! grouping node that hosts the nested project and wallet resources.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use serde::Deserialize;

use crate::api::{
    decode_body, forward, path_param, route_handler, ApiError, BACKEND_FAILURE, MISSING_USER_ID,
};
use crate::backend::{
    GetUserRequest, LoginType, LoginUserRequest, UpdateUserRequest, UserService,
};
use crate::routing::{ComposeError, RouteNode};

/// Request body shared by user creation and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UserBody {
    user_id: String,
    login_type: LoginType,
}

/// Build the user subtree under `parent` and register every leaf.
pub fn register(
    parent: &Arc<RouteNode>,
    svc: Arc<dyn UserService>,
) -> Result<(), ComposeError> {
    // Create user & login
    let create = {
        let svc = svc.clone();
        RouteNode::new(
            "/user",
            vec![Method::POST],
            Some(route_handler(move |req| create_user(svc.clone(), req))),
        )
    };
    parent.add(&create)?;

    // Get user
    let get = {
        let svc = svc.clone();
        RouteNode::new(
            "/user/{id}",
            vec![Method::GET],
            Some(route_handler(move |req| get_user(svc.clone(), req))),
        )
    };
    parent.add(&get)?;

    // Edit user
    let update = {
        let svc = svc.clone();
        RouteNode::new(
            "/user/{id}",
            vec![Method::PUT],
            Some(route_handler(move |req| update_user(svc.clone(), req))),
        )
    };
    parent.add(&update)?;

    // Grouping node hosting /user/{id}/project and /user/{id}/wallet
    let group = RouteNode::new("/user/{id}", Vec::new(), None);
    parent.add(&group)?;

    crate::api::user_project::register(&group, svc.clone())?;
    crate::api::wallet::register(&group, svc)?;

    Ok(())
}

async fn create_user(
    svc: Arc<dyn UserService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    tracing::info!("create user request");
    let body: UserBody = decode_body(req.into_body()).await?;

    let result = svc
        .login_user(LoginUserRequest {
            user_id: body.user_id,
            login_type: body.login_type,
        })
        .await;
    forward(result, BACKEND_FAILURE)
}

async fn get_user(
    svc: Arc<dyn UserService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    let (mut parts, _body) = req.into_parts();
    let id = path_param(&mut parts, "id", MISSING_USER_ID).await?;
    tracing::info!(id = %id, "getting user info");

    let user_id = id.parse::<i64>().unwrap_or_default();
    let result = svc.get_user(GetUserRequest { user_id }).await;
    forward(result, BACKEND_FAILURE)
}

async fn update_user(
    svc: Arc<dyn UserService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let id = path_param(&mut parts, "id", MISSING_USER_ID).await?;
    let update: UserBody = decode_body(body).await?;
    tracing::info!(id = %id, "updating user info");

    let user_id = id.parse::<i64>().unwrap_or_default();
    let current = match svc.get_user(GetUserRequest { user_id }).await {
        Ok(user) => user,
        Err(err) => {
            tracing::error!(error = %err, "backend call failed");
            return Err(ApiError::bad_request(BACKEND_FAILURE));
        }
    };

    // Merge the provider id the caller is changing into the stored record.
    let mut rpc = UpdateUserRequest {
        user_id: current.user_id,
        telegram_id: current.telegram_id,
        discord_id: current.discord_id,
        twitter_id: current.twitter_id,
    };
    match update.login_type {
        LoginType::TELEGRAM => rpc.telegram_id = update.user_id,
        LoginType::DISCORD => rpc.discord_id = update.user_id,
        LoginType::TWITTER => rpc.twitter_id = update.user_id,
        other => {
            tracing::error!(login_type = other.0, "invalid id type");
            return Err(ApiError::bad_request("invalid id type"));
        }
    }

    forward(svc.update_user(rpc).await, "update user error")
}
