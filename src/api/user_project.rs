//! User-project association endpoints, nested under `/user/{id}`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use serde::Deserialize;

use crate::api::{
    decode_body, forward, path_param, route_handler, ApiError, BACKEND_FAILURE, MISSING_USER_ID,
};
use crate::backend::{CreateUserProjectRequest, GetUserProjectRequest, UserService};
use crate::routing::{ComposeError, RouteNode};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CreateUserProjectBody {
    project_id: i64,
    chain_id: i64,
    address: String,
}

/// Register `/project` and `/projects` under the user grouping node.
pub fn register(
    parent: &Arc<RouteNode>,
    svc: Arc<dyn UserService>,
) -> Result<(), ComposeError> {
    let create = {
        let svc = svc.clone();
        RouteNode::new(
            "/project",
            vec![Method::POST],
            Some(route_handler(move |req| create_user_project(svc.clone(), req))),
        )
    };
    parent.add(&create)?;

    let list = {
        let svc = svc.clone();
        RouteNode::new(
            "/projects",
            vec![Method::GET],
            Some(route_handler(move |req| get_user_projects(svc.clone(), req))),
        )
    };
    parent.add(&list)?;

    Ok(())
}

async fn create_user_project(
    svc: Arc<dyn UserService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let id = path_param(&mut parts, "id", MISSING_USER_ID).await?;
    tracing::info!(id = %id, "create user project");

    let user_id = id.parse::<i64>().unwrap_or_default();
    let create: CreateUserProjectBody = decode_body(body).await?;

    let result = svc
        .create_user_project(CreateUserProjectRequest {
            user_id,
            project_id: create.project_id,
            chain_id: create.chain_id,
            address: create.address,
        })
        .await;
    forward(result, BACKEND_FAILURE)
}

async fn get_user_projects(
    svc: Arc<dyn UserService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    let (mut parts, _body) = req.into_parts();
    let id = path_param(&mut parts, "id", MISSING_USER_ID).await?;
    tracing::info!(id = %id, "getting user projects info");

    let user_id = id.parse::<i64>().unwrap_or_default();
    let result = svc.get_user_project(GetUserProjectRequest { user_id }).await;
    forward(result, BACKEND_FAILURE)
}
