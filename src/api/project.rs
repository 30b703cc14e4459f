//! Project resource endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use serde::Deserialize;

use crate::api::{
    decode_body, forward, path_param, route_handler, ApiError, BACKEND_FAILURE,
    MISSING_PROJECT_ID,
};
use crate::backend::{
    CreateProjectRequest, GetProjectRequest, ProjectService, UpdateProjectRequest,
};
use crate::routing::{ComposeError, RouteNode};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CreateProjectBody {
    project_name: String,
    chain_id: i64,
    raffle_contract: String,
}

/// Body for project updates. Empty until project components are decided;
/// decoding still rejects malformed JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UpdateProjectBody {}

/// Build the project subtree under `parent` and register every leaf.
pub fn register(
    parent: &Arc<RouteNode>,
    svc: Arc<dyn ProjectService>,
) -> Result<(), ComposeError> {
    // Create project
    let create = {
        let svc = svc.clone();
        RouteNode::new(
            "/project",
            vec![Method::POST],
            Some(route_handler(move |req| create_project(svc.clone(), req))),
        )
    };
    parent.add(&create)?;

    // Get all projects
    let list = {
        let svc = svc.clone();
        RouteNode::new(
            "/projects",
            vec![Method::GET],
            Some(route_handler(move |req| get_all_projects(svc.clone(), req))),
        )
    };
    parent.add(&list)?;

    // Get certain project
    let get = {
        let svc = svc.clone();
        RouteNode::new(
            "/project/{id}",
            vec![Method::GET],
            Some(route_handler(move |req| get_project(svc.clone(), req))),
        )
    };
    parent.add(&get)?;

    // Edit project
    let update = {
        let svc = svc.clone();
        RouteNode::new(
            "/project/{id}",
            vec![Method::PUT],
            Some(route_handler(move |req| update_project(svc.clone(), req))),
        )
    };
    parent.add(&update)?;

    Ok(())
}

async fn create_project(
    svc: Arc<dyn ProjectService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    tracing::info!("create project request");
    let body: CreateProjectBody = decode_body(req.into_body()).await?;

    let result = svc
        .create_project(CreateProjectRequest {
            project_name: body.project_name,
            chain_id: body.chain_id,
            raffle_contract: body.raffle_contract,
        })
        .await;
    forward(result, BACKEND_FAILURE)
}

async fn get_all_projects(
    svc: Arc<dyn ProjectService>,
    _req: Request<Body>,
) -> Result<Response, ApiError> {
    tracing::info!("getting all projects list");
    forward(svc.get_all_projects().await, BACKEND_FAILURE)
}

async fn get_project(
    svc: Arc<dyn ProjectService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    let (mut parts, _body) = req.into_parts();
    let id = path_param(&mut parts, "id", MISSING_PROJECT_ID).await?;
    tracing::info!(id = %id, "getting project info");

    let project_id = id.parse::<i64>().unwrap_or_default();
    let result = svc.get_project(GetProjectRequest { project_id }).await;
    forward(result, BACKEND_FAILURE)
}

async fn update_project(
    svc: Arc<dyn ProjectService>,
    req: Request<Body>,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let id = path_param(&mut parts, "id", MISSING_PROJECT_ID).await?;
    let _body: UpdateProjectBody = decode_body(body).await?;
    tracing::info!(id = %id, "updating project info");

    let project_id = id.parse::<i64>().unwrap_or_default();
    let result = svc.update_project(UpdateProjectRequest { project_id }).await;
    forward(result, "update project error")
}
