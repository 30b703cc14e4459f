//! Manifest endpoint: lists the full path of every reachable leaf.
//!
//! The root handler is the only code that walks the node tree at request
//! time. It performs no backend calls and has no side effects.

use std::sync::{Arc, Weak};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::routing::{RouteHandler, RouteNode};

/// Response body of `GET /`.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub paths: Vec<String>,
}

/// Build the root node with the manifest handler bound to it. The handler
/// holds a weak pointer back to the node it lives on, so the tree stays
/// free of ownership cycles.
pub fn root_node() -> Arc<RouteNode> {
    Arc::new_cyclic(|weak: &Weak<RouteNode>| {
        let weak = weak.clone();
        let handler: RouteHandler = Arc::new(move |_req| {
            let weak = weak.clone();
            Box::pin(async move {
                match weak.upgrade() {
                    Some(root) => {
                        let mut paths = Vec::new();
                        collect_paths(&root, &mut paths);
                        Json(Manifest { paths }).into_response()
                    }
                    // The root owns the router; it cannot be gone while
                    // requests are still being served.
                    None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                }
            })
        });
        RouteNode::from_parts("/", Vec::new(), Some(handler))
    })
}

/// Depth-first walk collecting the full path of every handler-bearing
/// node. Grouping nodes are skipped but their subtrees are traversed.
fn collect_paths(node: &Arc<RouteNode>, paths: &mut Vec<String>) {
    if node.handler().is_some() {
        paths.push(node.full_path());
    }
    for child in node.children() {
        collect_paths(&child, paths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Registry;
    use axum::http::Method;
    use axum::response::Response;
    use std::collections::BTreeSet;

    fn leaf(subpath: &str, method: Method) -> Arc<RouteNode> {
        let handler: RouteHandler =
            Arc::new(|_req| Box::pin(async { Response::new(Default::default()) }));
        RouteNode::new(subpath, vec![method], Some(handler))
    }

    fn manifest_set(root: &Arc<RouteNode>) -> BTreeSet<String> {
        let mut paths = Vec::new();
        collect_paths(root, &mut paths);
        paths.into_iter().collect()
    }

    #[test]
    fn collects_leaves_through_grouping_nodes() {
        let registry = Registry::new();
        let root = root_node();
        root.bind_root(&registry).unwrap();

        root.add(&leaf("/user", Method::POST)).unwrap();
        let group = RouteNode::new("/user/{id}", Vec::new(), None);
        root.add(&group).unwrap();
        group.add(&leaf("/wallet", Method::POST)).unwrap();

        let paths = manifest_set(&root);
        let expected: BTreeSet<String> = ["/", "/user", "/user/{id}/wallet"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(paths, expected);
        // The grouping node itself is not listed.
        assert!(!paths.contains("/user/{id}"));
    }

    #[test]
    fn stable_under_sibling_reordering() {
        let build = |flip: bool| {
            let registry = Registry::new();
            let root = root_node();
            root.bind_root(&registry).unwrap();
            let a = leaf("/project", Method::POST);
            let b = leaf("/projects", Method::GET);
            if flip {
                root.add(&b).unwrap();
                root.add(&a).unwrap();
            } else {
                root.add(&a).unwrap();
                root.add(&b).unwrap();
            }
            manifest_set(&root)
        };
        assert_eq!(build(false), build(true));
    }
}
