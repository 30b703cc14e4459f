//! The route tree.
//!
//! # Responsibilities
//! - Represent one URL path segment per node, optionally bound to a handler
//! - Attach children to parents with full invariant checking
//! - Derive each child's routing scope from its parent at attach time
//! - Compute normalized full paths for introspection
//!
//! # Design Decisions
//! - A node is either *detached* (just constructed) or *attached*; the
//!   transition happens exactly once, via a successful [`RouteNode::add`]
//! - `OnceLock` enforces single assignment of parent and scope
//! - Validation happens at `add` time, when the parent context is known;
//!   `new` only stores fields
//! - A failed `add` leaves both nodes untouched

use std::sync::{Arc, OnceLock, RwLock, Weak};

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::routing::registry::{self, Scope};

/// Type-erased leaf handler: one shape for every endpoint
/// (request in, response out).
pub type RouteHandler =
    Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// Error returned when tree composition is invalid.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("child {0:?} already has a parent")]
    AlreadyAttached(String),

    #[error("child subpath {0:?} is not valid")]
    InvalidSubpath(String),

    #[error("parent does not have a router scope")]
    DetachedParent,

    #[error("method {0} cannot be used as a route filter")]
    UnsupportedMethod(Method),

    #[error("route {path} {methods:?} conflicts with an existing registration")]
    RouteConflict { path: String, methods: Vec<Method> },
}

/// A node in the path-composition tree.
///
/// Carries one path segment (possibly parametrized, e.g. `/user/{id}`),
/// an optional leaf handler with its method set, and links to parent and
/// children. Nodes without a handler are pure grouping nodes that only
/// host children.
pub struct RouteNode {
    subpath: String,
    methods: Vec<Method>,
    handler: Option<RouteHandler>,

    children: RwLock<Vec<Arc<RouteNode>>>,
    parent: OnceLock<Weak<RouteNode>>,
    scope: OnceLock<Scope>,
}

impl RouteNode {
    /// Construct a detached node. No validation happens here; the subpath
    /// is checked when the node is attached to a parent.
    pub fn new(
        subpath: impl Into<String>,
        methods: Vec<Method>,
        handler: Option<RouteHandler>,
    ) -> Arc<Self> {
        Arc::new(Self::from_parts(subpath, methods, handler))
    }

    /// Like [`RouteNode::new`] but without the `Arc` wrapper, for callers
    /// that need `Arc::new_cyclic` (the manifest handler points back at
    /// its own node).
    pub fn from_parts(
        subpath: impl Into<String>,
        methods: Vec<Method>,
        handler: Option<RouteHandler>,
    ) -> Self {
        Self {
            subpath: subpath.into(),
            methods,
            handler,
            children: RwLock::new(Vec::new()),
            parent: OnceLock::new(),
            scope: OnceLock::new(),
        }
    }

    pub fn subpath(&self) -> &str {
        &self.subpath
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn handler(&self) -> Option<&RouteHandler> {
        self.handler.as_ref()
    }

    pub fn parent(&self) -> Option<Arc<RouteNode>> {
        self.parent.get().and_then(Weak::upgrade)
    }

    /// Snapshot of the children in insertion order.
    pub fn children(&self) -> Vec<Arc<RouteNode>> {
        self.children.read().expect("children lock poisoned").clone()
    }

    /// Bind this node as the tree root, granting it the registry's root
    /// scope. If the node carries a handler it is registered at `/`.
    pub fn bind_root(
        self: &Arc<Self>,
        registry: &crate::routing::Registry,
    ) -> Result<(), ComposeError> {
        if self.scope.get().is_some() {
            return Err(ComposeError::AlreadyAttached(self.subpath.clone()));
        }
        let scope = registry.root_scope();
        if let Some(handler) = &self.handler {
            let filter = registry::method_filter(&self.methods)?;
            scope.check_free("/", &self.methods)?;
            scope.register("/", &self.methods, filter, handler.clone());
        }
        self.scope
            .set(scope)
            .map_err(|_| ComposeError::AlreadyAttached(self.subpath.clone()))
    }

    /// Attach `child` under `self`.
    ///
    /// Fails when the child is already attached, its subpath is empty,
    /// equal to `/`, or missing the leading `/`, or when `self` has not
    /// been attached yet. All checks run before any mutation, so a failed
    /// call leaves both nodes exactly as they were.
    ///
    /// On success the child's scope is the parent scope narrowed by the
    /// child subpath, and a carried handler is registered twice: once at
    /// the child's own scope root and once at the parent scope for the
    /// literal subpath. Deeper descendants register relative to the child
    /// scope, which is why the child namespace must answer at its own root
    /// as well as through the parent prefix.
    pub fn add(self: &Arc<Self>, child: &Arc<RouteNode>) -> Result<(), ComposeError> {
        if child.parent.get().is_some() || child.scope.get().is_some() {
            return Err(ComposeError::AlreadyAttached(child.subpath.clone()));
        }
        if child.subpath.is_empty()
            || child.subpath == "/"
            || !child.subpath.starts_with('/')
        {
            return Err(ComposeError::InvalidSubpath(child.subpath.clone()));
        }
        let parent_scope = self.scope.get().ok_or(ComposeError::DetachedParent)?;

        let child_scope = parent_scope.nest(&child.subpath);
        let filter = registry::method_filter(&child.methods)?;
        if child.handler.is_some() {
            child_scope.check_free("/", &child.methods)?;
            parent_scope.check_free(&child.subpath, &child.methods)?;
        }

        // All checks passed; transition detached -> attached.
        if child.parent.set(Arc::downgrade(self)).is_err()
            || child.scope.set(child_scope.clone()).is_err()
        {
            return Err(ComposeError::AlreadyAttached(child.subpath.clone()));
        }
        self.children
            .write()
            .expect("children lock poisoned")
            .push(child.clone());

        if let Some(handler) = &child.handler {
            child_scope.register("/", &child.methods, filter, handler.clone());
            parent_scope.register(&child.subpath, &child.methods, filter, handler.clone());
        }

        Ok(())
    }

    /// Full path from the root to this node, with runs of `/` collapsed.
    /// Pure function of the tree; sibling insertion order never affects it.
    pub fn full_path(&self) -> String {
        match self.parent() {
            None => self.subpath.clone(),
            Some(parent) => {
                registry::normalize_path(&format!("{}{}", parent.full_path(), self.subpath))
            }
        }
    }
}

impl std::fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteNode")
            .field("subpath", &self.subpath)
            .field("methods", &self.methods)
            .field("handler", &self.handler.is_some())
            .field("attached", &self.scope.get().is_some())
            .finish()
    }
}
