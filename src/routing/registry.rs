//! Route registry and scopes.
//!
//! # Responsibilities
//! - Hand out prefix-narrowed [`Scope`] handles at attach time
//! - Record handler registrations with their method filters
//! - Detect conflicting registrations before they reach axum
//! - Compile the frozen registration set into an `axum::Router`
//!
//! # Design Decisions
//! - Scopes are plain prefix strings into one shared registry; narrowing a
//!   scope is string concatenation plus slash normalization
//! - A scope root registration keeps its trailing slash (`/user/` vs
//!   `/user`), so the double exposure of a leaf lands on two distinct
//!   axum routes instead of a duplicate-route panic
//! - Conflicts are checked by the tree *before* it mutates; `register`
//!   itself is infallible

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::http::Method;
use axum::routing::{any, MethodFilter, MethodRouter};
use axum::Router;

use crate::routing::node::{ComposeError, RouteHandler};

struct Registration {
    path: String,
    methods: Vec<Method>,
    filter: Option<MethodFilter>,
    handler: RouteHandler,
}

/// Collects every route registered during tree composition and compiles
/// them into the final router. Shared by all scopes of one tree.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<Mutex<Vec<Registration>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The scope granted to the tree root: the empty prefix.
    pub fn root_scope(&self) -> Scope {
        Scope {
            registry: self.clone(),
            prefix: String::new(),
        }
    }

    fn push(&self, registration: Registration) {
        self.inner
            .lock()
            .expect("registry lock poisoned")
            .push(registration);
    }

    fn conflicts(&self, path: &str, methods: &[Method]) -> bool {
        let entries = self.inner.lock().expect("registry lock poisoned");
        entries.iter().any(|existing| {
            existing.path == path && methods_overlap(&existing.methods, methods)
        })
    }

    /// Freeze the registration set into an axum router. Consumes the
    /// registry; composition is over once this is called.
    pub fn into_router(self) -> Router {
        let entries = std::mem::take(
            &mut *self.inner.lock().expect("registry lock poisoned"),
        );

        let mut grouped: BTreeMap<String, Vec<Registration>> = BTreeMap::new();
        for entry in entries {
            grouped.entry(entry.path.clone()).or_default().push(entry);
        }

        let mut router = Router::new();
        for (path, registrations) in grouped {
            router = router.route(&path, method_router(registrations));
        }
        router
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// A path-prefix namespace inside a [`Registry`]. Granted to a node when
/// it attaches; narrowing it for a child is [`Scope::nest`].
#[derive(Clone)]
pub struct Scope {
    registry: Registry,
    prefix: String,
}

impl Scope {
    /// Derive the child scope for `subpath`.
    pub fn nest(&self, subpath: &str) -> Scope {
        Scope {
            registry: self.registry.clone(),
            prefix: normalize_path(&format!("{}{}", self.prefix, subpath)),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn route_path(&self, relative: &str) -> String {
        normalize_path(&format!("{}{}", self.prefix, relative))
    }

    pub(crate) fn check_free(
        &self,
        relative: &str,
        methods: &[Method],
    ) -> Result<(), ComposeError> {
        let path = self.route_path(relative);
        if self.registry.conflicts(&path, methods) {
            return Err(ComposeError::RouteConflict {
                path,
                methods: methods.to_vec(),
            });
        }
        Ok(())
    }

    pub(crate) fn register(
        &self,
        relative: &str,
        methods: &[Method],
        filter: Option<MethodFilter>,
        handler: RouteHandler,
    ) {
        self.registry.push(Registration {
            path: self.route_path(relative),
            methods: methods.to_vec(),
            filter,
            handler,
        });
    }
}

/// Combine a method set into one axum filter. `None` means unconditional
/// registration (no method restriction).
pub(crate) fn method_filter(
    methods: &[Method],
) -> Result<Option<MethodFilter>, ComposeError> {
    let mut combined: Option<MethodFilter> = None;
    for method in methods {
        let filter = MethodFilter::try_from(method.clone())
            .map_err(|_| ComposeError::UnsupportedMethod(method.clone()))?;
        combined = Some(match combined {
            Some(acc) => acc.or(filter),
            None => filter,
        });
    }
    Ok(combined)
}

/// Collapse runs of two or more `/` into one.
pub(crate) fn normalize_path(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_slash = false;
    for c in raw.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}

fn methods_overlap(a: &[Method], b: &[Method]) -> bool {
    // An empty set means "no restriction" and overlaps everything.
    if a.is_empty() || b.is_empty() {
        return true;
    }
    a.iter().any(|m| b.contains(m))
}

fn method_router(registrations: Vec<Registration>) -> MethodRouter {
    let mut method_router = MethodRouter::new();
    for registration in registrations {
        let handler = registration.handler.clone();
        let call = move |req: axum::extract::Request| {
            let handler = handler.clone();
            async move { handler(req).await }
        };
        match registration.filter {
            // Conflict checks guarantee an unconditional registration is
            // alone on its path.
            None => return any(call),
            Some(filter) => method_router = method_router.on(filter, call),
        }
    }
    method_router
}
