//! Route registration and dispatch.
//!
//! # Data Flow
//! ```text
//! http::Request
//!     → sub-router scan (insertion order; first prefix match delegates,
//!       with the prefix stripped from the path)
//!     → verb table scan (insertion order; first pattern match dispatches)
//!     → handler future, or terminal 404
//!     → failures caught at this router's boundary → terminal 500
//! ```
//!
//! # Design Decisions
//! - First-registered match wins, for sub-routers and routes alike
//! - A matched sub-router prefix commits dispatch to that subtree, even
//!   when the subtree answers 404
//! - Each router guards its own dispatch: a nested failure is already a
//!   500 response before the parent sees it

use crate::http::{internal_error, not_found, Request, Response, Verb};
use crate::routing::handler::{BoxError, Handler, HandlerResult};
use crate::routing::pattern::{PathPattern, PathPrefix, PatternError};
use futures_util::future::{BoxFuture, FutureExt};
use std::any::Any;
use std::io::{self, Write};
use std::panic::AssertUnwindSafe;

/// One (pattern, handler) binding under a single verb.
#[derive(Debug)]
struct Route {
    pattern: PathPattern,
    handler: Handler,
}

/// Ordered per-verb route collections.
///
/// Every verb always has a collection; an empty one and a never-registered
/// one are the same thing, both falling through to not-found.
#[derive(Debug)]
struct RouteTable {
    routes: [Vec<Route>; Verb::ALL.len()],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: std::array::from_fn(|_| Vec::new()),
        }
    }
}

impl RouteTable {
    fn push(&mut self, verb: Verb, route: Route) {
        self.routes[verb.index()].push(route);
    }

    fn for_verb(&self, verb: Verb) -> &[Route] {
        &self.routes[verb.index()]
    }
}

/// A nested router mounted under a path prefix.
#[derive(Debug)]
struct SubRouter {
    prefix: PathPrefix,
    router: Router,
}

/// One row of the diagnostic route listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub verb: Verb,
    pub path: String,
    pub handler: String,
}

/// An HTTP request router.
///
/// Owns an ordered list of mounted sub-routers plus per-verb ordered route
/// collections. Dispatch scans sub-routers first; the first matching prefix
/// delegates the request to that subtree outright. Otherwise the request's
/// verb selects a route collection, scanned in registration order, and the
/// first structurally matching pattern dispatches to its handler.
///
/// Registration takes `&mut self` and dispatch takes `&self`, so the borrow
/// checker keeps the two apart. Callers that put a router behind interior
/// mutability take on the obligation themselves: finish registration before
/// sharing the router for dispatch — there is no internal locking.
#[derive(Debug, Default)]
pub struct Router {
    subrouters: Vec<SubRouter>,
    table: RouteTable,
}

impl Router {
    /// An empty router; every request answers 404 until routes are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a GET route.
    pub fn get(&mut self, template: &str, handler: Handler) -> Result<&mut Self, PatternError> {
        self.push_route(Verb::Get, template, handler)
    }

    /// Register a POST route.
    pub fn post(&mut self, template: &str, handler: Handler) -> Result<&mut Self, PatternError> {
        self.push_route(Verb::Post, template, handler)
    }

    /// Register a PUT route.
    pub fn put(&mut self, template: &str, handler: Handler) -> Result<&mut Self, PatternError> {
        self.push_route(Verb::Put, template, handler)
    }

    /// Register a PATCH route.
    pub fn patch(&mut self, template: &str, handler: Handler) -> Result<&mut Self, PatternError> {
        self.push_route(Verb::Patch, template, handler)
    }

    /// Register a DELETE route.
    pub fn delete(&mut self, template: &str, handler: Handler) -> Result<&mut Self, PatternError> {
        self.push_route(Verb::Delete, template, handler)
    }

    /// Register a HEAD route.
    pub fn head(&mut self, template: &str, handler: Handler) -> Result<&mut Self, PatternError> {
        self.push_route(Verb::Head, template, handler)
    }

    /// Mount a fully-formed router under a path prefix.
    ///
    /// Every request whose path falls under the prefix is delegated to
    /// `router` with the prefix stripped, so the nested router registers
    /// prefix-relative templates. A matching prefix commits dispatch to the
    /// subtree: there is no fallback to later sub-routers or to this
    /// router's own routes, even when the subtree answers 404.
    pub fn subpath(&mut self, template: &str, router: Router) -> Result<&mut Self, PatternError> {
        let prefix = PathPrefix::compile(template)?;
        self.subrouters.push(SubRouter { prefix, router });
        Ok(self)
    }

    fn push_route(
        &mut self,
        verb: Verb,
        template: &str,
        handler: Handler,
    ) -> Result<&mut Self, PatternError> {
        let pattern = PathPattern::compile(template)?;
        self.table.push(verb, Route { pattern, handler });
        Ok(self)
    }

    /// Resolve a request to a response.
    ///
    /// Never fails: an unmatched request yields 404, and any dispatch-time
    /// failure (a handler returning an error, a handler panicking, an
    /// internal URI rewrite failing) is logged and yields 500.
    pub fn route(&self, request: Request) -> BoxFuture<'_, Response> {
        async move {
            match AssertUnwindSafe(self.dispatch(request)).catch_unwind().await {
                Ok(Ok(response)) => response,
                Ok(Err(error)) => {
                    tracing::error!(%error, "dispatch failed, answering 500");
                    internal_error()
                }
                Err(panic) => {
                    tracing::error!(panic = panic_message(&panic), "handler panicked, answering 500");
                    internal_error()
                }
            }
        }
        .boxed()
    }

    async fn dispatch(&self, request: Request) -> HandlerResult {
        let path = request.uri().path().to_string();

        for sub in &self.subrouters {
            if sub.prefix.matches(&path) {
                tracing::debug!(prefix = sub.prefix.prefix(), %path, "delegating to sub-router");
                let request = strip_prefix(request, &sub.prefix)?;
                return Ok(sub.router.route(request).await);
            }
        }

        let Some(verb) = Verb::from_method(request.method()) else {
            tracing::debug!(method = %request.method(), "method not routable");
            return Ok(not_found());
        };

        for route in self.table.for_verb(verb) {
            if let Some(matched) = route.pattern.matches(&path) {
                tracing::debug!(
                    template = route.pattern.template(),
                    handler = route.handler.label(),
                    "route matched"
                );
                return route.handler.call(request, Some(matched)).await;
            }
        }

        Ok(not_found())
    }

    /// Enumerate every concrete route, walking mounted sub-routers
    /// depth-first in registration order with their prefixes accumulated.
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut rows = Vec::new();
        self.collect_routes("", &mut rows);
        rows
    }

    fn collect_routes(&self, prefix: &str, rows: &mut Vec<RouteInfo>) {
        for sub in &self.subrouters {
            let joined = join_paths(prefix, sub.prefix.prefix());
            sub.router.collect_routes(&joined, rows);
        }
        for verb in Verb::ALL {
            for route in self.table.for_verb(verb) {
                rows.push(RouteInfo {
                    verb,
                    path: join_paths(prefix, route.pattern.template()),
                    handler: route.handler.label().to_string(),
                });
            }
        }
    }

    /// Write the route listing to an operator-facing stream, one line per
    /// route plus a header. Column widths are advisory, not a contract.
    pub fn print_routes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{:<10}{:<60}{}", "Method", "Path", "Handler")?;
        for info in self.routes() {
            writeln!(out, "{:<10}{:<60}{}", info.verb, info.path, info.handler)?;
        }
        Ok(())
    }
}

/// Rebuild the request URI with the matched mount prefix stripped from the
/// path, preserving the query and any authority the caller supplied.
fn strip_prefix(request: Request, prefix: &PathPrefix) -> Result<Request, BoxError> {
    let (mut parts, body) = request.into_parts();
    let uri = std::mem::take(&mut parts.uri);
    let rest = prefix.strip(uri.path());
    let path_and_query = match uri.query() {
        Some(query) => format!("{rest}?{query}"),
        None => rest,
    };
    let mut uri_parts = uri.into_parts();
    uri_parts.path_and_query = Some(path_and_query.parse()?);
    parts.uri = http::Uri::from_parts(uri_parts)?;
    Ok(Request::from_parts(parts, body))
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

fn join_paths(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else if segment.is_empty() {
        prefix.to_string()
    } else {
        format!("{}{}", prefix.trim_end_matches('/'), segment)
    }
}
