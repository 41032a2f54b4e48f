//! Handler representation.
//!
//! Handlers are async functions taking the request plus the structured path
//! match, boxed behind one dyn signature so synchronous and asynchronous
//! handlers look identical at the dispatch boundary.

use crate::http::{Request, Response};
use crate::routing::pattern::PathMatch;
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;

/// Failure a handler can surface instead of a response.
///
/// Caught at the router boundary and converted to a 500 response; never
/// propagated to the router's caller.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of one handler invocation.
pub type HandlerResult = Result<Response, BoxError>;

type HandlerFn = Box<dyn Fn(Request, Option<PathMatch>) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Marker shown in route listings for handlers registered without a label.
pub const ANONYMOUS_HANDLER: &str = "<anonymous>";

/// A registered handler with an optional diagnostic label.
///
/// The label feeds route listings only; dispatch never reads it. A missing
/// label degrades the listing to [`ANONYMOUS_HANDLER`], nothing more.
pub struct Handler {
    label: Option<String>,
    f: HandlerFn,
}

impl Handler {
    /// Wrap an async function or closure with no label.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Option<PathMatch>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            label: None,
            f: box_fn(f),
        }
    }

    /// Wrap an async function or closure with a diagnostic label.
    pub fn named<F, Fut>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(Request, Option<PathMatch>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            label: Some(label.into()),
            f: box_fn(f),
        }
    }

    /// Diagnostic label, or the anonymous marker.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(ANONYMOUS_HANDLER)
    }

    pub(crate) fn call(
        &self,
        request: Request,
        matched: Option<PathMatch>,
    ) -> BoxFuture<'static, HandlerResult> {
        (self.f)(request, matched)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("label", &self.label()).finish()
    }
}

fn box_fn<F, Fut>(f: F) -> HandlerFn
where
    F: Fn(Request, Option<PathMatch>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Box::new(move |request, matched| Box::pin(f(request, matched)))
}
