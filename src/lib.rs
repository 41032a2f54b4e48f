//! Minimal HTTP request router: method plus path-pattern dispatch, with
//! nested routers mounted under path prefixes.

pub mod http;
pub mod routing;

pub use crate::http::{Request, Response, Verb};
pub use crate::routing::{
    BoxError, Handler, HandlerResult, PathMatch, PatternError, RouteInfo, Router,
    ANONYMOUS_HANDLER,
};
