//! HTTP surface shared by the routing layer.
//!
//! # Data Flow
//! ```text
//! Host transport builds http::Request<String>
//!     → routing layer (sub-router scan, verb table scan)
//!     → matched handler response, or a terminal response built here
//!     → http::Response<String> handed back to the host
//! ```
//!
//! # Design Decisions
//! - Plain `http` crate types at the boundary; no transport coupling
//! - Routable methods are a closed enumeration (`Verb`); anything outside it
//!   is unroutable, not an error
//! - Terminal response bodies carry the canonical status phrase and nothing
//!   else (no internal detail leaks to the remote caller)

use http::StatusCode;

/// Request envelope accepted by the router.
pub type Request = http::Request<String>;

/// Response envelope produced by the router.
pub type Response = http::Response<String>;

/// The closed set of methods the router can hold routes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Verb {
    /// Every routable verb, in route-table order.
    pub const ALL: [Verb; 6] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Patch,
        Verb::Delete,
        Verb::Head,
    ];

    /// Map an incoming method onto the routable set.
    ///
    /// Returns `None` for methods outside the six supported verbs; the
    /// router treats those requests as unroutable and answers 404.
    pub fn from_method(method: &http::Method) -> Option<Self> {
        match method.as_str() {
            "GET" => Some(Verb::Get),
            "POST" => Some(Verb::Post),
            "PUT" => Some(Verb::Put),
            "PATCH" => Some(Verb::Patch),
            "DELETE" => Some(Verb::Delete),
            "HEAD" => Some(Verb::Head),
            _ => None,
        }
    }

    /// Wire-format method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal response for an unmatched request.
pub fn not_found() -> Response {
    terminal(StatusCode::NOT_FOUND)
}

/// Terminal response for a dispatch-time failure.
pub fn internal_error() -> Response {
    terminal(StatusCode::INTERNAL_SERVER_ERROR)
}

fn terminal(status: StatusCode) -> Response {
    let body = status.canonical_reason().unwrap_or_default().to_string();
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
}
