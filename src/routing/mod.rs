//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, URL)
//!     → router.rs (sub-router scan, then per-verb route scan)
//!     → pattern.rs (evaluate compiled path patterns, capture params)
//!     → handler.rs (invoke the matched boxed async handler)
//!     → Response (handler result, or terminal 404/500)
//! ```
//!
//! # Design Decisions
//! - Insertion order is routing-significant: first match wins, never
//!   longest-match or most-specific
//! - A matched sub-router prefix commits dispatch to that subtree
//! - Patterns compile at registration time; malformed templates fail fast
//!   there, not at dispatch

pub mod handler;
pub mod pattern;
pub mod router;

pub use handler::{BoxError, Handler, HandlerResult, ANONYMOUS_HANDLER};
pub use pattern::{PathMatch, PathPattern, PathPrefix, PatternError};
pub use router::{RouteInfo, Router};
