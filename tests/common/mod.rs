//! Shared helpers for router integration tests.

use subrouter::{Handler, PathMatch, Request, Response};

/// Route tracing output through the test harness; repeated calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a bodiless request with the given method and target.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// A handler answering 200 with a fixed body.
pub fn reply(body: &'static str) -> Handler {
    Handler::new(move |_request: Request, _matched: Option<PathMatch>| async move {
        Ok(Response::new(body.to_string()))
    })
}

/// A handler that fails every invocation.
#[allow(dead_code)]
pub fn failing(message: &'static str) -> Handler {
    Handler::new(move |_request: Request, _matched: Option<PathMatch>| async move {
        Err(message.into())
    })
}
