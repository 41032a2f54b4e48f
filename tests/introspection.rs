//! Route listing: depth-first enumeration with accumulated prefixes and
//! handler labels.

use subrouter::{Handler, PathMatch, Request, Response, Router, Verb, ANONYMOUS_HANDLER};

mod common;
use common::reply;

fn labeled(label: &'static str) -> Handler {
    Handler::named(label, move |_request: Request, _matched: Option<PathMatch>| async move {
        Ok(Response::new(String::new()))
    })
}

#[test]
fn test_listing_walks_subrouters_depth_first() {
    let mut admin = Router::new();
    admin.get("/users", labeled("admin_users")).unwrap();

    let mut api = Router::new();
    api.subpath("/admin", admin).unwrap();
    api.get("/widgets", labeled("list_widgets")).unwrap();
    api.post("/widgets", labeled("create_widget")).unwrap();

    let mut router = Router::new();
    router.subpath("/api", api).unwrap();
    router.get("/health", labeled("health")).unwrap();

    let rows = router.routes();
    let summary: Vec<(Verb, &str, &str)> = rows
        .iter()
        .map(|row| (row.verb, row.path.as_str(), row.handler.as_str()))
        .collect();

    assert_eq!(
        summary,
        [
            (Verb::Get, "/api/admin/users", "admin_users"),
            (Verb::Get, "/api/widgets", "list_widgets"),
            (Verb::Post, "/api/widgets", "create_widget"),
            (Verb::Get, "/health", "health"),
        ]
    );
}

#[test]
fn test_listing_elides_wildcard_prefix_spelling() {
    let mut api = Router::new();
    api.get("/widgets", labeled("list_widgets")).unwrap();

    let mut router = Router::new();
    router.subpath("/api/*", api).unwrap();

    let rows = router.routes();
    assert_eq!(rows[0].path, "/api/widgets");
}

#[test]
fn test_unlabeled_handler_lists_anonymous_marker() {
    let mut router = Router::new();
    router.get("/ping", reply("pong")).unwrap();

    let rows = router.routes();
    assert_eq!(rows[0].handler, ANONYMOUS_HANDLER);
}

#[test]
fn test_print_routes_emits_header_and_rows() {
    let mut api = Router::new();
    api.get("/widgets", labeled("list_widgets")).unwrap();

    let mut router = Router::new();
    router.subpath("/api", api).unwrap();
    router.delete("/cache", labeled("drop_cache")).unwrap();

    let mut out = Vec::new();
    router.print_routes(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Method") && lines[0].contains("Path") && lines[0].contains("Handler"));
    assert!(lines[1].starts_with("GET"));
    assert!(lines[1].contains("/api/widgets"));
    assert!(lines[1].ends_with("list_widgets"));
    assert!(lines[2].starts_with("DELETE"));
    assert!(lines[2].contains("/cache"));
    assert!(lines[2].ends_with("drop_cache"));
}
