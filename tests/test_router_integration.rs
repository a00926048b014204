use std::sync::Arc;

use axum::body::{to_bytes, Body};
use hyper::{Request, StatusCode};
use tower::ServiceExt;

use agent_tools_gateway::infra::config::Config;
use agent_tools_gateway::infra::http_app::{build_app, Route};
use agent_tools_gateway::tools::build_registry;

const BODY_LIMIT: usize = 1024 * 1024;

#[tokio::test]
async fn unknown_paths_get_plain_404_without_dispatch() {
    let cfg = Config::default();
    let app = build_app(&cfg, Arc::new(build_registry(&cfg).unwrap())).unwrap();

    for path in ["/unknown", "/tools/web_search", "/sse/other", "/"] {
        assert_eq!(Route::classify(path), Route::NotFound);
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"getcurrenttime"}}"#,
            ))
            .unwrap();
        let resp = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "path {path}");
        let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
        assert_eq!(&bytes[..], b"Not found");
    }
    app.sse_shutdown.cancel();
}

#[tokio::test]
async fn sse_message_without_session_is_rejected_by_transport() {
    let cfg = Config::default();
    let app = build_app(&cfg, Arc::new(build_registry(&cfg).unwrap())).unwrap();

    let req = Request::builder()
        .method("POST")
        .uri("/sse/message?sessionId=missing")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#))
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    // Routed to the SSE transport, which refuses unknown sessions.
    assert_ne!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_ne!(&bytes[..], b"Not found");
    app.sse_shutdown.cancel();
}
