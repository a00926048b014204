use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt; // for .collect
use hyper::{header, Request, StatusCode};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tower::ServiceExt; // for .oneshot

use agent_tools_gateway::infra::config::{Config, WebhookConfig};
use agent_tools_gateway::infra::http_app::{self, App};
use agent_tools_gateway::tools::build_registry;

fn app_with_webhooks(webhooks: WebhookConfig) -> App {
    let cfg = Config { webhooks, ..Config::default() };
    let registry = Arc::new(build_registry(&cfg).unwrap());
    http_app::build_app(&cfg, registry).unwrap()
}

fn mcp_post(body: &Value, session_id: Option<&str>) -> Request<Body> {
    let mut b = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(sid) = session_id {
        b = b.header("MCP-Session-Id", sid);
    }
    b.body(Body::from(body.to_string())).unwrap()
}

/// Pull the JSON-RPC frame out of an SSE (`data: ...`) or plain JSON body.
async fn rpc_body(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let s = String::from_utf8_lossy(&bytes);
    s.lines()
        .find_map(|line| line.strip_prefix("data: ").map(|d| d.to_string()))
        .and_then(|d| serde_json::from_str::<Value>(&d).ok())
        .or_else(|| serde_json::from_str::<Value>(&s).ok())
        .expect("Did not find a JSON-RPC response")
}

async fn initialize(app: &Router) -> String {
    let init = json!({
        "jsonrpc":"2.0","id":1,"method":"initialize",
        "params":{ "protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"0.1"} }
    });
    let init_res = app.clone().oneshot(mcp_post(&init, None)).await.unwrap();
    assert!(init_res.status().is_success());
    let session_id = init_res
        .headers()
        .get("MCP-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    let initialized = json!({"jsonrpc":"2.0","method":"notifications/initialized","params":{}});
    let res = app
        .clone()
        .oneshot(mcp_post(&initialized, Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    session_id
}

#[tokio::test]
async fn initialize_list_and_call_web_search_over_streamable_http() {
    let server = httpmock::MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/web")
            .header("content-type", "application/json")
            .json_body(json!({"q": "cats"}));
        then.status(200).json_body(json!({"results": []}));
    });

    let app = app_with_webhooks(WebhookConfig {
        web_search: Some(server.url("/web")),
        ..WebhookConfig::default()
    });
    let router = app.router.clone();
    let session_id = initialize(&router).await;

    // tools/list
    let list = json!({"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}});
    let list_res = timeout(
        Duration::from_secs(20),
        router.clone().oneshot(mcp_post(&list, Some(&session_id))),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(list_res.status().is_success());
    let v = rpc_body(list_res).await;
    let names: Vec<&str> = v["result"]["tools"]
        .as_array()
        .expect("tools array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["getcurrenttime", "getrandomnumber", "web_search", "news_search", "weather_lookup"]
    );

    // tools/call
    let call = json!({
        "jsonrpc":"2.0","id":3,"method":"tools/call",
        "params": {"name":"web_search","arguments":{"query":"cats"}}
    });
    let call_res = router
        .clone()
        .oneshot(mcp_post(&call, Some(&session_id)))
        .await
        .unwrap();
    assert!(call_res.status().is_success());
    let v = rpc_body(call_res).await;
    hook.assert();

    assert_eq!(v["result"]["isError"], false);
    let text = v["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Search Results:\n\n"), "got: {text}");
    app.sse_shutdown.cancel();
}

#[tokio::test]
async fn webhook_failure_is_reported_in_the_result() {
    let server = httpmock::MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::POST).path("/web");
        then.status(500);
    });

    let app = app_with_webhooks(WebhookConfig {
        web_search: Some(server.url("/web")),
        ..WebhookConfig::default()
    });
    let router = app.router.clone();
    let session_id = initialize(&router).await;

    let call = json!({
        "jsonrpc":"2.0","id":4,"method":"tools/call",
        "params": {"name":"web_search","arguments":{"query":"cats"}}
    });
    let res = router.clone().oneshot(mcp_post(&call, Some(&session_id))).await.unwrap();
    let v = rpc_body(res).await;

    assert_eq!(v["result"]["isError"], true);
    assert!(v["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Error performing search: "));
    app.sse_shutdown.cancel();
}

#[tokio::test]
async fn unknown_tool_is_a_protocol_error() {
    let app = app_with_webhooks(WebhookConfig::default());
    let router = app.router.clone();
    let session_id = initialize(&router).await;

    let call = json!({
        "jsonrpc":"2.0","id":5,"method":"tools/call",
        "params": {"name":"does.not.exist","arguments":{}}
    });
    let res = router.clone().oneshot(mcp_post(&call, Some(&session_id))).await.unwrap();
    let v = rpc_body(res).await;
    assert_eq!(v["error"]["code"], -32602);
    app.sse_shutdown.cancel();
}
