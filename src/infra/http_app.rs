use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{StatusCode, Uri},
    routing::{any_service, get},
    Router,
};
use tokio_util::sync::CancellationToken;

use crate::core::error::GatewayError;
use crate::infra::config::Config;
use crate::infra::mcp::ToolsSvc;
use crate::infra::runtime::mcp_transport::{self, LocalSessionManager};
use crate::tools::ToolRegistry;

pub const SSE_PATH: &str = "/sse";
pub const SSE_MESSAGE_PATH: &str = "/sse/message";
pub const MCP_PATH: &str = "/mcp";
pub const HEALTH_PATH: &str = "/healthz";

/// Where an inbound path is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Streaming transport (`/sse`, `/sse/message`).
    Sse,
    /// Request/response transport (`/mcp`).
    Mcp,
    Health,
    NotFound,
}

impl Route {
    /// Mirrors the routes mounted in [`build_app`]; keep the two in step.
    pub fn classify(path: &str) -> Self {
        match path {
            SSE_PATH | SSE_MESSAGE_PATH => Route::Sse,
            MCP_PATH => Route::Mcp,
            HEALTH_PATH => Route::Health,
            _ => Route::NotFound,
        }
    }
}

pub struct App {
    pub router: Router,
    /// Stops the SSE session acceptor on shutdown.
    pub sse_shutdown: CancellationToken,
}

/// `/healthz`, streamable MCP at `/mcp`, SSE MCP at `/sse` + `/sse/message`,
/// plain-text 404 for everything else. Must be called inside a tokio runtime.
pub fn build_app(cfg: &Config, registry: Arc<ToolRegistry>) -> Result<App, GatewayError> {
    let keep_alive = Duration::from_secs(cfg.sse_keep_alive_secs);
    let factory = move || ToolsSvc::new(registry.clone());

    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service =
        mcp_transport::make_streamable_http_service(factory.clone(), session_mgr, keep_alive);
    let (sse_router, sse_shutdown) = mcp_transport::make_sse_router(
        factory,
        cfg.bind_addr()?,
        SSE_PATH,
        SSE_MESSAGE_PATH,
        keep_alive,
    );

    let router = Router::new()
        .route(HEALTH_PATH, get(|| async { "ok" }))
        .route_service(MCP_PATH, any_service(mcp_service))
        .merge(sse_router)
        .fallback(not_found);

    Ok(App { router, sse_shutdown })
}

async fn not_found(uri: Uri) -> (StatusCode, &'static str) {
    tracing::debug!(path = %uri.path(), route = ?Route::classify(uri.path()), "no route");
    (StatusCode::NOT_FOUND, "Not found")
}
