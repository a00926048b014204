//! Generic MCP transport helpers (stdio, streamable HTTP, SSE) decoupled from tool logic.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rmcp::serve_server;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use rmcp::transport::streamable_http_server::tower::{StreamableHttpServerConfig, StreamableHttpService};
use tokio_util::sync::CancellationToken;

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
pub use rmcp::ServerHandler;

/// Serve one handler over stdin/stdout until the client disconnects.
pub async fn serve_stdio<H>(handler: H) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    H: ServerHandler,
{
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let running = serve_server(handler, (stdin, stdout)).await?;
    let reason = running.waiting().await?;
    tracing::info!(?reason, "stdio session ended");
    Ok(())
}

/// Request/response transport mounted at `/mcp`. One handler per session.
pub fn make_streamable_http_service<H>(
    factory: impl Fn() -> H + Send + Sync + 'static,
    session_mgr: Arc<LocalSessionManager>,
    keep_alive: Duration,
) -> StreamableHttpService<H, LocalSessionManager>
where
    H: ServerHandler,
{
    let cfg = StreamableHttpServerConfig {
        sse_keep_alive: Some(keep_alive),
        ..Default::default()
    };
    tracing::debug!(stateful_mode = cfg.stateful_mode, keep_alive = ?cfg.sse_keep_alive, "streamable HTTP config");
    StreamableHttpService::new(move || Ok(factory()), session_mgr, cfg)
}

/// Legacy SSE transport: `GET sse_path` opens the stream, `POST post_path`
/// delivers client messages. Must run inside a tokio runtime; the returned
/// token stops the session acceptor.
pub fn make_sse_router<H>(
    factory: impl Fn() -> H + Send + 'static,
    bind: SocketAddr,
    sse_path: &str,
    post_path: &str,
    keep_alive: Duration,
) -> (axum::Router, CancellationToken)
where
    H: ServerHandler,
{
    let config = SseServerConfig {
        bind,
        sse_path: sse_path.to_string(),
        post_path: post_path.to_string(),
        ct: CancellationToken::new(),
        sse_keep_alive: Some(keep_alive),
    };
    let (sse_server, router) = SseServer::new(config);
    let ct = sse_server.with_service(factory);
    (router, ct)
}
