use std::sync::Arc;

use crate::infra::config::{Config, Mode};
use crate::infra::http_app;
use crate::infra::mcp::ToolsSvc;
use crate::infra::runtime::mcp_transport;
use crate::tools;

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        web_search = cfg.webhooks.web_search.is_some(),
        news_search = cfg.webhooks.news_search.is_some(),
        weather = cfg.webhooks.weather.is_some(),
        api_key = cfg.credentials.api_key.is_some(),
        "BOOT agent-tools-gateway"
    );

    let registry = Arc::new(tools::build_registry(&cfg)?);
    tracing::info!(tools = ?registry.names(), "tool registry ready");

    // Stdio mode: MCP over stdin/stdout only, no HTTP listener.
    if cfg.mode == Mode::Stdio {
        mcp_transport::serve_stdio(ToolsSvc::new(registry))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = http_app::build_app(&cfg, registry)?;
    let addr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    app.sse_shutdown.cancel();
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
