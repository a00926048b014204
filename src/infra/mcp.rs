//! MCP server integration for agent-tools-gateway.
//!
//! `ToolsSvc` answers `tools/list` and `tools/call` straight from the
//! [`ToolRegistry`]. The registry owns validation; this layer only maps its
//! outcome onto rmcp types.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, JsonObject, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};

use crate::core::error::GatewayError;
use crate::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Tools: getcurrenttime (time in an IANA timezone), getrandomnumber \
(integer between x and y), web_search and news_search (query with optional freshness pd/pw/pm/py), \
weather_lookup (location with optional option flags).";

#[derive(Clone)]
pub struct ToolsSvc {
    registry: Arc<ToolRegistry>,
}

impl ToolsSvc {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Transport-independent body of `tools/call`.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        match self.registry.dispatch(name, arguments.unwrap_or_default()).await {
            Ok(result) => Ok(result.into()),
            Err(e @ GatewayError::UnknownTool(_)) => Err(McpError::invalid_params(e.to_string(), None)),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }
}

impl ServerHandler for ToolsSvc {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = env!("CARGO_PKG_NAME").into();
        info.server_info.version = env!("CARGO_PKG_VERSION").into();
        info.instructions = Some(INSTRUCTIONS.into());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.registry.list(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %request.name, "tools/call");
        self.call(&request.name, request.arguments).await
    }
}
