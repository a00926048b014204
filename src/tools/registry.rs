use std::collections::HashMap;

use rmcp::model::{JsonObject, Tool};

use crate::core::content::ToolResult;
use crate::core::error::GatewayError;
use crate::core::tool::ToolDefinition;

/// Name-indexed tool table. Built once at boot, then shared read-only.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: ToolDefinition) -> Result<(), GatewayError> {
        let name = tool.name();
        if self.by_name.contains_key(name) {
            return Err(GatewayError::DuplicateTool(name));
        }
        self.by_name.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn with_tools<I>(tools: I) -> Result<Self, GatewayError>
    where
        I: IntoIterator<Item = ToolDefinition>,
    {
        let mut reg = Self::new();
        for t in tools {
            reg.register(t)?;
        }
        Ok(reg)
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(ToolDefinition::name).collect()
    }

    /// Tool metadata in registration order.
    pub fn list(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::to_tool).collect()
    }

    /// Look up `name` and run it. Only an unknown name is an `Err`; argument
    /// validation and handler failures come back as a failed `ToolResult`.
    pub async fn dispatch(&self, name: &str, arguments: JsonObject) -> Result<ToolResult, GatewayError> {
        let tool = self
            .get(name)
            .ok_or_else(|| GatewayError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = name, "dispatching tool call");
        let result = tool.invoke(arguments).await;
        let outcome = if result.is_error() { "error" } else { "ok" };
        metrics::counter!("tool_calls_total", "tool" => tool.name(), "outcome" => outcome).increment(1);
        if result.is_error() {
            tracing::warn!(tool = name, message = %result.first_text(), "tool call failed");
        }
        Ok(result)
    }
}
