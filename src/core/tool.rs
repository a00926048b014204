use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::core::content::ToolResult;

type ErasedHandler =
    Arc<dyn Fn(JsonValue) -> Result<BoxFuture<'static, ToolResult>, serde_json::Error> + Send + Sync>;

/// A named tool: metadata, JSON schema and a type-erased handler.
///
/// The schema is derived from the handler's argument type, so the advertised
/// schema and the validation performed on dispatch cannot drift apart.
#[derive(Clone)]
pub struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    input_schema: Arc<JsonObject>,
    handler: ErasedHandler,
}

impl ToolDefinition {
    pub fn new<A, F, Fut>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(move |raw: JsonValue| {
            let args: A = serde_json::from_value(raw)?;
            Ok(Box::pin(handler(args)) as BoxFuture<'static, ToolResult>)
        });
        Self {
            name,
            description,
            input_schema: input_schema_for::<A>(),
            handler,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> Arc<JsonObject> {
        self.input_schema.clone()
    }

    /// Validate `arguments` and run the handler. Invalid arguments come back as
    /// a failed result and the handler is never invoked.
    pub async fn invoke(&self, arguments: JsonObject) -> ToolResult {
        match (self.handler)(JsonValue::Object(arguments)) {
            Ok(fut) => fut.await,
            Err(e) => ToolResult::error(format!("Invalid arguments for tool '{}': {e}", self.name)),
        }
    }

    /// MCP metadata as advertised by `tools/list`.
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, self.input_schema())
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

fn input_schema_for<A: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(A);
    match serde_json::to_value(&schema) {
        Ok(JsonValue::Object(map)) => Arc::new(map),
        _ => {
            let mut map = JsonObject::new();
            map.insert("type".into(), JsonValue::String("object".into()));
            Arc::new(map)
        }
    }
}
