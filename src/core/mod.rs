//! Core types: tool definitions, results and the gateway error model.

pub mod content;
pub mod error;
pub mod tool;

pub use content::{ContentItem, ToolResult};
pub use error::GatewayError;
pub use tool::ToolDefinition;
