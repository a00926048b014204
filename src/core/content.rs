//! Tool result model shared by every handler.
//!
//! Handlers build a [`ToolResult`] and never touch rmcp wire types directly;
//! the conversion into `CallToolResult` happens once, at the MCP boundary.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

/// One item of tool output. Only text is produced today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text { text: String },
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            ContentItem::Text { text } => text,
        }
    }
}

/// Outcome of a tool call. `content` always holds at least one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    content: Vec<ContentItem>,
    #[serde(default)]
    is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
            is_error: true,
        }
    }

    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Text of the first content item.
    pub fn first_text(&self) -> &str {
        self.content.first().map(ContentItem::as_text).unwrap_or_default()
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        let content: Vec<Content> = result
            .content
            .into_iter()
            .map(|item| match item {
                ContentItem::Text { text } => Content::text(text),
            })
            .collect();
        if result.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}
