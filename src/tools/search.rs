use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::clients::webhook::{WebhookClient, WebhookError};
use crate::core::content::ToolResult;
use crate::domain::{Freshness, SearchRequest};

pub const WEB_NAME: &str = "web_search";
pub const WEB_DESCRIPTION: &str = "Search the web for up-to-date information";
pub const NEWS_NAME: &str = "news_search";
pub const NEWS_DESCRIPTION: &str = "Search recent news articles";

const WEB_BANNER: &str = "Search Results:\n\n";
const NEWS_BANNER: &str = "News Results:\n\n";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// The search query.
    pub query: String,
    /// Restrict results to the past day (pd), week (pw), month (pm) or year (py).
    #[serde(default)]
    pub freshness: Option<Freshness>,
}

pub async fn web_search(client: &WebhookClient, endpoint: Option<&str>, args: SearchArgs) -> ToolResult {
    search(client, WEB_NAME, endpoint, WEB_BANNER, args).await
}

pub async fn news_search(client: &WebhookClient, endpoint: Option<&str>, args: SearchArgs) -> ToolResult {
    search(client, NEWS_NAME, endpoint, NEWS_BANNER, args).await
}

async fn search(
    client: &WebhookClient,
    tool: &'static str,
    endpoint: Option<&str>,
    banner: &str,
    args: SearchArgs,
) -> ToolResult {
    let body = SearchRequest {
        q: &args.query,
        freshness: args.freshness,
    };
    match client.post_json(tool, endpoint, &body).await {
        Ok(data) => match render(&data) {
            Ok(text) => ToolResult::text(format!("{banner}{text}")),
            Err(e) => proxy_error(e),
        },
        Err(e) => proxy_error(e),
    }
}

pub(crate) fn render(data: &JsonValue) -> Result<String, WebhookError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Failure shape shared by every webhook-backed tool.
pub(crate) fn proxy_error(e: WebhookError) -> ToolResult {
    ToolResult::error(format!("Error performing search: {e}"))
}
