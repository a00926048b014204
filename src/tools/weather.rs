use schemars::JsonSchema;
use serde::Deserialize;

use crate::clients::webhook::WebhookClient;
use crate::core::content::ToolResult;
use crate::domain::WeatherRequest;
use crate::tools::search::{proxy_error, render};

pub const NAME: &str = "weather_lookup";
pub const DESCRIPTION: &str = "Look up current weather and forecast for a location";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WeatherArgs {
    /// City, airport code or place name.
    pub location: String,
    /// Compact flag string selecting units and forecast horizon, e.g. "1m"
    /// (metric units, today's forecast). Flags may be concatenated.
    #[serde(default)]
    pub options: Option<String>,
}

pub async fn weather_lookup(client: &WebhookClient, endpoint: Option<&str>, args: WeatherArgs) -> ToolResult {
    let body = WeatherRequest {
        location: &args.location,
        options: args.options.as_deref(),
    };
    match client.post_json(NAME, endpoint, &body).await {
        Ok(data) => match render(&data) {
            Ok(text) => ToolResult::text(text),
            Err(e) => proxy_error(e),
        },
        Err(e) => proxy_error(e),
    }
}
