use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::content::ToolResult;

pub const NAME: &str = "getcurrenttime";
pub const DESCRIPTION: &str = "Get the current time in the specified timezone";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TimeArgs {
    /// IANA timezone identifier, e.g. "America/New_York". Defaults to "UTC".
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

pub async fn get_current_time(args: TimeArgs) -> ToolResult {
    time_in(&args.timezone, Utc::now())
}

/// Render `now` in `timezone` as `h:mm:ss AM|PM ZONE`.
pub fn time_in(timezone: &str, now: DateTime<Utc>) -> ToolResult {
    // Exact IANA spelling first, then a case-insensitive match.
    let parsed = timezone
        .parse::<Tz>()
        .or_else(|_| Tz::from_str_insensitive(timezone));
    match parsed {
        Ok(tz) => ToolResult::text(now.with_timezone(&tz).format("%-I:%M:%S %p %Z").to_string()),
        Err(_) => {
            tracing::debug!(timezone, "unknown timezone");
            ToolResult::error(format!(
                "Error: Invalid time zone specified: {timezone}. Please provide a valid timezone \
                 identifier (e.g., 'America/New_York', 'Europe/London', 'Asia/Tokyo')."
            ))
        }
    }
}
