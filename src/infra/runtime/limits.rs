use std::time::Duration;

use crate::infra::config::WebhookConfig;

/// Build the outbound reqwest client. Timeouts come from config; redirects
/// keep reqwest's default policy.
pub fn make_http_client_with(cfg: &WebhookConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()
}
