use reqwest::RequestBuilder;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const API_KEY_HEADER: &str = "x-api-key";

/// Generate a simple request id suitable for logging/correlation.
pub fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("atg-{}-{}", now.as_secs(), now.subsec_nanos())
}

/// Add the standard outbound headers. Returns the updated builder and the
/// request id used. The api key header is only set when a key is configured.
pub fn add_standard_headers(
    builder: RequestBuilder,
    request_id: Option<String>,
    api_key: Option<&str>,
) -> (RequestBuilder, String) {
    let rid = request_id.unwrap_or_else(generate_request_id);
    let mut b = builder.header(REQUEST_ID_HEADER, rid.as_str()).header(
        reqwest::header::USER_AGENT,
        format!("agent-tools-gateway/{}", env!("CARGO_PKG_VERSION")),
    );
    if let Some(key) = api_key {
        b = b.header(API_KEY_HEADER, key);
    }
    (b, rid)
}
