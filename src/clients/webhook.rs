use std::time::Instant;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::core::error::GatewayError;
use crate::infra::config::WebhookConfig;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::make_http_client_with;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("webhook endpoint is not configured")]
    NotConfigured,

    #[error("HTTP error! status: {0}")]
    Status(StatusCode),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON in webhook response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Single-attempt JSON POST client shared by the proxy tools.
#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    api_key: Option<String>,
}

impl WebhookClient {
    pub fn new(cfg: &WebhookConfig, api_key: Option<String>) -> Result<Self, GatewayError> {
        let http = make_http_client_with(cfg)?;
        Ok(Self { http, api_key })
    }

    /// POST `body` as JSON to `endpoint` and parse the response as JSON.
    /// Any non-2xx status is an error; there is no retry.
    pub async fn post_json<B>(
        &self,
        tool: &'static str,
        endpoint: Option<&str>,
        body: &B,
    ) -> Result<JsonValue, WebhookError>
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint.ok_or(WebhookError::NotConfigured)?;
        let req_id = generate_request_id();
        tracing::debug!(tool, endpoint = %url, request_id = %req_id, "webhook request");

        let start = Instant::now();
        let res = self.send(url, req_id, body).await;
        let elapsed_ms = start.elapsed().as_millis() as f64;

        match &res {
            Ok(_) => {
                metrics::histogram!("webhook_latency_ms", "tool" => tool).record(elapsed_ms);
                crate::infra::logging::log_metric(tool, "remote_latency_ms", elapsed_ms);
            }
            Err(e) => {
                metrics::counter!("webhook_errors_total", "tool" => tool).increment(1);
                crate::infra::logging::log_metric(tool, "remote_error_total", 1.0);
                tracing::warn!(tool, error = %e, "webhook call failed");
            }
        }
        res
    }

    async fn send<B>(&self, url: &str, req_id: String, body: &B) -> Result<JsonValue, WebhookError>
    where
        B: Serialize + ?Sized,
    {
        let (builder, _rid) =
            add_standard_headers(self.http.post(url), Some(req_id), self.api_key.as_deref());
        let resp = builder.json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status));
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(api_key: Option<&str>) -> WebhookClient {
        WebhookClient::new(&WebhookConfig::default(), api_key.map(str::to_owned)).unwrap()
    }

    #[tokio::test]
    async fn it_posts_json_and_parses_response() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/hook")
                .header("content-type", "application/json")
                .json_body(json!({"q": "cats"}));
            then.status(200).json_body(json!({"results": [1, 2]}));
        });

        let url = server.url("/hook");
        let out = client(None)
            .post_json("web_search", Some(&url), &json!({"q": "cats"}))
            .await
            .unwrap();
        m.assert();
        assert_eq!(out, json!({"results": [1, 2]}));
    }

    #[tokio::test]
    async fn it_reports_status_with_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(500).body("err");
        });
        let url = server.url("/hook");
        let err = client(None)
            .post_json("web_search", Some(&url), &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::Status(s) if s.as_u16() == 500));
        assert_eq!(err.to_string(), "HTTP error! status: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn it_does_not_retry() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(503);
        });
        let url = server.url("/hook");
        let _ = client(None).post_json("news_search", Some(&url), &json!({})).await;
        m.assert_hits(1);
    }

    #[tokio::test]
    async fn it_rejects_non_json_bodies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(200).body("<html>nope</html>");
        });
        let url = server.url("/hook");
        let err = client(None)
            .post_json("weather_lookup", Some(&url), &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::Decode(_)));
    }

    #[tokio::test]
    async fn it_sets_correlation_and_api_key_headers() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/hook")
                .header_exists("x-request-id")
                .header_exists("user-agent")
                .header("x-api-key", "s3cret");
            then.status(200).json_body(json!({}));
        });
        let url = server.url("/hook");
        client(Some("s3cret"))
            .post_json("web_search", Some(&url), &json!({"q": "x"}))
            .await
            .unwrap();
        m.assert();
    }

    #[tokio::test]
    async fn unconfigured_endpoint_fails_fast() {
        let err = client(None)
            .post_json("weather_lookup", None, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::NotConfigured));
    }
}
