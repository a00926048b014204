//! Runtime configuration: defaults, then an optional TOML file, then env vars.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::core::error::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Server,
    Stdio,
}

impl FromStr for Mode {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "server" => Ok(Mode::Server),
            "stdio" => Ok(Mode::Stdio),
            other => Err(GatewayError::config(format!(
                "invalid MODE: {other}. Must be 'server' or 'stdio'"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Server => f.write_str("server"),
            Mode::Stdio => f.write_str("stdio"),
        }
    }
}

/// Outbound webhook endpoints and client timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub web_search: Option<String>,
    pub news_search: Option<String>,
    pub weather: Option<String>,
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            web_search: None,
            news_search: None,
            weather: None,
            connect_timeout_ms: 2_000,
            timeout_ms: 6_000,
        }
    }
}

/// Secrets injected by the host environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
    pub sse_keep_alive_secs: u64,
    pub webhooks: WebhookConfig,
    pub credentials: Credentials,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Server,
            host: "0.0.0.0".into(),
            port: 8080,
            sse_keep_alive_secs: 15,
            webhooks: WebhookConfig::default(),
            credentials: Credentials::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    server: FileServer,
    webhooks: FileWebhooks,
    credentials: FileCredentials,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileServer {
    mode: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    sse_keep_alive_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileWebhooks {
    web_search: Option<String>,
    news_search: Option<String>,
    weather: Option<String>,
    connect_timeout_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileCredentials {
    api_key: Option<String>,
}

impl Config {
    /// Load from `CONFIG_PATH` (if set) and the process environment.
    pub fn load() -> Result<Self, GatewayError> {
        let path = std::env::var("CONFIG_PATH").ok().filter(|p| !p.trim().is_empty());
        Self::load_from(path.map(PathBuf::from).as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self, GatewayError> {
        let mut cfg = Config::default();
        if let Some(path) = path {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                GatewayError::config(format!("cannot read {}: {e}", path.display()))
            })?;
            cfg.apply_toml(&raw)?;
        }
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_toml(&mut self, raw: &str) -> Result<(), GatewayError> {
        let file: FileConfig =
            toml::from_str(raw).map_err(|e| GatewayError::config(format!("config file: {e}")))?;

        if let Some(mode) = file.server.mode {
            self.mode = mode.parse()?;
        }
        if let Some(host) = file.server.host {
            self.host = host;
        }
        if let Some(port) = file.server.port {
            self.port = port;
        }
        if let Some(secs) = file.server.sse_keep_alive_secs {
            self.sse_keep_alive_secs = secs;
        }

        let hooks = &mut self.webhooks;
        if let Some(url) = non_empty(file.webhooks.web_search) {
            hooks.web_search = Some(url);
        }
        if let Some(url) = non_empty(file.webhooks.news_search) {
            hooks.news_search = Some(url);
        }
        if let Some(url) = non_empty(file.webhooks.weather) {
            hooks.weather = Some(url);
        }
        if let Some(ms) = file.webhooks.connect_timeout_ms {
            hooks.connect_timeout_ms = ms;
        }
        if let Some(ms) = file.webhooks.timeout_ms {
            hooks.timeout_ms = ms;
        }

        if let Some(key) = non_empty(file.credentials.api_key) {
            self.credentials.api_key = Some(key);
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), GatewayError> {
        if let Some(mode) = var("MODE") {
            self.mode = mode.parse()?;
        }
        if let Some(host) = non_empty(var("HOST")) {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = parse_var("PORT", &port)?;
        }
        if let Some(secs) = var("SSE_KEEP_ALIVE_SECS") {
            self.sse_keep_alive_secs = parse_var("SSE_KEEP_ALIVE_SECS", &secs)?;
        }
        if let Some(url) = non_empty(var("WEB_SEARCH_WEBHOOK_URL")) {
            self.webhooks.web_search = Some(url);
        }
        if let Some(url) = non_empty(var("NEWS_SEARCH_WEBHOOK_URL")) {
            self.webhooks.news_search = Some(url);
        }
        if let Some(url) = non_empty(var("WEATHER_WEBHOOK_URL")) {
            self.webhooks.weather = Some(url);
        }
        if let Some(ms) = var("WEBHOOK_CONNECT_TIMEOUT_MS") {
            self.webhooks.connect_timeout_ms = parse_var("WEBHOOK_CONNECT_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = var("WEBHOOK_TIMEOUT_MS") {
            self.webhooks.timeout_ms = parse_var("WEBHOOK_TIMEOUT_MS", &ms)?;
        }
        if let Some(key) = non_empty(var("API_KEY")) {
            self.credentials.api_key = Some(key);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.mode == Mode::Server && self.port == 0 {
            return Err(GatewayError::config("PORT cannot be 0"));
        }
        self.host
            .parse::<IpAddr>()
            .map_err(|_| GatewayError::config(format!("HOST is not an IP address: {}", self.host)))?;
        if self.webhooks.connect_timeout_ms == 0 || self.webhooks.timeout_ms == 0 {
            return Err(GatewayError::config("webhook timeouts must be positive"));
        }
        if self.sse_keep_alive_secs == 0 {
            return Err(GatewayError::config("SSE_KEEP_ALIVE_SECS must be positive"));
        }
        for (name, url) in [
            ("web_search", &self.webhooks.web_search),
            ("news_search", &self.webhooks.news_search),
            ("weather", &self.webhooks.weather),
        ] {
            if let Some(url) = url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(GatewayError::config(format!(
                        "{name} webhook must be an http(s) URL, got: {url}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, GatewayError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| GatewayError::config(format!("HOST is not an IP address: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, GatewayError> {
    raw.trim()
        .parse()
        .map_err(|_| GatewayError::config(format!("{key} has an invalid value: {raw}")))
}
