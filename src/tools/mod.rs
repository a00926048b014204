//! The tool catalog: five handlers wired into one registry.

pub mod random;
pub mod registry;
pub mod search;
pub mod time;
pub mod weather;

use crate::clients::webhook::WebhookClient;
use crate::core::error::GatewayError;
use crate::core::tool::ToolDefinition;
use crate::infra::config::{Config, WebhookConfig};

pub use registry::ToolRegistry;

/// A webhook client bound to one endpoint.
#[derive(Clone)]
struct Proxy {
    client: WebhookClient,
    endpoint: Option<String>,
}

impl Proxy {
    fn new(client: &WebhookClient, endpoint: &Option<String>) -> Self {
        Self {
            client: client.clone(),
            endpoint: endpoint.clone(),
        }
    }
}

pub fn build_registry(cfg: &Config) -> Result<ToolRegistry, GatewayError> {
    let client = WebhookClient::new(&cfg.webhooks, cfg.credentials.api_key.clone())?;
    ToolRegistry::with_tools(catalog(&client, &cfg.webhooks))
}

pub fn catalog(client: &WebhookClient, hooks: &WebhookConfig) -> Vec<ToolDefinition> {
    let web = Proxy::new(client, &hooks.web_search);
    let news = Proxy::new(client, &hooks.news_search);
    let weather = Proxy::new(client, &hooks.weather);

    vec![
        ToolDefinition::new(time::NAME, time::DESCRIPTION, time::get_current_time),
        ToolDefinition::new(random::NAME, random::DESCRIPTION, random::get_random_number),
        ToolDefinition::new(
            search::WEB_NAME,
            search::WEB_DESCRIPTION,
            move |args: search::SearchArgs| {
                let p = web.clone();
                async move { search::web_search(&p.client, p.endpoint.as_deref(), args).await }
            },
        ),
        ToolDefinition::new(
            search::NEWS_NAME,
            search::NEWS_DESCRIPTION,
            move |args: search::SearchArgs| {
                let p = news.clone();
                async move { search::news_search(&p.client, p.endpoint.as_deref(), args).await }
            },
        ),
        ToolDefinition::new(
            weather::NAME,
            weather::DESCRIPTION,
            move |args: weather::WeatherArgs| {
                let p = weather.clone();
                async move { weather::weather_lookup(&p.client, p.endpoint.as_deref(), args).await }
            },
        ),
    ]
}
