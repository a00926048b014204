use thiserror::Error;

/// Gateway-wide error model. Per-call tool failures never surface here; they
/// travel inside a failed `ToolResult` instead.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("tool already registered: {0}")]
    DuplicateTool(&'static str),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn config(msg: impl Into<String>) -> Self {
        GatewayError::Config(msg.into())
    }
}
