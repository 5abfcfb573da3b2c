use thiserror::Error;

/// Everything that can stop a chart loader before it reaches its render target.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed JSON body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Shape(&'static str),
}
