use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RefugeError>;

#[derive(Error, Debug)]
pub enum RefugeError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Failed to save {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: Arc<RefugeError>,
    },
}

impl RefugeError {
    /// Classify a transport error, keeping timeouts apart from everything else
    pub fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            RefugeError::Timeout {
                url: url.to_string(),
            }
        } else {
            RefugeError::Request {
                url: url.to_string(),
                source,
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RefugeError::Timeout { .. })
    }
}
