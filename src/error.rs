use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {message}")]
    Api { message: String },
}

impl FilterError {
    /// True when the failure happened while negotiating TLS or verifying the
    /// server certificate.
    pub fn is_tls_failure(&self) -> bool {
        match self {
            FilterError::Http(err) => is_tls_failure(err),
            _ => false,
        }
    }
}

/// reqwest does not expose a TLS error kind, so the causes below the request
/// error are inspected. The request error itself is skipped since its message
/// embeds the URL.
pub fn is_tls_failure(err: &reqwest::Error) -> bool {
    if !err.is_connect() && !err.is_request() {
        return false;
    }
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if mentions_tls(&cause.to_string()) {
            return true;
        }
        source = cause.source();
    }
    false
}

fn mentions_tls(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["certificate", "ssl", "tls", "handshake"]
        .iter()
        .any(|needle| lower.contains(needle))
}

pub type Result<T> = std::result::Result<T, FilterError>;
