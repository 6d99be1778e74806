use thiserror::Error;

/// Failure of a request to the SOW service.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl NetworkError {
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => {
                url
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server url '{raw}': {source}")]
    InvalidServerUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported server url scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
