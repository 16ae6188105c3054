use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("controller returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed controller reply: {0}")]
    Decode(#[from] serde_json::Error),
    /// Error object reported by the controller; displayed verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("invalid base url: {0}")]
    BaseUrl(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;
