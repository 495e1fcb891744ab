use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to retrieve {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

impl SourceError {
    /// HTTP status code, if the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
