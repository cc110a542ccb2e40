//! Error types for recos-client

use thiserror::Error;

/// Classified failure of a remote catalog operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The backend could not be reached (DNS, refused connection, timeout)
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("{}", status_line(*status, status_text))]
    Response { status: u16, status_text: String },

    /// The payload did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Status code for `Response` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// "503 Service Unavailable", or just the code when there is no reason phrase
fn status_line(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{} {}", status, status_text)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
