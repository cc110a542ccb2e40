//! Error types for recos-session

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to start background runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Background worker is not running")]
    Disconnected,

    #[error("Background queue is full")]
    QueueFull,
}

pub type Result<T> = std::result::Result<T, SessionError>;
