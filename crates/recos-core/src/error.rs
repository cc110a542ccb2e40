//! Error types for recos-core

use thiserror::Error;

/// A price string with no usable numeric part
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    #[error("Price has no digits: {0:?}")]
    NoDigits(String),

    #[error("Price is not a number: {0:?}")]
    NotNumeric(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Parse error: {0}")]
    Parse(#[from] PriceParseError),

    #[error("Invalid item id: {0:?}")]
    InvalidItemId(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
