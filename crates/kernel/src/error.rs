//! Menu rendering error types.
//!
//! Only configuration mistakes surface as errors. Malformed host data is
//! absorbed by the sanitization layer and never reaches this type.

use thiserror::Error;

/// Errors raised while resolving a render call.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("unknown menu variant: {0}")]
    UnknownVariant(String),

    #[error("unknown option `{key}` for menu variant `{variant}`")]
    UnknownOption { variant: String, key: String },

    #[error("option `{key}` expects {expected}, got {found}")]
    OptionType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid value for option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("menu variant already registered: {0}")]
    DuplicateVariant(String),

    #[error("malformed menu tree")]
    Tree(#[from] serde_json::Error),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
