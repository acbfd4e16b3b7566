//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding configuration and input validation failures.
#[derive(Debug)]
pub enum AdminError {
    /// An error from the underlying API client.
    Api(church_admin_api::Error),
    /// Required configuration was missing or malformed.
    Config(String),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl AdminError {
    /// Message suitable for showing to an operator. API failures go through
    /// the same priority routine every list view uses.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<church_admin_api::Error> for AdminError {
    fn from(e: church_admin_api::Error) -> Self {
        Self::Api(e)
    }
}
