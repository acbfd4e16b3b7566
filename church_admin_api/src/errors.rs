//! Error types for the API client and the user-facing failure message routine.

use serde_json::Value;

/// Shown for an HTTP 500 that carries no `detail`. Server internals are never echoed.
pub const SERVER_ERROR_MESSAGE: &str = "A server error occurred. Please contact support.";

/// Shown for every other failure without a server-supplied explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed. Please try again.";

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The collection endpoint was empty or not an absolute URL. No request was sent.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// A cursor did not hold an absolute URL.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
    /// The request never produced a response (DNS, connectivity, timeout).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status. `body` holds whatever error
    /// fields could be parsed from the response.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: ErrorBody },
    /// A success response whose body was not valid JSON of the expected shape.
    #[error("Failed to parse response")]
    Decode,
}

/// Optional error fields the backend attaches to non-2xx responses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: Option<String>,
    pub non_field_errors: Option<Vec<String>>,
}

impl ErrorBody {
    /// Picks `detail` and `non_field_errors` out of an error body. Each field
    /// is read on its own, so a malformed one never hides the other.
    pub fn parse(body: &str) -> Self {
        let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);
        let detail = value
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string);
        let non_field_errors = value
            .get("non_field_errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            });
        Self {
            detail,
            non_field_errors,
        }
    }
}

impl Error {
    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message for display.
    ///
    /// Priority: server `detail`, then the first `non_field_errors` entry,
    /// then the support message for a 500, then the generic retry message.
    pub fn user_message(&self) -> String {
        match self {
            Error::HttpStatus { status, body } => {
                if let Some(detail) = &body.detail {
                    return detail.clone();
                }
                if let Some(first) = body.non_field_errors.as_ref().and_then(|e| e.first()) {
                    return first.clone();
                }
                if *status == 500 {
                    SERVER_ERROR_MESSAGE.to_string()
                } else {
                    GENERIC_FAILURE_MESSAGE.to_string()
                }
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
