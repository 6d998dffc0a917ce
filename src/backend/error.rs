//! Errors returned by the REST backend client

use thiserror::Error;

/// Failure of a single backend request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered 404
    #[error("record not found")]
    NotFound,

    /// Any other non-success status; `message` is the server's or a generic fallback
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The upload service refused or failed the upload
    #[error("{0}")]
    Upload(String),
}

impl ApiError {
    /// Message worth showing to the user verbatim, if the server provided one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Upload(message) => Some(message),
            _ => None,
        }
    }

    /// Message for a failure notification, with a generic fallback
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| "Please try again later.".to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
