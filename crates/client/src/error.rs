//! Client-side errors.

use thiserror::Error;

/// Errors that can occur when talking to the locations API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a failure envelope.
    ///
    /// Displays as the envelope's `error` field so it can be shown as-is.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    /// The response body was not a valid envelope.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API URL cannot be used as a base.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// A successful envelope arrived without its `data` member.
    #[error("Response is missing data")]
    MissingData,
}

impl ClientError {
    /// HTTP status reported by the server, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Individual validation messages, empty unless the server rejected a payload.
    #[must_use]
    pub fn validation_errors(&self) -> &[String] {
        match self {
            Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}
