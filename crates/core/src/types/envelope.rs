//! Uniform JSON response wrapper.
//!
//! Every API response, success or failure, is an [`Envelope`]. Optional
//! members are omitted from the JSON when unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `{ success, data, error, errors, message, count, timestamp }` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    /// A missing member reads as `None`; no `T: Default` bound is needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Individual rule violations, set only for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl<T> Envelope<T> {
    /// A successful response carrying `data`.
    #[must_use]
    pub const fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
            message: None,
            count: None,
            timestamp: None,
        }
    }

    /// A failed response with a short error description.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            errors: None,
            message: None,
            count: None,
            timestamp: None,
        }
    }

    /// A successful response with only a confirmation message.
    #[must_use]
    pub fn confirmation(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            errors: None,
            message: Some(message.into()),
            count: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl<T> Envelope<Vec<T>> {
    /// A successful list response; `count` is the number of items.
    #[must_use]
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        let mut envelope = Self::data(items);
        envelope.count = Some(count);
        envelope
    }
}
