//! # Response Envelope
//!
//! The uniform JSON wrapper every endpoint answers with.
//!
//! Success bodies carry the payload, a human-readable message, and an
//! ISO-8601 timestamp; list shapes add `count` and bounded lists add
//! `total`. Failure bodies carry the message alone, plus the underlying
//! detail for server errors.

use chrono::Utc;
use serde::Serialize;

/// Successful response envelope
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a payload with a message and the current timestamp
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
            count: None,
            total: None,
        }
    }

    /// Attach the number of records returned
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Attach the full collection size
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

/// Failure response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    /// Failure with a self-contained message (client errors)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    /// Failure with a generic message and the underlying detail attached
    /// (server errors)
    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(detail.into()),
        }
    }
}
