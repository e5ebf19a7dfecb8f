//! Normalized gateway outcome.
//!
//! An [`Outcome`] is the single shape every classified failure collapses
//! into: an HTTP status, a human-readable message, and an optional
//! structured payload echoed from the downstream response. Outcomes are
//! values - created fresh per classification, never mutated, never shared
//! across requests.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The normalized result of classifying a gateway failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// HTTP status to report to the caller.
    pub status: StatusCode,

    /// Human-readable explanation, surfaced in the response body.
    pub message: String,

    /// Optional structured payload (e.g., an echo of the downstream error
    /// body). Absent for outcomes that carry no payload.
    pub body: Option<serde_json::Value>,
}

impl Outcome {
    /// Creates an outcome without a payload.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Attaches a structured payload to the outcome.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The numeric status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let payload = match self.body {
            Some(details) => json!({
                "error": self.message,
                "details": details,
            }),
            None => json!({
                "error": self.message,
            }),
        };

        (self.status, Json(payload)).into_response()
    }
}
