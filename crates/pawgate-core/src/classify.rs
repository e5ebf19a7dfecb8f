//! Outcome classification.
//!
//! A single ordered rule table turns any [`ServiceFailure`] into exactly one
//! [`Outcome`]. Centralizing the mapping here keeps it auditable and
//! testable: a new downstream failure shape is one more rule, not a new
//! branch duplicated across call sites.
//!
//! The table is total - every possible input maps to some outcome - and the
//! classifier is a pure function that cannot fail.

use axum::http::StatusCode;

use crate::error::{DomainKind, ServiceFailure};
use crate::outcome::Outcome;

/// Message used for unclassified failures when no override is configured.
pub const DEFAULT_GENERIC_MESSAGE: &str = "unexpected error";

/// Fallback message for a 422 whose downstream message is empty.
const UNPROCESSABLE_MESSAGE: &str = "unprocessable";

/// Fallback message for a not-found failure whose message is empty.
const NOT_FOUND_MESSAGE: &str = "resource not found";

/// Maps gateway failures to normalized outcomes.
///
/// Rule precedence, first match wins:
///
/// 1. transport 422 - propagated with the downstream message, no body
/// 2. transport 404 or domain not-found - 404
/// 3. transport 400 or domain invalid-input - 400 with the offending-input
///    message
/// 4. transport 409 or domain conflict - 409, message verbatim
/// 5. domain invalid-credentials - 401
/// 6. any other explicit transport status - passed through unchanged
/// 7. everything else - 500 with the configured generic message; the
///    original message is logged but not echoed to the caller
///
/// Domain-kind rules apply only to failures the gateway raised itself;
/// anything that reached a downstream service is a transport failure and
/// keeps the status the downstream actually sent.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    generic_message: String,
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_GENERIC_MESSAGE)
    }
}

impl OutcomeClassifier {
    /// Creates a classifier with the given message for unclassified
    /// failures.
    #[must_use]
    pub fn new(generic_message: impl Into<String>) -> Self {
        Self {
            generic_message: generic_message.into(),
        }
    }

    /// Classifies a failure into exactly one outcome.
    #[must_use]
    pub fn classify(&self, failure: &ServiceFailure) -> Outcome {
        match failure {
            ServiceFailure::Transport {
                status: 422,
                message,
                ..
            } => Outcome::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                non_empty(message, UNPROCESSABLE_MESSAGE),
            ),

            ServiceFailure::Transport {
                status: 404,
                message,
                body,
            } => with_optional_body(
                Outcome::new(StatusCode::NOT_FOUND, non_empty(message, NOT_FOUND_MESSAGE)),
                body,
            ),
            ServiceFailure::Domain {
                kind: DomainKind::NotFound,
                message,
            } => Outcome::new(StatusCode::NOT_FOUND, non_empty(message, NOT_FOUND_MESSAGE)),

            ServiceFailure::Transport {
                status: 400,
                message,
                body,
            } => with_optional_body(Outcome::new(StatusCode::BAD_REQUEST, message), body),
            ServiceFailure::Domain {
                kind: DomainKind::InvalidInput,
                message,
            } => Outcome::new(StatusCode::BAD_REQUEST, message),

            ServiceFailure::Transport {
                status: 409,
                message,
                body,
            } => with_optional_body(Outcome::new(StatusCode::CONFLICT, message), body),
            ServiceFailure::Domain {
                kind: DomainKind::Conflict,
                message,
            } => Outcome::new(StatusCode::CONFLICT, message),

            ServiceFailure::Domain {
                kind: DomainKind::InvalidCredentials,
                message,
            } => Outcome::new(StatusCode::UNAUTHORIZED, message),

            ServiceFailure::Transport {
                status,
                message,
                body,
            } => match StatusCode::from_u16(*status) {
                Ok(code) => with_optional_body(Outcome::new(code, message), body),
                // A status outside the valid HTTP range cannot be passed
                // through; treat the failure as unclassified.
                Err(_) => self.unclassified(failure),
            },

            ServiceFailure::Unexpected { .. } => self.unclassified(failure),
        }
    }

    fn unclassified(&self, failure: &ServiceFailure) -> Outcome {
        tracing::warn!(
            category = %failure.category(),
            detail = %failure,
            "Unclassified gateway failure"
        );
        Outcome::new(StatusCode::INTERNAL_SERVER_ERROR, &self.generic_message)
    }
}

fn non_empty<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.is_empty() { fallback } else { message }
}

fn with_optional_body(outcome: Outcome, body: &Option<serde_json::Value>) -> Outcome {
    match body {
        Some(payload) => outcome.with_body(payload.clone()),
        None => outcome,
    }
}
