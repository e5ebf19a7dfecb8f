//! Downstream failure taxonomy.
//!
//! Every failure a gateway call can produce is represented as one
//! [`ServiceFailure`] value before it reaches the classifier. Three shapes
//! cover the whole space: domain errors raised by the gateway itself before
//! any downstream call, transport errors carrying the HTTP status a
//! downstream service actually sent, and unclassified failures (timeouts,
//! connection resets, anything unexpected).

use thiserror::Error;

/// Kinds of domain errors the gateway raises itself.
///
/// Domain errors never originate from a downstream service; they are
/// produced before a downstream call is attempted (credential rejection,
/// input validation). Anything that reached a downstream surfaces as
/// [`ServiceFailure::Transport`] instead, so the classifier never invents a
/// status the downstream did not send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// The bearer token is absent, malformed, expired, or rejected.
    InvalidCredentials,
    /// The requested resource does not exist.
    NotFound,
    /// The request input failed validation.
    InvalidInput,
    /// The request conflicts with existing state.
    Conflict,
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid_credentials"),
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::Conflict => write!(f, "conflict"),
        }
    }
}

/// A failure produced by a gateway call, in one of three shapes.
#[derive(Debug, Clone, Error)]
pub enum ServiceFailure {
    /// An error raised by the gateway itself before any downstream call.
    #[error("{kind}: {message}")]
    Domain {
        /// What went wrong.
        kind: DomainKind,
        /// Description of the failure.
        message: String,
    },

    /// A downstream call failed with an explicit HTTP status.
    #[error("downstream returned {status}: {message}")]
    Transport {
        /// The HTTP status the downstream service sent.
        status: u16,
        /// The downstream-provided message.
        message: String,
        /// Raw response body from the downstream, when one was captured.
        body: Option<serde_json::Value>,
    },

    /// Any other failure: timeout, connection refused, unexpected error.
    #[error("unexpected failure: {message}")]
    Unexpected {
        /// Description of the failure. Logged internally, never echoed to
        /// the caller.
        message: String,
    },
}

impl ServiceFailure {
    /// Creates a `Domain` failure with [`DomainKind::InvalidCredentials`].
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::Domain {
            kind: DomainKind::InvalidCredentials,
            message: message.into(),
        }
    }

    /// Creates a `Domain` failure with [`DomainKind::NotFound`].
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Domain {
            kind: DomainKind::NotFound,
            message: message.into(),
        }
    }

    /// Creates a `Domain` failure with [`DomainKind::InvalidInput`].
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::Domain {
            kind: DomainKind::InvalidInput,
            message: message.into(),
        }
    }

    /// Creates a `Domain` failure with [`DomainKind::Conflict`].
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Domain {
            kind: DomainKind::Conflict,
            message: message.into(),
        }
    }

    /// Creates a `Transport` failure without a captured body.
    #[must_use]
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Creates a `Transport` failure carrying the downstream response body.
    #[must_use]
    pub fn transport_with_body(
        status: u16,
        message: impl Into<String>,
        body: serde_json::Value,
    ) -> Self {
        Self::Transport {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Creates an `Unexpected` failure.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns `true` if this failure was raised by the gateway itself.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// Returns `true` if this failure carries a downstream HTTP status.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns the failure category for logging/monitoring.
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::Domain {
                kind: DomainKind::InvalidCredentials,
                ..
            } => FailureCategory::Authentication,
            Self::Domain { .. } => FailureCategory::Validation,
            Self::Transport { .. } => FailureCategory::Downstream,
            Self::Unexpected { .. } => FailureCategory::Unclassified,
        }
    }
}

/// Categories of gateway failures for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// Credential validation failures.
    Authentication,
    /// Domain-level input/state validation failures.
    Validation,
    /// Failures reported by a downstream service.
    Downstream,
    /// Everything else.
    Unclassified,
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Validation => write!(f, "validation"),
            Self::Downstream => write!(f, "downstream"),
            Self::Unclassified => write!(f, "unclassified"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_display() {
        let failure = ServiceFailure::invalid_credentials("token rejected");
        assert_eq!(failure.to_string(), "invalid_credentials: token rejected");

        let failure = ServiceFailure::transport(422, "Only 10 items left in stock");
        assert_eq!(
            failure.to_string(),
            "downstream returned 422: Only 10 items left in stock"
        );

        let failure = ServiceFailure::unexpected("connection reset");
        assert_eq!(failure.to_string(), "unexpected failure: connection reset");
    }

    #[test]
    fn test_failure_predicates() {
        assert!(ServiceFailure::not_found("no such vet").is_domain());
        assert!(!ServiceFailure::not_found("no such vet").is_transport());

        assert!(ServiceFailure::transport(409, "version conflict").is_transport());
        assert!(!ServiceFailure::unexpected("boom").is_domain());
    }

    #[test]
    fn test_failure_category() {
        assert_eq!(
            ServiceFailure::invalid_credentials("bad token").category(),
            FailureCategory::Authentication
        );
        assert_eq!(
            ServiceFailure::invalid_input("rating must be 1-5").category(),
            FailureCategory::Validation
        );
        assert_eq!(
            ServiceFailure::transport(404, "not found").category(),
            FailureCategory::Downstream
        );
        assert_eq!(
            ServiceFailure::unexpected("timeout").category(),
            FailureCategory::Unclassified
        );
    }

    #[test]
    fn test_transport_with_body_keeps_payload() {
        let failure = ServiceFailure::transport_with_body(
            400,
            "invalid visit date",
            json!({"field": "date", "reason": "in the past"}),
        );

        match failure {
            ServiceFailure::Transport { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body.unwrap()["field"], "date");
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[test]
    fn test_domain_kind_display() {
        assert_eq!(
            DomainKind::InvalidCredentials.to_string(),
            "invalid_credentials"
        );
        assert_eq!(DomainKind::NotFound.to_string(), "not_found");
        assert_eq!(DomainKind::InvalidInput.to_string(), "invalid_input");
        assert_eq!(DomainKind::Conflict.to_string(), "conflict");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(FailureCategory::Authentication.to_string(), "authentication");
        assert_eq!(FailureCategory::Validation.to_string(), "validation");
        assert_eq!(FailureCategory::Downstream.to_string(), "downstream");
        assert_eq!(FailureCategory::Unclassified.to_string(), "unclassified");
    }
}
