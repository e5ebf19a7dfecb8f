//! Token validator seam.
//!
//! The validator is the external collaborator consulted on a cache miss. It
//! exchanges an opaque bearer token for a validated [`Identity`], or fails
//! when the token is missing, malformed, expired, or rejected by the
//! authentication service. The orchestration layer turns any validation
//! failure into an invalid-credentials outcome before a downstream call is
//! attempted; a validation failure never populates the cache.

use async_trait::async_trait;
use thiserror::Error;

use crate::identity::Identity;

/// Why a token failed validation.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// No token was presented.
    #[error("missing bearer token")]
    MissingToken,

    /// The token could not be parsed.
    #[error("malformed bearer token")]
    Malformed,

    /// The token is past its expiry.
    #[error("bearer token expired")]
    Expired,

    /// The authentication service rejected the token.
    #[error("token rejected: {message}")]
    Rejected {
        /// Description from the authentication service.
        message: String,
    },
}

impl ValidationError {
    /// Creates a `Rejected` error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Exchanges a bearer token for a validated identity.
///
/// Implementations typically call the authentication service over HTTP; the
/// gateway only requires the result. This call is the one suspension point
/// on the authentication path - cache operations never block on I/O.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validates a token and returns the identity it belongs to.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the token is missing, malformed,
    /// expired, or rejected by the authentication service.
    async fn validate(&self, token: &str) -> Result<Identity, ValidationError>;
}
