//! Orchestration glue for authenticated downstream calls.
//!
//! [`AuthGateway::handle`] is what a route handler calls for one downstream
//! operation: check the credential cache, validate the token on a miss,
//! invoke the downstream call with the identity, and classify any failure
//! into a normalized outcome. Success payloads pass through untouched - the
//! gateway never inspects them.
//!
//! The sequence is linear with no retries: a failure at any step terminates
//! the request with its classified outcome, and a validator failure
//! short-circuits before the downstream call is attempted.

use std::future::Future;
use std::sync::Arc;

use pawgate_core::{OutcomeClassifier, ServiceFailure};

use crate::GatewayResult;
use crate::cache::{CredentialCache, LocalCredentialCache, NoOpCredentialCache};
use crate::config::GatewayAuthConfig;
use crate::identity::Identity;
use crate::validator::{TokenValidator, ValidationError};

/// Ties the credential cache, the validator, and the outcome classifier
/// together for route handlers.
pub struct AuthGateway {
    cache: Arc<dyn CredentialCache>,
    validator: Arc<dyn TokenValidator>,
    classifier: OutcomeClassifier,
}

impl AuthGateway {
    /// Creates a gateway from configuration, wiring a
    /// [`LocalCredentialCache`] (or the no-op cache when caching is
    /// disabled) and a classifier with the configured generic message.
    #[must_use]
    pub fn new(validator: Arc<dyn TokenValidator>, config: &GatewayAuthConfig) -> Self {
        let cache: Arc<dyn CredentialCache> = if config.cache_enabled {
            Arc::new(LocalCredentialCache::new(config.token_cache_ttl))
        } else {
            Arc::new(NoOpCredentialCache)
        };

        Self {
            cache,
            validator,
            classifier: OutcomeClassifier::new(&config.generic_error_message),
        }
    }

    /// Creates a gateway from explicitly constructed parts.
    #[must_use]
    pub fn with_parts(
        cache: Arc<dyn CredentialCache>,
        validator: Arc<dyn TokenValidator>,
        classifier: OutcomeClassifier,
    ) -> Self {
        Self {
            cache,
            validator,
            classifier,
        }
    }

    /// The credential cache, for sweeper wiring and stats endpoints.
    #[must_use]
    pub fn cache(&self) -> Arc<dyn CredentialCache> {
        Arc::clone(&self.cache)
    }

    /// Resolves a token to an identity: cache hit, or validate and store.
    ///
    /// A validation failure never populates the cache, so an invalid token
    /// re-validates on every request.
    ///
    /// # Errors
    ///
    /// Returns the validator's error when the token is empty or rejected.
    pub async fn authenticate(&self, token: &str) -> Result<Arc<Identity>, ValidationError> {
        if token.is_empty() {
            return Err(ValidationError::MissingToken);
        }

        if let Some(identity) = self.cache.lookup(token).await {
            tracing::debug!(user_id = %identity.user_id, "Credential cache hit");
            return Ok(identity);
        }

        let identity = self.validator.validate(token).await?;
        tracing::debug!(user_id = %identity.user_id, "Token validated");
        Ok(self.cache.store(token.to_string(), identity).await)
    }

    /// Runs one authenticated downstream call.
    ///
    /// 1. Resolve the token via [`authenticate`](Self::authenticate); a
    ///    validation failure returns a classified invalid-credentials
    ///    outcome and the downstream call is never invoked.
    /// 2. Invoke the downstream call with the identity.
    /// 3. Pass a success payload through unchanged; classify any failure.
    pub async fn handle<T, F, Fut>(&self, token: &str, downstream_call: F) -> GatewayResult<T>
    where
        F: FnOnce(Arc<Identity>) -> Fut,
        Fut: Future<Output = Result<T, ServiceFailure>>,
    {
        let identity = match self.authenticate(token).await {
            Ok(identity) => identity,
            Err(err) => {
                tracing::debug!(error = %err, "Rejecting request before downstream call");
                return Err(self
                    .classifier
                    .classify(&ServiceFailure::invalid_credentials(err.to_string())));
            }
        };

        match downstream_call(identity).await {
            Ok(result) => Ok(result),
            Err(failure) => Err(self.classifier.classify(&failure)),
        }
    }
}
