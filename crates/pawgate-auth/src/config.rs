//! Gateway authentication configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! token_cache_ttl = "5m"
//! sweep_interval = "1m"
//! generic_error_message = "unexpected error"
//! cache_enabled = true
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use pawgate_core::classify::DEFAULT_GENERIC_MESSAGE;

/// Configuration for the credential cache and outcome classification.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayAuthConfig {
    /// Idle window after which a cached credential may be evicted.
    ///
    /// This is an idle timeout, not an absolute expiry: every cache hit
    /// extends the entry's life.
    #[serde(with = "humantime_serde")]
    pub token_cache_ttl: Duration,

    /// How often the background sweeper evicts idle entries, when one is
    /// running.
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,

    /// Message reported to callers for unclassified failures. Internal
    /// detail is logged, never echoed.
    pub generic_error_message: String,

    /// Enable/disable credential caching. When disabled every request
    /// re-validates its token.
    pub cache_enabled: bool,
}

impl Default for GatewayAuthConfig {
    fn default() -> Self {
        Self {
            token_cache_ttl: Duration::from_secs(300), // 5 minutes
            sweep_interval: Duration::from_secs(60),
            generic_error_message: DEFAULT_GENERIC_MESSAGE.to_string(),
            cache_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayAuthConfig::default();
        assert_eq!(config.token_cache_ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.generic_error_message, "unexpected error");
        assert!(config.cache_enabled);
    }

    #[test]
    fn test_deserialize_humantime_durations() {
        let config: GatewayAuthConfig = serde_json::from_str(
            r#"{
                "token_cache_ttl": "2m 30s",
                "sweep_interval": "15s",
                "generic_error_message": "something went wrong",
                "cache_enabled": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.token_cache_ttl, Duration::from_secs(150));
        assert_eq!(config.sweep_interval, Duration::from_secs(15));
        assert_eq!(config.generic_error_message, "something went wrong");
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GatewayAuthConfig =
            serde_json::from_str(r#"{"token_cache_ttl": "30s"}"#).unwrap();

        assert_eq!(config.token_cache_ttl, Duration::from_secs(30));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert!(config.cache_enabled);
    }
}
