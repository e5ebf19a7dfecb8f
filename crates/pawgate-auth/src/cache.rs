//! Credential caching for token validation.
//!
//! This module provides a trait-based cache mapping opaque bearer tokens to
//! previously validated identities, avoiding a round trip to the
//! authentication service on every request.
//!
//! ## Semantics
//!
//! Entries live under an idle timeout, not an absolute expiry: every
//! successful lookup refreshes the entry's last-access timestamp, so a token
//! in active use stays cached indefinitely while an idle one ages out. The
//! lookup path checks expiry itself - a request is never served from an
//! entry that has sat idle longer than the TTL, whether or not a sweep has
//! run.
//!
//! Invalid tokens are never cached (no negative caching): a request with a
//! bad token re-validates every time. This trades a little hot-path work for
//! never having to invalidate a cached rejection.
//!
//! ## Invalidation
//!
//! Role changes do not propagate into live entries. A cached identity is
//! served as stored until the entry idles out, `invalidate(token)` removes
//! it (logout, revocation), or `clear()` wipes the cache (administrative
//! invalidation, test isolation).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::identity::Identity;

/// Trait for credential caching.
///
/// Abstracts the cache implementation so caching can be disabled
/// ([`NoOpCredentialCache`]) or replaced with a shared backend without
/// changing consumer code. Identities are stored behind `Arc` so hits clone
/// a pointer.
#[async_trait]
pub trait CredentialCache: Send + Sync {
    /// Looks up the identity for a token.
    ///
    /// A hit refreshes the entry's last-access timestamp. Returns `None`
    /// when no entry exists or the entry has been idle longer than the TTL
    /// (the expired entry is removed on the spot).
    async fn lookup(&self, token: &str) -> Option<Arc<Identity>>;

    /// Inserts or replaces the entry for a token.
    ///
    /// Idempotent: storing the same token twice replaces the entry, it
    /// never duplicates. Returns the stored `Arc<Identity>` for the caller.
    async fn store(&self, token: String, identity: Identity) -> Arc<Identity>;

    /// Removes one entry (logout, revocation propagation).
    async fn invalidate(&self, token: &str);

    /// Removes all entries unconditionally.
    async fn clear(&self);

    /// Cache statistics for monitoring.
    fn stats(&self) -> CacheStats;

    /// Removes every entry that has been idle longer than the TTL and
    /// returns the count.
    ///
    /// Invoked opportunistically or by the background sweeper; correctness
    /// never depends on it because `lookup` re-checks expiry. Default is a
    /// no-op for backends with native expiry.
    fn evict_expired(&self) -> usize {
        0
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of entries currently in the cache.
    pub size: usize,
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries evicted as idle-expired.
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate as a percentage.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// A cached credential with its last-access timestamp.
struct CachedCredential {
    identity: Arc<Identity>,
    last_accessed: Instant,
}

/// In-memory credential cache backed by a sharded concurrent map.
///
/// Safe under concurrent, unsynchronized access from any number of request
/// handlers: entries are replaced whole (never torn), and a `store` racing
/// an eviction sweep lands either before the sweep (fresh timestamp, kept)
/// or after it (inserted after the shard is released).
///
/// Constructed explicitly with its TTL and injected where needed; there is
/// no process-wide singleton, so tests build independent instances.
pub struct LocalCredentialCache {
    entries: DashMap<String, CachedCredential>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl LocalCredentialCache {
    /// Creates a cache with the given idle TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// The configured idle TTL.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn expired(&self, entry: &CachedCredential, now: Instant) -> bool {
        now.duration_since(entry.last_accessed) > self.ttl
    }

    /// Removes idle-expired entries and returns the count.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            if now.duration_since(entry.last_accessed) > self.ttl {
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            self.evictions.fetch_add(removed as u64, Ordering::Relaxed);
            tracing::debug!(removed, "Evicted idle credential cache entries");
        }

        removed
    }
}

#[async_trait]
impl CredentialCache for LocalCredentialCache {
    async fn lookup(&self, token: &str) -> Option<Arc<Identity>> {
        let now = Instant::now();

        if let Some(mut entry) = self.entries.get_mut(token) {
            if !self.expired(&entry, now) {
                entry.last_accessed = now;
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(Arc::clone(&entry.identity));
            }
            // Idle past the TTL: drop the guard before removing, then treat
            // as a miss.
            drop(entry);
            self.entries.remove(token);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    async fn store(&self, token: String, identity: Identity) -> Arc<Identity> {
        let identity = Arc::new(identity);
        let entry = CachedCredential {
            identity: Arc::clone(&identity),
            last_accessed: Instant::now(),
        };
        self.entries.insert(token, entry);
        identity
    }

    async fn invalidate(&self, token: &str) {
        self.entries.remove(token);
    }

    async fn clear(&self) {
        self.entries.clear();
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    fn evict_expired(&self) -> usize {
        LocalCredentialCache::evict_expired(self)
    }
}

/// A cache that never holds anything, for when caching is disabled.
///
/// Every lookup misses, so every request re-validates its token.
pub struct NoOpCredentialCache;

#[async_trait]
impl CredentialCache for NoOpCredentialCache {
    async fn lookup(&self, _token: &str) -> Option<Arc<Identity>> {
        None
    }

    async fn store(&self, _token: String, identity: Identity) -> Arc<Identity> {
        Arc::new(identity)
    }

    async fn invalidate(&self, _token: &str) {}

    async fn clear(&self) {}

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

/// Starts a periodic eviction sweep on the given cache.
///
/// The returned handle can be aborted at shutdown; the cache holds no
/// resources that need explicit release beyond dropping it.
pub fn spawn_sweeper(
    cache: Arc<dyn CredentialCache>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;

            let removed = cache.evict_expired();
            if removed > 0 {
                tracing::debug!(removed, "Credential cache sweep completed");
            }
        }
    })
}
