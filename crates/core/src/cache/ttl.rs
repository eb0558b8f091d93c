//! Generic key/value cache with per-entry time-to-live.

use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::clock::{Clock, SystemClock};

/// A cached value together with its expiry bookkeeping.
///
/// Owned exclusively by the cache; never handed out. An entry is
/// logically absent once `now - stored_at >= ttl`, even while still
/// physically present.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        // The boundary instant itself already counts as expired.
        now.saturating_duration_since(self.stored_at) >= self.ttl
    }
}

/// In-memory cache with per-entry TTL and lazy eviction.
///
/// Expiry is checked only on access; expired entries are removed the
/// first time they are touched. The cache is internally synchronized
/// so it can be shared across tasks, but call sites are expected to
/// follow a single-writer-per-key discipline within one process.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a cache with the given default TTL and the system clock.
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates a cache with an injected clock.
    #[must_use]
    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            clock,
        }
    }

    /// Stores a value under `key` with the default TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Stores a value under `key` with an explicit TTL.
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
            ttl,
        };
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.into(), entry);
    }

    /// Returns the live value for `key`, if any.
    ///
    /// An expired entry is evicted on the spot and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Returns true if a live entry exists for `key`.
    ///
    /// Evicts lazily, like [`TtlCache::get`].
    pub fn contains(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Removes the entry for `key`, expired or not.
    pub fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.remove(key);
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.clear();
    }

    /// Removes every entry whose key matches `pattern`.
    pub fn clear_pattern(&self, pattern: &Regex) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.retain(|key, _| !pattern.is_match(key));
    }

    /// Number of physically present entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    /// Returns true if no entries are physically present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
