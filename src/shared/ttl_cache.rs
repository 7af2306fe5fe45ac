//! In-memory cache with per-entry TTL. Used for data-source fetch results.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

/// `now + ttl_secs`, saturating at the latest representable time.
fn expiry_after(ttl_secs: i64) -> DateTime<Utc> {
    Duration::try_seconds(ttl_secs)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Cache entry with TTL
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    fn new(data: V, ttl_secs: i64) -> Self {
        Self {
            data,
            expires_at: expiry_after(ttl_secs),
        }
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Expiring key/value cache. Lock poisoning degrades to a cache miss.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a cached value if not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let cache = self.entries.read().ok()?;
        cache
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.data.clone())
    }

    /// Cache `value` for `ttl_secs` seconds, replacing any previous entry.
    pub fn insert(&self, key: K, value: V, ttl_secs: i64) {
        if let Ok(mut cache) = self.entries.write() {
            cache.insert(key, CacheEntry::new(value, ttl_secs));
        }
    }

    /// Clear all expired entries
    pub fn clear_expired(&self) {
        if let Ok(mut cache) = self.entries.write() {
            cache.retain(|_, entry| !entry.is_expired());
        }
    }

    /// Number of live (unexpired) entries.
    pub fn live_len(&self) -> usize {
        self.entries
            .read()
            .map(|c| c.values().filter(|e| !e.is_expired()).count())
            .unwrap_or(0)
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
