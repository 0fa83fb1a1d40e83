// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! TTL-aware cache over the persistent store.
//!
//! The TTL is supplied by the reader, not stored with the entry: the same
//! entry can be read fresh (TTL enforced) or accepted stale (TTL ignored)
//! depending on the call. Entries are never proactively expired — expiry
//! is a read-time judgment, not a deletion.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wm_core::ClockSource;

use crate::store::{Store, StoreError};

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A cached value with the time it was stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry<T> {
    pub value: T,
    pub stored_at_ms: u64,
}

/// Read-through cache keyed by string.
pub struct Cache<S: Store> {
    store: Arc<S>,
    clock: Arc<dyn ClockSource>,
}

impl<S: Store> Cache<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn ClockSource>) -> Self {
        Cache { store, clock }
    }

    /// Returns the stored value if present and, when `ttl_ms` is given,
    /// no older than the TTL. An expired entry is NOT deleted — a later
    /// call without a TTL can still read it as a stale fallback.
    ///
    /// An unreadable entry (schema drift, partial write) reads as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str, ttl_ms: Option<u64>) -> CacheResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(key, error = %e, "ignoring unreadable cache entry");
                return Ok(None);
            }
        };

        if let Some(ttl) = ttl_ms {
            let age = self.clock.now_ms().saturating_sub(entry.stored_at_ms);
            if age > ttl {
                return Ok(None);
            }
        }

        Ok(Some(entry.value))
    }

    /// Stores `value` under `key`, overwriting unconditionally.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> CacheResult<()> {
        let entry = CacheEntry {
            value,
            stored_at_ms: self.clock.now_ms(),
        };
        self.store.set(key, &serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Deletes the entry. Used for manual invalidation.
    pub fn remove(&self, key: &str) -> CacheResult<()> {
        self.store.remove(key)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
