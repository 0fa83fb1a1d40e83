// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache-first read path with graceful degradation.
//!
//! Every feature's collection load goes through the same pattern: fresh
//! cache, then network (populating the cache), then stale cache, then an
//! empty default. The function never returns an error — degradation is
//! expressed in the structured result so callers (and tests) can observe
//! it without scraping logs.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::Cache;
use crate::store::Store;

/// Where the returned data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Served from the local cache (fresh or stale).
    Cache,
    /// Fetched from the remote just now.
    Network,
}

/// The outcome of a cache-first read.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRead<T> {
    pub data: T,
    pub source: DataSource,
    /// True when the remote failed and the data is stale or an empty default.
    pub degraded: bool,
}

/// Opaque failure from a feature's remote fetcher.
#[derive(Debug, thiserror::Error)]
#[error("remote fetch failed: {0}")]
pub struct FetchError(pub String);

/// Loads a feature collection cache-first.
///
/// 1. Fresh cache hit (within `ttl_ms`) → returned immediately, no fetch.
/// 2. Otherwise fetch; on success the cache is refreshed.
/// 3. On fetch failure, arbitrarily stale data is accepted.
/// 4. With nothing cached, an empty collection is returned.
///
/// Steps 3 and 4 are flagged `degraded`; no path raises an error.
pub async fn fetch_collection<S, T, F, Fut>(
    cache: &Cache<S>,
    key: &str,
    ttl_ms: u64,
    fetch: F,
) -> CachedRead<Vec<T>>
where
    S: Store,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, FetchError>>,
{
    if let Ok(Some(data)) = cache.get::<Vec<T>>(key, Some(ttl_ms)) {
        return CachedRead {
            data,
            source: DataSource::Cache,
            degraded: false,
        };
    }

    match fetch().await {
        Ok(fresh) => {
            if let Err(e) = cache.set(key, &fresh) {
                tracing::debug!(key, error = %e, "failed to refresh cache");
            }
            CachedRead {
                data: fresh,
                source: DataSource::Network,
                degraded: false,
            }
        }
        Err(e) => {
            tracing::debug!(key, error = %e, "remote fetch failed, falling back to cache");
            match cache.get::<Vec<T>>(key, None) {
                Ok(Some(stale)) => CachedRead {
                    data: stale,
                    source: DataSource::Cache,
                    degraded: true,
                },
                _ => CachedRead {
                    data: Vec::new(),
                    source: DataSource::Cache,
                    degraded: true,
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "readthrough_tests.rs"]
mod tests;
