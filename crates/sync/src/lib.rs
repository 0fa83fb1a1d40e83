// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! wm-sync: offline-first event synchronization for waymark.
//!
//! The application keeps working across unreliable connectivity by never
//! writing mutations to the remote ledger directly: every mutation is
//! recorded as a queued action and replayed by the sync engine.
//!
//! # Architecture
//!
//! ```text
//! feature write ──► EventBridge ──► ActionQueue ──► SyncEngine ──► Ledger
//!                                       │                             (remote)
//!                                       ▼
//!                                     Store ◄── Cache ◄── read paths
//!                                  (SQLite kv)
//! ```
//!
//! # Properties
//!
//! - Durable action queue persisted as one JSON snapshot
//! - At-least-once delivery with exponential backoff and a fixed retry budget
//! - Single-flight sync passes; concurrent triggers collapse to no-ops
//! - Cache-first reads that degrade to stale data, then to empty, never to
//!   an error
//! - Injectable ledger/session/connectivity/clock traits for testing

pub mod bridge;
pub mod cache;
pub mod config;
pub mod engine;
pub mod id;
pub mod queue;
pub mod readthrough;
pub mod remote;
pub mod store;

pub use bridge::EventBridge;
pub use cache::{Cache, CacheEntry, CacheError, CacheResult};
pub use config::{ConfigError, SyncSettings};
pub use engine::{EngineConfig, PassSummary, SkipReason, SyncEngine, SyncError, SyncSignal};
pub use queue::{ActionQueue, QueueError, QueueResult, QUEUE_KEY};
pub use readthrough::{fetch_collection, CachedRead, DataSource, FetchError};
pub use remote::{ConnectivityMonitor, Ledger, LedgerError, LedgerResult, SessionProvider};
pub use store::{MemoryStore, SqliteStore, Store, StoreError, StoreResult};

#[cfg(test)]
mod test_helpers;
