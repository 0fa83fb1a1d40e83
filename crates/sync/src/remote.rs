// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External collaborator traits.
//!
//! The sync engine's only contracts with the outside world:
//! `append(record) -> success|failure` against the remote ledger,
//! `current_principal() -> identity|absent` from the session provider,
//! and a boolean connectivity report. Trait-based so unit tests inject
//! mocks without touching the network.

use std::future::Future;
use std::pin::Pin;

use wm_core::{LedgerRecord, Principal};

/// Error type for ledger appends.
///
/// The engine treats every variant the same way — transient, retried with
/// backoff — but the distinction is kept for logging.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The ledger could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The ledger answered but refused the record.
    #[error("append rejected: {0}")]
    Rejected(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// The remote, authoritative event log.
///
/// Appends must be idempotent by `meta.clientActionId`: delivery is
/// at-least-once and a crashed pass replays its actions.
pub trait Ledger: Send + Sync {
    /// Append a record to the ledger.
    fn append(
        &self,
        record: LedgerRecord,
    ) -> Pin<Box<dyn Future<Output = LedgerResult<()>> + Send + '_>>;
}

/// Authentication/session collaborator.
pub trait SessionProvider: Send + Sync {
    /// Returns the current authenticated principal, or `None` when signed
    /// out or the session is still resolving.
    fn current_principal(&self) -> Pin<Box<dyn Future<Output = Option<Principal>> + Send + '_>>;
}

/// Platform connectivity report.
///
/// The engine never polls; it reads this at the start of a pass and
/// otherwise reacts to edge-triggered [`crate::engine::SyncSignal`]s.
pub trait ConnectivityMonitor: Send + Sync {
    /// Whether the platform currently reports connectivity.
    fn is_online(&self) -> bool;
}
