// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable action queue.
//!
//! The queue is an ordered list of pending [`SyncAction`]s persisted as a
//! single JSON snapshot under one store key. There is no single-action
//! removal: removal is always expressed as persisting a snapshot that
//! omits the action, which is how the engine implements both delivery and
//! drop-after-max-retries.
//!
//! Every snapshot rewrite runs its read-modify-write under one queue-level
//! lock, and the engine commits a pass through [`ActionQueue::reconcile`],
//! so an enqueue landing while a pass is parked in a ledger append is
//! never overwritten.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use wm_core::{ActionKind, ClockSource, SyncAction};

use crate::id::generate_action_id;
use crate::store::{Store, StoreError};

/// Default store key for the queue snapshot.
pub const QUEUE_KEY: &str = "sync:action-queue";

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous panic left the queue lock poisoned.
    #[error("queue lock poisoned")]
    Poisoned,
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Ordered, durable queue of pending sync actions.
pub struct ActionQueue<S: Store> {
    store: Arc<S>,
    clock: Arc<dyn ClockSource>,
    key: String,
    lock: Mutex<()>,
}

impl<S: Store> ActionQueue<S> {
    /// Creates a queue over the default snapshot key.
    pub fn new(store: Arc<S>, clock: Arc<dyn ClockSource>) -> Self {
        Self::with_key(store, clock, QUEUE_KEY)
    }

    /// Creates a queue over a custom snapshot key.
    pub fn with_key(store: Arc<S>, clock: Arc<dyn ClockSource>, key: impl Into<String>) -> Self {
        ActionQueue {
            store,
            clock,
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> QueueResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| QueueError::Poisoned)
    }

    /// Constructs a fresh action for `kind`, appends it, and persists the
    /// full list. Returns the constructed action.
    pub fn enqueue(&self, kind: ActionKind) -> QueueResult<SyncAction> {
        let _guard = self.guard()?;
        let now = self.clock.now_ms();
        let action = SyncAction::new(generate_action_id(kind.name(), now), kind, now);

        let mut actions = self.load_snapshot()?;
        actions.push(action.clone());
        self.save_snapshot(&actions)?;

        Ok(action)
    }

    /// Reads and deserializes the persisted snapshot, defaulting to empty
    /// when absent. A corrupt snapshot is an error, not an empty queue, so
    /// pending actions are never silently discarded.
    pub fn load(&self) -> QueueResult<Vec<SyncAction>> {
        self.load_snapshot()
    }

    /// Serializes and persists `actions`, replacing any prior snapshot.
    pub fn save(&self, actions: &[SyncAction]) -> QueueResult<()> {
        let _guard = self.guard()?;
        self.save_snapshot(actions)
    }

    /// Commits a delivery pass: replaces the actions the pass walked with
    /// `kept` (their updated bookkeeping) while preserving, after them,
    /// anything enqueued since `walked` was loaded. An action walked but
    /// absent from `kept` was delivered or dropped and leaves the queue.
    ///
    /// Returns the resulting queue length. The reload-merge-write runs
    /// under the queue lock, so a concurrent enqueue lands either in the
    /// reloaded snapshot or after the commit, never in between.
    pub fn reconcile(
        &self,
        walked: &HashSet<String>,
        kept: &[SyncAction],
    ) -> QueueResult<usize> {
        let _guard = self.guard()?;
        let mut merged = kept.to_vec();
        let current = self.load_snapshot()?;
        merged.extend(current.into_iter().filter(|a| !walked.contains(&a.id)));
        self.save_snapshot(&merged)?;
        Ok(merged.len())
    }

    fn load_snapshot(&self) -> QueueResult<Vec<SyncAction>> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_snapshot(&self, actions: &[SyncAction]) -> QueueResult<()> {
        self.store.set(&self.key, &serde_json::to_string(actions)?)?;
        Ok(())
    }

    /// Deletes the persisted snapshot entirely.
    ///
    /// Administrative escape hatch (user-triggered reset); not used by the
    /// ordinary delivery path.
    pub fn clear(&self) -> QueueResult<()> {
        let _guard = self.guard()?;
        self.store.remove(&self.key)?;
        Ok(())
    }

    /// Number of pending actions.
    pub fn len(&self) -> QueueResult<usize> {
        Ok(self.load()?.len())
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
