// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Domain event bridge.
//!
//! Guarantees that every mutation requiring remote durability is recorded
//! as a queued action regardless of current connectivity. Immediate online
//! delivery is only a latency shortcut, never a bypass: the queue is the
//! single path to durability, so a feature service whose direct write
//! failed falls back to the exact same `publish` call, and there is one
//! failure-recovery code path, not two.

use std::sync::Arc;

use wm_core::{ActionKind, DomainEvent, SyncAction};

use crate::engine::SyncEngine;
use crate::queue::QueueResult;
use crate::remote::{ConnectivityMonitor, Ledger};
use crate::store::Store;

/// Subscribes to feature-level domain events and turns them into queued
/// actions.
pub struct EventBridge<S: Store, L: Ledger> {
    engine: Arc<SyncEngine<S, L>>,
    connectivity: Arc<dyn ConnectivityMonitor>,
}

impl<S, L> EventBridge<S, L>
where
    S: Store + 'static,
    L: Ledger + 'static,
{
    pub fn new(engine: Arc<SyncEngine<S, L>>, connectivity: Arc<dyn ConnectivityMonitor>) -> Self {
        EventBridge {
            engine,
            connectivity,
        }
    }

    /// Translates `event` into an action and enqueues it unconditionally.
    ///
    /// When connectivity is reported available and an ambient tokio
    /// runtime exists, the engine is nudged for an immediate delivery
    /// attempt; that nudge is an optimization only and its outcome is
    /// ignored. Outside a runtime the action still lands in the queue and
    /// waits for the next trigger.
    pub fn publish(&self, event: DomainEvent) -> QueueResult<SyncAction> {
        let action = self.engine.queue().enqueue(ActionKind::from(event))?;
        tracing::debug!(action_id = %action.id, kind = action.kind.name(), "queued action");

        if self.connectivity.is_online() {
            if tokio::runtime::Handle::try_current().is_ok() {
                self.engine.trigger();
            } else {
                tracing::debug!("no async runtime, skipping delivery nudge");
            }
        }

        Ok(action)
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
