// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engine: best-effort, at-least-once delivery of queued actions.
//!
//! One pass walks the queue in stored order, attempts delivery for every
//! action outside its backoff window, and commits the result through a
//! reconciling snapshot write that keeps anything enqueued while the pass
//! was in flight. Passes are single-flight: concurrent triggers collapse
//! into a no-op instead of queueing up additional passes.
//!
//! [`SyncEngine::sync_once`] is a pure pass — it never sleeps, so tests
//! drive it against a manual clock. [`SyncEngine::trigger`] is the
//! production driver that keeps following up on a timer until the queue
//! drains.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use wm_core::{ClockSource, FailureOutcome, LedgerRecord, SyncAction};

use crate::queue::{ActionQueue, QueueError};
use crate::remote::{ConnectivityMonitor, Ledger, SessionProvider};
use crate::store::Store;

/// Error type for sync passes.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Queue error.
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    /// Record construction error.
    #[error("record error: {0}")]
    Record(#[from] wm_core::Error),
}

/// Result type for sync passes.
pub type SyncResult<T> = Result<T, SyncError>;

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base retry delay; the backoff window for retry `n` is
    /// `base * 2^(n-1)`. Also the follow-up pass delay.
    pub base_backoff_ms: u64,
    /// Failed attempts tolerated before an action is dropped.
    pub max_retries: u32,
    /// Originating-agent string sent in record metadata.
    pub agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_backoff_ms: 2_000,
            max_retries: 3,
            agent: concat!("waymark-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Why a pass made no delivery attempt at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another pass is already in flight.
    AlreadyRunning,
    /// Connectivity is currently reported unavailable.
    Offline,
    /// No authenticated principal; the queue was left untouched.
    NoSession,
}

/// Edge-triggered platform signals the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncSignal {
    /// Connectivity became available.
    ConnectivityRestored,
    /// The application came to the foreground.
    Foregrounded,
}

/// What one sync pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Set when the pass was a no-op.
    pub skipped: Option<SkipReason>,
    /// Actions delivered and removed from the queue.
    pub delivered: usize,
    /// Actions that failed and stay queued for retry.
    pub retried: usize,
    /// Actions dropped permanently after exhausting retries.
    pub dropped: usize,
    /// Actions still inside their backoff window, left untouched.
    pub deferred: usize,
    /// Queue length after the pass.
    pub remaining: usize,
    /// Delay before the self-scheduled follow-up pass, when one is due.
    pub follow_up_after_ms: Option<u64>,
}

impl PassSummary {
    fn skipped(reason: SkipReason) -> Self {
        PassSummary {
            skipped: Some(reason),
            ..PassSummary::default()
        }
    }
}

/// Clears the in-flight flag on every exit path, including unwinds, so a
/// failed pass can never deadlock all future passes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The delivery scheduler/driver.
pub struct SyncEngine<S: Store, L: Ledger> {
    queue: ActionQueue<S>,
    ledger: Arc<L>,
    session: Arc<dyn SessionProvider>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    clock: Arc<dyn ClockSource>,
    config: EngineConfig,
    in_flight: AtomicBool,
}

impl<S: Store, L: Ledger> SyncEngine<S, L> {
    pub fn new(
        queue: ActionQueue<S>,
        ledger: Arc<L>,
        session: Arc<dyn SessionProvider>,
        connectivity: Arc<dyn ConnectivityMonitor>,
        clock: Arc<dyn ClockSource>,
        config: EngineConfig,
    ) -> Self {
        SyncEngine {
            queue,
            ledger,
            session,
            connectivity,
            clock,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The action queue this engine drains. The event bridge enqueues
    /// through this same instance.
    pub fn queue(&self) -> &ActionQueue<S> {
        &self.queue
    }

    /// Whether a pass is currently in flight.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Runs at most one delivery pass now.
    ///
    /// A no-op (already running, offline, signed out, empty queue) is a
    /// successful pass with the reason recorded in the summary — never an
    /// error. Store and serialization failures surface as [`SyncError`];
    /// the queue snapshot is then unchanged and the next trigger retries.
    pub async fn sync_once(&self) -> SyncResult<PassSummary> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(PassSummary::skipped(SkipReason::AlreadyRunning));
        }
        let _guard = InFlightGuard(&self.in_flight);

        if !self.connectivity.is_online() {
            tracing::debug!("offline, skipping sync pass");
            return Ok(PassSummary::skipped(SkipReason::Offline));
        }

        self.run_pass().await
    }

    async fn run_pass(&self) -> SyncResult<PassSummary> {
        let actions = self.queue.load()?;
        if actions.is_empty() {
            return Ok(PassSummary::default());
        }

        let Some(principal) = self.session.current_principal().await else {
            // Transient: leave the queue untouched and wait for a trigger.
            tracing::debug!("no authenticated principal, deferring sync pass");
            return Ok(PassSummary::skipped(SkipReason::NoSession));
        };

        // The ids this pass is accountable for. Anything enqueued after
        // this point is preserved verbatim by the reconciling commit.
        let walked: HashSet<String> = actions.iter().map(|a| a.id.clone()).collect();

        let mut summary = PassSummary::default();
        let mut remaining: Vec<SyncAction> = Vec::with_capacity(actions.len());

        for action in actions {
            let now = self.clock.now_ms();

            if !action.is_eligible(now, self.config.base_backoff_ms) {
                // Still backing off: skipped in place, not blocking.
                summary.deferred += 1;
                remaining.push(action);
                continue;
            }

            let record = LedgerRecord::for_action(&action, &principal, &self.config.agent)?;
            match self.ledger.append(record).await {
                Ok(()) => {
                    summary.delivered += 1;
                }
                Err(e) => {
                    tracing::debug!(action_id = %action.id, error = %e, "delivery failed");
                    match action.after_failure(now, self.config.max_retries) {
                        FailureOutcome::Requeue(action) => {
                            summary.retried += 1;
                            remaining.push(action);
                        }
                        FailureOutcome::Drop(action) => {
                            summary.dropped += 1;
                            tracing::warn!(
                                action_id = %action.id,
                                kind = action.kind.name(),
                                retries = action.retry_count,
                                "dropping action after exhausted retries"
                            );
                        }
                    }
                }
            }
        }

        summary.remaining = self.queue.reconcile(&walked, &remaining)?;

        if summary.remaining > 0 {
            summary.follow_up_after_ms = Some(self.config.base_backoff_ms);
        }
        if summary.delivered > 0 || summary.dropped > 0 {
            tracing::info!(
                delivered = summary.delivered,
                retried = summary.retried,
                dropped = summary.dropped,
                remaining = summary.remaining,
                "sync pass complete"
            );
        }

        Ok(summary)
    }
}

impl<S, L> SyncEngine<S, L>
where
    S: Store + 'static,
    L: Ledger + 'static,
{
    /// Reacts to a platform signal by triggering a delivery run.
    pub fn handle_signal(self: &Arc<Self>, signal: SyncSignal) {
        tracing::debug!(?signal, "sync trigger");
        self.trigger();
    }

    /// Spawns a delivery run: one pass now, then follow-up passes after
    /// the base delay until the queue drains or a pass is skipped.
    ///
    /// Fire-and-forget by design — correctness never depends on a trigger
    /// happening or succeeding, only liveness. Concurrent runs collapse
    /// through the single-flight guard. Must be called within a tokio
    /// runtime.
    pub fn trigger(self: &Arc<Self>) {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match engine.sync_once().await {
                    Ok(summary) => match summary.follow_up_after_ms {
                        Some(delay) => tokio::time::sleep(Duration::from_millis(delay)).await,
                        None => break,
                    },
                    Err(e) => {
                        tracing::warn!(error = %e, "sync pass failed");
                        break;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
