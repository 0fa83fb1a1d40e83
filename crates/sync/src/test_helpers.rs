// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: manual clock and mock collaborators.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use wm_core::{ActionKind, ClockSource, LedgerRecord, Principal};

use crate::engine::{EngineConfig, SyncEngine};
use crate::queue::ActionQueue;
use crate::remote::{ConnectivityMonitor, Ledger, LedgerError, LedgerResult, SessionProvider};
use crate::store::MemoryStore;

/// Manually advanced clock.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn at(now_ms: u64) -> Arc<Self> {
        let clock = ManualClock::default();
        clock.now_ms.store(now_ms, Ordering::SeqCst);
        Arc::new(clock)
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl ClockSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Ledger mock with scripted outcomes.
///
/// Outcomes are consumed front-to-back per append; when the script runs
/// out, appends succeed. Every attempted record is captured.
#[derive(Default)]
pub struct MockLedger {
    outcomes: Mutex<VecDeque<LedgerResult<()>>>,
    attempts: Mutex<Vec<LedgerRecord>>,
}

impl MockLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Scripts the next `n` appends to fail with a network error.
    pub fn fail_next(&self, n: usize) {
        let mut outcomes = self.outcomes.lock().unwrap();
        for _ in 0..n {
            outcomes.push_back(Err(LedgerError::Network("connection reset".to_string())));
        }
    }

    pub fn attempts(&self) -> Vec<LedgerRecord> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

impl Ledger for MockLedger {
    fn append(
        &self,
        record: LedgerRecord,
    ) -> Pin<Box<dyn Future<Output = LedgerResult<()>> + Send + '_>> {
        Box::pin(async move {
            self.attempts.lock().unwrap().push(record);
            self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()))
        })
    }
}

/// Ledger that parks inside `append` until released, for single-flight
/// tests. `entered` gains a permit when an append starts; the append
/// completes once `release` has a permit.
pub struct GatedLedger {
    pub entered: Arc<Semaphore>,
    pub release: Arc<Semaphore>,
}

impl GatedLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(GatedLedger {
            entered: Arc::new(Semaphore::new(0)),
            release: Arc::new(Semaphore::new(0)),
        })
    }
}

impl Ledger for GatedLedger {
    fn append(
        &self,
        _record: LedgerRecord,
    ) -> Pin<Box<dyn Future<Output = LedgerResult<()>> + Send + '_>> {
        Box::pin(async move {
            self.entered.add_permits(1);
            let permit = self.release.acquire().await.unwrap();
            permit.forget();
            Ok(())
        })
    }
}

/// Session provider with a fixed principal (or none).
pub struct StaticSession {
    principal: Option<Principal>,
}

impl StaticSession {
    pub fn signed_in() -> Arc<Self> {
        Arc::new(StaticSession {
            principal: Some(Principal::new("user-9", "kickflip_kate")),
        })
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(StaticSession { principal: None })
    }
}

impl SessionProvider for StaticSession {
    fn current_principal(&self) -> Pin<Box<dyn Future<Output = Option<Principal>> + Send + '_>> {
        let principal = self.principal.clone();
        Box::pin(async move { principal })
    }
}

/// Connectivity toggle.
#[derive(Debug)]
pub struct ToggleConnectivity {
    online: AtomicBool,
}

impl ToggleConnectivity {
    pub fn online() -> Arc<Self> {
        Arc::new(ToggleConnectivity {
            online: AtomicBool::new(true),
        })
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(ToggleConnectivity {
            online: AtomicBool::new(false),
        })
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl ConnectivityMonitor for ToggleConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// A vote action kind for tests.
pub fn vote_kind(submission_id: &str) -> ActionKind {
    ActionKind::VoteCast {
        submission_id: submission_id.to_string(),
    }
}

/// Engine over a fresh in-memory store with default config.
pub fn test_engine<L: Ledger>(
    ledger: Arc<L>,
    session: Arc<StaticSession>,
    connectivity: Arc<ToggleConnectivity>,
    clock: Arc<ManualClock>,
) -> Arc<SyncEngine<MemoryStore, L>> {
    let store = Arc::new(MemoryStore::new());
    let queue = ActionQueue::new(store, clock.clone());
    Arc::new(SyncEngine::new(
        queue,
        ledger,
        session,
        connectivity,
        clock,
        EngineConfig::default(),
    ))
}
