// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued synchronization actions.
//!
//! Every mutation that needs remote durability is recorded as a
//! [`SyncAction`] and held in the persistent queue until delivered to the
//! ledger or dropped after exhausted retries. Actions are designed to be:
//!
//! - Serializable: stored as one JSON snapshot in the local store
//! - Idempotent downstream: the ledger deduplicates by client action id
//! - Self-describing: retry bookkeeping lives on the action itself

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// The closed taxonomy of actions the sync engine delivers.
///
/// One payload shape per variant, so adding a kind is a compiler-checked
/// exercise rather than a string-matching one. The engine never interprets
/// payloads; it only forwards them to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// A new spot was submitted to the directory.
    SpotCreated {
        spot_id: String,
        name: String,
        lat: f64,
        lng: f64,
    },

    /// A pending spot received a moderation verdict.
    SpotModerated { spot_id: String, verdict: Verdict },

    /// A vote was cast on a challenge submission.
    VoteCast { submission_id: String },

    /// A badge was granted to the current user.
    BadgeGranted { badge_id: String },
}

/// Moderation verdict for a submitted spot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl ActionKind {
    /// Returns the wire name of this action kind (the serde tag).
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::SpotCreated { .. } => "spot_created",
            ActionKind::SpotModerated { .. } => "spot_moderated",
            ActionKind::VoteCast { .. } => "vote_cast",
            ActionKind::BadgeGranted { .. } => "badge_granted",
        }
    }

    /// Returns the variant fields as an opaque JSON payload, without the tag.
    ///
    /// This is what gets appended to the ledger next to [`Self::name`].
    pub fn payload(&self) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(ref mut map) = value {
            map.remove("type");
        }
        Ok(value)
    }
}

/// A pending synchronization action.
///
/// `retry_count` is monotonically non-decreasing and is the sole driver of
/// backoff and eventual drop. An action leaves the queue only through
/// successful delivery or [`FailureOutcome::Drop`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncAction {
    /// Opaque client-generated identifier, unique per enqueue call.
    pub id: String,
    /// What to deliver.
    pub kind: ActionKind,
    /// Epoch milliseconds at creation.
    pub enqueued_at_ms: u64,
    /// Failed delivery attempts so far.
    pub retry_count: u32,
    /// Set only after a failed attempt; absent for a never-attempted action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt_at_ms: Option<u64>,
}

/// What happens to an action after a failed delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureOutcome {
    /// Still within the retry budget: keep it in the queue.
    Requeue(SyncAction),
    /// Retry budget exhausted: remove it permanently.
    Drop(SyncAction),
}

impl SyncAction {
    /// Creates a fresh action: zero retries, never attempted.
    pub fn new(id: String, kind: ActionKind, enqueued_at_ms: u64) -> Self {
        SyncAction {
            id,
            kind,
            enqueued_at_ms,
            retry_count: 0,
            last_attempt_at_ms: None,
        }
    }

    /// Returns the backoff window after the last failed attempt, or `None`
    /// for an action that has never been attempted.
    ///
    /// The window doubles with each retry: `base * 2^(retry_count - 1)`.
    pub fn backoff_ms(&self, base_backoff_ms: u64) -> Option<u64> {
        if self.retry_count == 0 {
            return None;
        }
        let exp = (self.retry_count - 1).min(63);
        Some(base_backoff_ms.saturating_mul(1u64 << exp))
    }

    /// Returns true if this action may be attempted at `now_ms`.
    ///
    /// An action inside its backoff window is skipped in place, not
    /// re-ordered, so a later-enqueued eligible action may deliver first.
    pub fn is_eligible(&self, now_ms: u64, base_backoff_ms: u64) -> bool {
        match (self.backoff_ms(base_backoff_ms), self.last_attempt_at_ms) {
            (Some(wait), Some(last)) => now_ms.saturating_sub(last) >= wait,
            _ => true,
        }
    }

    /// Records a failed delivery attempt.
    ///
    /// Increments the retry counter and stamps the attempt time. Returns
    /// [`FailureOutcome::Requeue`] while `retry_count <= max_retries`,
    /// otherwise [`FailureOutcome::Drop`] — the action is gone for good.
    pub fn after_failure(mut self, now_ms: u64, max_retries: u32) -> FailureOutcome {
        self.retry_count += 1;
        self.last_attempt_at_ms = Some(now_ms);
        if self.retry_count <= max_retries {
            FailureOutcome::Requeue(self)
        } else {
            FailureOutcome::Drop(self)
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
