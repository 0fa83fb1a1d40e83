// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side action ID generation.

use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};

/// Process-local sequence so two enqueues in the same millisecond still
/// get distinct IDs.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate an action ID from the kind name and enqueue time.
/// Format: `act-{hash}` where hash is the first 12 hex chars of
/// SHA256(kind:now_ms:sequence).
pub fn generate_action_id(kind: &str, now_ms: u64) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let input = format!("{kind}:{now_ms}:{seq}");
    let hash = Sha256::digest(input.as_bytes());
    format!("act-{}", hex::encode(&hash[..6]))
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
