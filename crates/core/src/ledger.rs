// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire format for the remote event ledger.
//!
//! The ledger is the authoritative append-only log of domain mutations.
//! Its single operation is `append(record)`; projecting records into
//! domain state happens server-side and is out of scope here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::SyncAction;
use crate::error::{Error, Result};

/// The authenticated identity resolved from the session provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    /// Stable account identifier.
    pub id: String,
    /// Display handle, for diagnostics only.
    pub handle: String,
}

impl Principal {
    pub fn new(id: impl Into<String>, handle: impl Into<String>) -> Self {
        Principal {
            id: id.into(),
            handle: handle.into(),
        }
    }
}

/// A record appended to the remote ledger.
///
/// Serialized camelCase to match the ledger's contract:
/// `{ principalId, type, payload, occurredAt, meta }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub principal_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
    /// When the action was enqueued on the client, not when it was delivered.
    pub occurred_at: DateTime<Utc>,
    pub meta: RecordMeta,
}

/// Client metadata carried with every record.
///
/// `client_action_id` is the deduplication key: delivery is at-least-once,
/// and the ledger is expected to ignore a replayed id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub client_action_id: String,
    pub agent: String,
}

impl LedgerRecord {
    /// Builds the record for a queued action on behalf of `principal`.
    pub fn for_action(action: &SyncAction, principal: &Principal, agent: &str) -> Result<Self> {
        let occurred_at = i64::try_from(action.enqueued_at_ms)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or(Error::TimestampOutOfRange(action.enqueued_at_ms))?;

        Ok(LedgerRecord {
            principal_id: principal.id.clone(),
            kind: action.kind.name().to_string(),
            payload: action.kind.payload()?,
            occurred_at,
            meta: RecordMeta {
                client_action_id: action.id.clone(),
                agent: agent.to_string(),
            },
        })
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
