// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! wm-core: Shared library for the waymark sync subsystem
//!
//! This crate provides the domain types used by the offline-first sync
//! engine: queued actions and their closed taxonomy, feature-level domain
//! events, the ledger wire format, and the clock abstraction. It performs
//! no I/O of its own.

pub mod action;
pub mod clock;
pub mod error;
pub mod event;
pub mod ledger;

pub use action::{ActionKind, FailureOutcome, SyncAction, Verdict};
pub use clock::{ClockSource, SystemClock};
pub use error::{Error, Result};
pub use event::DomainEvent;
pub use ledger::{LedgerRecord, Principal, RecordMeta};
