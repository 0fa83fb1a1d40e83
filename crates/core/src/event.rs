// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Feature-level domain events.
//!
//! Feature services raise these when a mutation needs remote durability.
//! The event bridge translates each event into a queued [`ActionKind`];
//! the translation is a total match, so a new event kind cannot be added
//! without deciding how it syncs.

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, Verdict};

/// Domain events the sync bridge subscribes to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A user submitted a new spot.
    SpotSubmitted {
        spot_id: String,
        name: String,
        lat: f64,
        lng: f64,
    },

    /// A moderator ruled on a pending spot.
    SpotModerated { spot_id: String, verdict: Verdict },

    /// A user voted on a challenge submission.
    VoteCast { submission_id: String },

    /// A user earned a badge.
    BadgeEarned { badge_id: String },
}

impl From<DomainEvent> for ActionKind {
    fn from(event: DomainEvent) -> Self {
        match event {
            DomainEvent::SpotSubmitted {
                spot_id,
                name,
                lat,
                lng,
            } => ActionKind::SpotCreated {
                spot_id,
                name,
                lat,
                lng,
            },
            DomainEvent::SpotModerated { spot_id, verdict } => {
                ActionKind::SpotModerated { spot_id, verdict }
            }
            DomainEvent::VoteCast { submission_id } => ActionKind::VoteCast { submission_id },
            DomainEvent::BadgeEarned { badge_id } => ActionKind::BadgeGranted { badge_id },
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
