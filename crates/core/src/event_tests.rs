// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for domain event translation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

#[test]
fn spot_submitted_becomes_spot_created() {
    let event = DomainEvent::SpotSubmitted {
        spot_id: "spot-7".to_string(),
        name: "Ledge set".to_string(),
        lat: 40.7,
        lng: -74.0,
    };

    let kind = ActionKind::from(event);
    assert_eq!(kind.name(), "spot_created");
    let payload = kind.payload().unwrap();
    assert_eq!(payload["spot_id"], "spot-7");
    assert_eq!(payload["name"], "Ledge set");
}

#[test]
fn moderation_verdict_carries_through() {
    let event = DomainEvent::SpotModerated {
        spot_id: "spot-7".to_string(),
        verdict: Verdict::Rejected,
    };

    match ActionKind::from(event) {
        ActionKind::SpotModerated { spot_id, verdict } => {
            assert_eq!(spot_id, "spot-7");
            assert_eq!(verdict, Verdict::Rejected);
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn vote_and_badge_translate() {
    let vote = ActionKind::from(DomainEvent::VoteCast {
        submission_id: "sub-42".to_string(),
    });
    assert_eq!(vote.name(), "vote_cast");

    let badge = ActionKind::from(DomainEvent::BadgeEarned {
        badge_id: "night-owl".to_string(),
    });
    assert_eq!(badge.name(), "badge_granted");
}
