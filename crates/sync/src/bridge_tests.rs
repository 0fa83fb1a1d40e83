// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the domain event bridge.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use wm_core::Verdict;

use super::*;
use crate::test_helpers::{test_engine, ManualClock, MockLedger, StaticSession, ToggleConnectivity};

#[tokio::test]
async fn offline_publish_enqueues_without_a_delivery_attempt() {
    let ledger = MockLedger::new();
    let connectivity = ToggleConnectivity::offline();
    let engine = test_engine(
        ledger.clone(),
        StaticSession::signed_in(),
        connectivity.clone(),
        ManualClock::at(10_000),
    );
    let bridge = EventBridge::new(engine.clone(), connectivity);

    let action = bridge
        .publish(DomainEvent::VoteCast {
            submission_id: "sub-42".to_string(),
        })
        .unwrap();

    assert_eq!(action.kind.name(), "vote_cast");
    assert_eq!(engine.queue().len().unwrap(), 1);
    assert_eq!(ledger.attempt_count(), 0);
}

#[tokio::test]
async fn online_publish_queues_first_then_delivers() {
    let ledger = MockLedger::new();
    let connectivity = ToggleConnectivity::online();
    let engine = test_engine(
        ledger.clone(),
        StaticSession::signed_in(),
        connectivity.clone(),
        ManualClock::at(10_000),
    );
    let bridge = EventBridge::new(engine.clone(), connectivity);

    bridge
        .publish(DomainEvent::BadgeEarned {
            badge_id: "first-find".to_string(),
        })
        .unwrap();

    // Delivery happens on a spawned task; give it a chance to run.
    for _ in 0..50 {
        if engine.queue().is_empty().unwrap() {
            break;
        }
        tokio::task::yield_now().await;
    }

    assert!(engine.queue().is_empty().unwrap());
    assert_eq!(ledger.attempt_count(), 1);
    assert_eq!(ledger.attempts()[0].kind, "badge_granted");
}

#[test]
fn online_publish_without_a_runtime_still_enqueues() {
    let ledger = MockLedger::new();
    let connectivity = ToggleConnectivity::online();
    let engine = test_engine(
        ledger.clone(),
        StaticSession::signed_in(),
        connectivity.clone(),
        ManualClock::at(10_000),
    );
    let bridge = EventBridge::new(engine.clone(), connectivity);

    // No tokio runtime here: the nudge is skipped, durability is not.
    let action = bridge
        .publish(DomainEvent::VoteCast {
            submission_id: "sub-42".to_string(),
        })
        .unwrap();

    assert_eq!(action.kind.name(), "vote_cast");
    assert_eq!(engine.queue().len().unwrap(), 1);
    assert_eq!(ledger.attempt_count(), 0);
}

#[tokio::test]
async fn every_event_maps_to_its_action_kind() {
    let events = [
        (
            DomainEvent::SpotSubmitted {
                spot_id: "spot-1".to_string(),
                name: "Ledge".to_string(),
                lat: 47.6,
                lng: -122.3,
            },
            "spot_created",
        ),
        (
            DomainEvent::SpotModerated {
                spot_id: "spot-1".to_string(),
                verdict: Verdict::Approved,
            },
            "spot_moderated",
        ),
        (
            DomainEvent::VoteCast {
                submission_id: "sub-1".to_string(),
            },
            "vote_cast",
        ),
        (
            DomainEvent::BadgeEarned {
                badge_id: "regular".to_string(),
            },
            "badge_granted",
        ),
    ];

    let connectivity = ToggleConnectivity::offline();
    let engine = test_engine(
        MockLedger::new(),
        StaticSession::signed_in(),
        connectivity.clone(),
        ManualClock::at(10_000),
    );
    let bridge = EventBridge::new(engine.clone(), connectivity);

    for (event, expected) in events {
        let action = bridge.publish(event).unwrap();
        assert_eq!(action.kind.name(), expected);
    }
    assert_eq!(engine.queue().len().unwrap(), 4);
}
