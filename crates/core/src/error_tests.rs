// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for error display formatting.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

#[test]
fn timestamp_error_names_the_value() {
    let err = Error::TimestampOutOfRange(u64::MAX);
    assert!(err.to_string().contains("timestamp out of range"));
    assert!(err.to_string().contains(&u64::MAX.to_string()));
}

#[test]
fn json_errors_convert() {
    let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
