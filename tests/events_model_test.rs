// ABOUTME: Unit tests for event model deserialization and boundary validation
// ABOUTME: Validates tagged-union parsing, unknown kinds, and numeric invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use bioai_intelligence::models::{DietEvent, Event, EventValidationError, SleepEvent};
use chrono::{TimeZone, Utc};

fn diet_json() -> &'static str {
    r#"{
        "type": "diet",
        "user_id": "u1",
        "timestamp": "2025-06-01T12:00:00Z",
        "food": "oatmeal",
        "calories": 320.0,
        "fiber_g": 8.0
    }"#
}

#[test]
fn test_diet_event_deserializes_with_optional_macros() {
    let event: Event = serde_json::from_str(diet_json()).unwrap();
    let Event::Diet(diet) = event else {
        panic!("expected diet variant");
    };
    assert_eq!(diet.user_id, "u1");
    assert!((diet.calories - 320.0).abs() < f64::EPSILON);
    assert_eq!(diet.fiber_g, Some(8.0));
    assert_eq!(diet.protein_g, None);
}

#[test]
fn test_unknown_event_kind_deserializes_to_unknown() {
    let raw = r#"{"type": "meditation", "user_id": "u1", "minutes": 20}"#;
    let event: Event = serde_json::from_str(raw).unwrap();
    assert_eq!(event, Event::Unknown);
    assert_eq!(event.user_id(), None);
    assert!(event.validate().is_ok());
}

#[test]
fn test_serialization_round_trip_preserves_tag() {
    let event: Event = serde_json::from_str(diet_json()).unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "diet");
    let back: Event = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_validate_rejects_empty_user_id() {
    let event = Event::Sleep(SleepEvent {
        user_id: String::new(),
        timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap(),
        duration_minutes: 480.0,
        sleep_quality: None,
    });
    assert_eq!(event.validate(), Err(EventValidationError::EmptyUserId));
}

#[test]
fn test_validate_rejects_non_positive_calories() {
    let event = Event::Diet(DietEvent {
        user_id: "u1".into(),
        timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        food: "mystery".into(),
        calories: 0.0,
        protein_g: None,
        carbs_g: None,
        fat_g: None,
        fiber_g: None,
    });
    assert_eq!(
        event.validate(),
        Err(EventValidationError::NonPositive { field: "calories" })
    );
}

#[test]
fn test_validate_rejects_negative_optional_macro() {
    let event = Event::Diet(DietEvent {
        user_id: "u1".into(),
        timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        food: "yogurt".into(),
        calories: 150.0,
        protein_g: Some(-3.0),
        carbs_g: None,
        fat_g: None,
        fiber_g: None,
    });
    assert_eq!(
        event.validate(),
        Err(EventValidationError::NonPositive { field: "protein_g" })
    );
}

#[test]
fn test_validate_rejects_out_of_scale_sleep_quality() {
    let event = Event::Sleep(SleepEvent {
        user_id: "u1".into(),
        timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap(),
        duration_minutes: 420.0,
        sleep_quality: Some(6),
    });
    assert_eq!(
        event.validate(),
        Err(EventValidationError::QualityOutOfRange(6))
    );
}

#[test]
fn test_validate_accepts_well_formed_events() {
    let event = Event::Sleep(SleepEvent {
        user_id: "u1".into(),
        timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap(),
        duration_minutes: 420.0,
        sleep_quality: Some(4),
    });
    assert!(event.validate().is_ok());
}
