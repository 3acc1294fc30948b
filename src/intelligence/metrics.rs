// ABOUTME: Metrics aggregation collapsing raw wellness events into daily accumulators
// ABOUTME: Pure summation, fail-soft on missing fields, order-independent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Event-to-metrics aggregation.
//!
//! [`aggregate`] reduces a batch of events into one [`DailyMetrics`] record.
//! Sums are commutative, so the input order never changes the result beyond
//! floating-point drift. Missing optional fields contribute zero; unknown
//! event kinds contribute nothing at all.

use crate::models::Event;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Aggregated numeric summary of one user's day.
///
/// All accumulators start at zero; `Default` is the result of aggregating an
/// empty event batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// Total energy intake (kcal)
    pub calories: f64,
    /// Total sleep (hours)
    pub sleep_hours: f64,
    /// Total step count
    pub steps: u64,
    /// Total fiber (grams)
    pub fiber_g: f64,
    /// Total protein (grams)
    pub protein_g: f64,
    /// Total carbohydrates (grams)
    pub carbs_g: f64,
    /// Total fat (grams)
    pub fat_g: f64,
}

impl DailyMetrics {
    /// Flatten into the feature mapping the evaluator and insight generator
    /// consume. Every accumulator is present, including zero-valued ones:
    /// an aggregated day with no protein logged genuinely has zero protein.
    #[must_use]
    pub fn to_features(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("calories".to_owned(), self.calories),
            ("sleep_hours".to_owned(), self.sleep_hours),
            ("steps".to_owned(), self.steps as f64),
            ("fiber_g".to_owned(), self.fiber_g),
            ("protein_g".to_owned(), self.protein_g),
            ("carbs_g".to_owned(), self.carbs_g),
            ("fat_g".to_owned(), self.fat_g),
        ])
    }
}

/// Collapse a batch of events into daily metrics.
///
/// Dispatches on the event variant: diet events add calories and macros,
/// activity events add steps, sleep events add `duration_minutes / 60` to
/// the sleep total. Never fails; malformed batches simply contribute less.
#[must_use]
pub fn aggregate(events: &[Event]) -> DailyMetrics {
    let mut metrics = DailyMetrics::default();

    for event in events {
        match event {
            Event::Diet(diet) => {
                metrics.calories += diet.calories;
                metrics.fiber_g += diet.fiber_g.unwrap_or_default();
                metrics.protein_g += diet.protein_g.unwrap_or_default();
                metrics.carbs_g += diet.carbs_g.unwrap_or_default();
                metrics.fat_g += diet.fat_g.unwrap_or_default();
            }
            Event::Activity(activity) => {
                metrics.steps += activity.steps.unwrap_or_default();
            }
            Event::Sleep(sleep) => {
                metrics.sleep_hours += sleep.duration_minutes / MINUTES_PER_HOUR;
            }
            Event::Unknown => {}
        }
    }

    metrics
}
