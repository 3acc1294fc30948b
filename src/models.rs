// ABOUTME: Event models for diet, activity, and sleep ingestion
// ABOUTME: Tagged union checked at the input boundary before aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Wellness event models.
//!
//! Events arrive at the ingestion boundary as JSON with a `type`
//! discriminator and are deserialized into an explicit sum type, one variant
//! per event kind. Validation happens here, once, so the aggregator can stay
//! fail-soft and never inspect field invariants again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// User-specific goal values keyed by metric name (e.g. `fiber_g`)
pub type Targets = HashMap<String, f64>;

/// Validation failures raised at the ingestion boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventValidationError {
    /// Events must be attributed to a user
    #[error("user_id must be non-empty")]
    EmptyUserId,

    /// Field required to be strictly positive was zero or negative
    #[error("{field} must be strictly positive")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
    },

    /// Sleep quality is a 1-5 scale
    #[error("sleep_quality must be between 1 and 5, got {0}")]
    QualityOutOfRange(u8),
}

/// One logged occurrence of diet intake, physical activity, or sleep.
///
/// Unrecognized `type` tags deserialize into [`Event::Unknown`] so a batch
/// containing future event kinds still ingests; the aggregator ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Food intake with calories and optional macros
    Diet(DietEvent),
    /// Physical activity with duration and optional steps
    Activity(ActivityEvent),
    /// A sleep session
    Sleep(SleepEvent),
    /// Unrecognized event kind; contributes nothing to any metric
    #[serde(other)]
    Unknown,
}

/// Diet event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietEvent {
    /// Owning user
    pub user_id: String,
    /// Moment the intake was logged
    pub timestamp: DateTime<Utc>,
    /// Food description
    pub food: String,
    /// Energy content in kcal, strictly positive
    pub calories: f64,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    /// Fiber in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
}

/// Activity event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Owning user
    pub user_id: String,
    /// Moment the activity was logged
    pub timestamp: DateTime<Utc>,
    /// Activity description (walk, run, yoga, ...)
    pub activity_type: String,
    /// Duration in minutes, strictly positive
    pub duration_minutes: f64,
    /// Estimated energy burned in kcal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    /// Step count attributed to this activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u64>,
}

/// Sleep event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEvent {
    /// Owning user
    pub user_id: String,
    /// Moment the sleep session was logged
    pub timestamp: DateTime<Utc>,
    /// Duration in minutes, strictly positive
    pub duration_minutes: f64,
    /// Subjective quality on a 1-5 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<u8>,
}

/// Reject zero/negative values for a field that must be strictly positive
fn require_positive(field: &'static str, value: f64) -> Result<(), EventValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(EventValidationError::NonPositive { field })
    }
}

/// Same check for optional fields; absent is fine
fn require_positive_opt(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), EventValidationError> {
    value.map_or(Ok(()), |v| require_positive(field, v))
}

impl Event {
    /// User the event is attributed to, if the kind is recognized
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Diet(e) => Some(&e.user_id),
            Self::Activity(e) => Some(&e.user_id),
            Self::Sleep(e) => Some(&e.user_id),
            Self::Unknown => None,
        }
    }

    /// Timestamp of the event, if the kind is recognized
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Diet(e) => Some(e.timestamp),
            Self::Activity(e) => Some(e.timestamp),
            Self::Sleep(e) => Some(e.timestamp),
            Self::Unknown => None,
        }
    }

    /// Check the numeric invariants for this event kind.
    ///
    /// Called once at the ingestion boundary; the aggregator assumes events
    /// have already passed here.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: empty `user_id`, a
    /// non-positive value in a strictly-positive field, or a sleep quality
    /// outside the 1-5 scale.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.user_id().is_some_and(str::is_empty) {
            return Err(EventValidationError::EmptyUserId);
        }
        match self {
            Self::Diet(e) => {
                require_positive("calories", e.calories)?;
                require_positive_opt("protein_g", e.protein_g)?;
                require_positive_opt("carbs_g", e.carbs_g)?;
                require_positive_opt("fat_g", e.fat_g)?;
                require_positive_opt("fiber_g", e.fiber_g)
            }
            Self::Activity(e) => {
                require_positive("duration_minutes", e.duration_minutes)?;
                require_positive_opt("calories_burned", e.calories_burned)
                // steps is unsigned; >= 0 by construction
            }
            Self::Sleep(e) => {
                require_positive("duration_minutes", e.duration_minutes)?;
                match e.sleep_quality {
                    Some(q) if !(1..=5).contains(&q) => {
                        Err(EventValidationError::QualityOutOfRange(q))
                    }
                    _ => Ok(()),
                }
            }
            Self::Unknown => Ok(()),
        }
    }
}
