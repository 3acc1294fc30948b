// ABOUTME: Main library entry point for the BioAI Nutrition intelligence engine
// ABOUTME: Aggregates wellness events and produces rule-based recommendations and insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

#![deny(unsafe_code)]

//! # BioAI Intelligence
//!
//! The recommendation and insight engine behind the BioAI Nutrition backend.
//! Raw diet, activity, and sleep events are collapsed into daily metrics, then
//! a set of declarative rules is evaluated against those metrics and the
//! user's targets to produce prioritized, human-readable nudges.
//!
//! The engine is a pure, stateless function of `(events, targets)`: no I/O,
//! no shared mutable state, no async. The surrounding API and task layers
//! feed events in and get structured recommendations back.
//!
//! ## Example
//!
//! ```rust
//! use bioai_intelligence::intelligence::RecommendationEngine;
//! use std::collections::HashMap;
//!
//! let engine = RecommendationEngine::new();
//! let features = HashMap::from([
//!     ("calories".to_owned(), 2500.0),
//!     ("sleep_hours".to_owned(), 5.0),
//!     ("steps".to_owned(), 3000.0),
//! ]);
//! let report = engine.run(&features, &HashMap::new());
//! assert!(!report.recommendations.is_empty());
//! ```

/// Engine configuration: thresholds, limits, and default targets
pub mod config;

/// Central error types for the engine
pub mod errors;

/// Metrics aggregation, rule evaluation, and insight generation
pub mod intelligence;

/// Structured logging setup shared with the surrounding services
pub mod logging;

/// Event models and boundary validation
pub mod models;

pub use errors::{EngineError, EngineResult};
pub use intelligence::{
    aggregate, DailyMetrics, EngineReport, InsightGenerator, Recommendation,
    RecommendationEngine, Rule, RulePriority, RuleSet, WellnessInsight, WellnessRecommendations,
};
pub use models::{Event, Targets};
