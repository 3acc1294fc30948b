// ABOUTME: Intelligence module wiring for aggregation, rules, evaluation, and insights
// ABOUTME: Re-exports the engine surface consumed by the API and task layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! # Intelligence Module
//!
//! The wellness engine proper: event aggregation, rule evaluation, and
//! insight generation. Data flows one way:
//!
//! ```text
//! events -> aggregate -> metrics -+-> evaluator (+ targets, rules) -> recommendations
//!                                 `-> insight generator -> insights
//! ```
//!
//! Everything here is synchronous and stateless per call. Rule sets are
//! immutable after construction, so one engine instance can serve any number
//! of concurrent callers.

/// Per-rule fail-soft evaluation, ordering, and fallback
pub mod evaluator;
/// Narrative summaries, alerts, and trend labels
pub mod insights;
/// Event-to-metrics aggregation
pub mod metrics;
/// Facade orchestrating evaluator and insight generator
pub mod recommendation_engine;
/// Rule definitions, safe condition AST, and rule-set sourcing
pub mod rules;

pub use evaluator::{EvalContext, Recommendation, RuleEvaluator};
pub use insights::{InsightConfig, InsightGenerator, TrendLabel, TrendReport, WellnessInsight};
pub use metrics::{aggregate, DailyMetrics};
pub use recommendation_engine::{
    EngineInput, EngineReport, RecommendationEngine, WellnessRecommendations,
};
pub use rules::{CompareOp, Predicate, Rule, RulePriority, RuleSet, ValueExpr};
