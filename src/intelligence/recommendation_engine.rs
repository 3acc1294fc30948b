// ABOUTME: Recommendation engine facade orchestrating aggregation, evaluation, and insights
// ABOUTME: The single synchronous entry point the API and task layers call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Recommendation engine facade.
//!
//! [`RecommendationEngine`] owns an immutable rule set plus configuration
//! and exposes one entry point per caller shape: [`run`] for callers that
//! already hold daily features, [`run_events`] for the task handler that
//! starts from raw events. Construct once, share read-only; the engine
//! holds no mutable state and every call is independent.
//!
//! [`run`]: RecommendationEngine::run
//! [`run_events`]: RecommendationEngine::run_events

use crate::config::EngineConfig;
use crate::intelligence::evaluator::{Recommendation, RuleEvaluator};
use crate::intelligence::insights::{InsightGenerator, WellnessInsight};
use crate::intelligence::metrics::aggregate;
use crate::intelligence::rules::RuleSet;
use crate::models::{Event, Targets};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Echo of the caller's input, carried in the report for traceability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInput {
    /// Daily features exactly as supplied, before default substitution
    pub daily_features: HashMap<String, f64>,
    /// User targets exactly as supplied
    pub user_targets: Targets,
}

/// Full engine output for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    /// Moment the evaluation ran
    pub generated_at: DateTime<Utc>,
    /// Ranked, truncated, never-empty recommendation list
    pub recommendations: Vec<Recommendation>,
    /// Narrative insights derived from the same features
    pub insights: WellnessInsight,
    /// Echo of the input for caller-side debugging
    pub input: EngineInput,
}

/// The seam the surrounding task/API layer consumes
pub trait WellnessRecommendations {
    /// Ranked recommendations for the given features and targets
    fn recommend(&self, features: &HashMap<String, f64>, targets: &Targets)
        -> Vec<Recommendation>;

    /// Narrative insights for the given features
    fn insights(&self, features: &HashMap<String, f64>) -> WellnessInsight;
}

/// Rule-based wellness recommendation engine
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: EngineConfig,
    rules: RuleSet,
    evaluator: RuleEvaluator,
    generator: InsightGenerator,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Engine with the built-in rule table and default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with the built-in rule table parameterized by `config`
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let rules = RuleSet::builtin(&config);
        Self::with_config_and_rules(config, rules)
    }

    /// Engine with an explicit rule set and default configuration.
    ///
    /// Use this to run externally loaded rules, possibly merged with
    /// [`RuleSet::builtin`].
    #[must_use]
    pub fn with_rules(rules: RuleSet) -> Self {
        Self::with_config_and_rules(EngineConfig::default(), rules)
    }

    /// Engine with explicit configuration and rule set
    #[must_use]
    pub fn with_config_and_rules(config: EngineConfig, rules: RuleSet) -> Self {
        let evaluator = RuleEvaluator::with_defaults(config.targets.clone());
        Self {
            config,
            rules,
            evaluator,
            generator: InsightGenerator::new(),
        }
    }

    /// The rule set this engine evaluates
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate features and targets into a full report.
    ///
    /// Inputs are read-only; the report echoes them back verbatim. Calling
    /// twice with the same input yields identical recommendations and
    /// insights (only `generated_at` differs).
    #[must_use]
    pub fn run(&self, daily_features: &HashMap<String, f64>, user_targets: &Targets) -> EngineReport {
        let recommendations = self.recommend(daily_features, user_targets);
        let insights = self.generator.generate(daily_features);

        tracing::debug!(
            rules = self.rules.len(),
            recommendations = recommendations.len(),
            alerts = insights.alerts.len(),
            "engine evaluation complete"
        );

        EngineReport {
            generated_at: Utc::now(),
            recommendations,
            insights,
            input: EngineInput {
                daily_features: daily_features.clone(),
                user_targets: user_targets.clone(),
            },
        }
    }

    /// Aggregate raw events, then evaluate.
    ///
    /// This is the path the background task handler takes: one batch of
    /// events in, one report out. Events are borrowed, never retained.
    #[must_use]
    pub fn run_events(&self, events: &[Event], user_targets: &Targets) -> EngineReport {
        let metrics = aggregate(events);
        tracing::debug!(events = events.len(), "aggregated event batch");
        self.run(&metrics.to_features(), user_targets)
    }
}

impl WellnessRecommendations for RecommendationEngine {
    fn recommend(
        &self,
        features: &HashMap<String, f64>,
        targets: &Targets,
    ) -> Vec<Recommendation> {
        self.evaluator.evaluate(
            features,
            targets,
            &self.rules,
            self.config.limits.max_recommendations,
        )
    }

    fn insights(&self, features: &HashMap<String, f64>) -> WellnessInsight {
        self.generator.generate(features)
    }
}
