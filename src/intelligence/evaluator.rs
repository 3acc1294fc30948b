// ABOUTME: Rule evaluation over the merged metrics+targets context
// ABOUTME: Per-rule fail-soft, priority ordering, top-N truncation, deterministic fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Rule evaluation.
//!
//! The evaluator merges daily features and user targets into one flat
//! context (targets get a `target_` prefix, so nothing is silently
//! overwritten), runs every rule's condition against it, and turns the
//! triggered rules into an ordered recommendation list. One bad rule never
//! aborts the pass, and the output is never empty: when nothing triggers,
//! a fixed all-clear recommendation is returned instead.

use crate::config::TargetDefaults;
use crate::errors::{EngineError, EngineResult};
use crate::intelligence::rules::{RulePriority, RuleSet};
use crate::models::Targets;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single user-facing nudge produced by rule evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Identifier of the rule that produced this nudge
    pub id: String,
    /// Rendered user-facing message
    pub message: String,
    /// Why the nudge is being made
    pub rationale: String,
    /// Free-form classification tags
    pub tags: Vec<String>,
    /// Disclaimer tags bounding the claim
    pub guardrails: Vec<String>,
    /// Severity echo from the originating rule
    pub priority: RulePriority,
}

/// Merged, flat evaluation context rule conditions read from.
///
/// Metric names appear verbatim; target names are prefixed with `target_`
/// unless the caller already prefixed them. Defaults for unset targets are
/// substituted first, then overlaid by caller-supplied values.
#[derive(Debug, Clone)]
pub struct EvalContext {
    fields: HashMap<String, f64>,
}

impl EvalContext {
    /// Build a context from daily features, user targets, and defaults
    #[must_use]
    pub fn new(features: &HashMap<String, f64>, targets: &Targets, defaults: &TargetDefaults) -> Self {
        let mut fields = HashMap::with_capacity(features.len() + targets.len() + 3);

        fields.insert("target_fiber_g".to_owned(), defaults.fiber_g);
        fields.insert("target_calories".to_owned(), defaults.calories);
        fields.insert("target_protein_g".to_owned(), defaults.protein_g);

        for (key, value) in targets {
            let key = if key.starts_with("target_") {
                key.clone()
            } else {
                format!("target_{key}")
            };
            fields.insert(key, *value);
        }

        for (key, value) in features {
            fields.insert(key.clone(), *value);
        }

        Self { fields }
    }

    /// Non-erroring lookup, used for message placeholder rendering
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    /// Erroring lookup, used by condition evaluation
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownField`] when the field is absent; the caller
    /// treats that as a per-rule skip.
    pub fn get(&self, name: &str) -> EngineResult<f64> {
        self.lookup(name)
            .ok_or_else(|| EngineError::UnknownField(name.to_owned()))
    }
}

/// Applies a rule set to a context and ranks what triggers
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    defaults: TargetDefaults,
}

impl RuleEvaluator {
    /// Evaluator with stock target defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator with custom target defaults
    #[must_use]
    pub const fn with_defaults(defaults: TargetDefaults) -> Self {
        Self { defaults }
    }

    /// Evaluate `rules` against `features` merged with `targets`.
    ///
    /// Triggered rules are sorted by `(priority rank, id)`, highest
    /// severity first with ties broken lexicographically, then truncated to
    /// `top_n`. When nothing triggers, the returned list contains exactly
    /// the all-clear fallback; it is never empty.
    #[must_use]
    pub fn evaluate(
        &self,
        features: &HashMap<String, f64>,
        targets: &Targets,
        rules: &RuleSet,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let ctx = EvalContext::new(features, targets, &self.defaults);

        let mut triggered: Vec<Recommendation> = Vec::new();
        for rule in rules {
            match rule.when.matches(&ctx) {
                Ok(true) => triggered.push(Recommendation {
                    id: rule.id.clone(),
                    message: render_template(&rule.message, &ctx),
                    rationale: rule.rationale.clone(),
                    tags: rule.tags.clone(),
                    guardrails: rule.guardrails.clone(),
                    priority: rule.priority,
                }),
                Ok(false) => {}
                Err(err) => {
                    // Missing field or arithmetic dead end: this rule only.
                    tracing::debug!(rule = %rule.id, error = %err, "rule condition failed, skipping");
                }
            }
        }

        if triggered.is_empty() {
            tracing::debug!("no rules triggered, returning all-clear fallback");
            return vec![fallback_recommendation()];
        }

        triggered.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| a.id.cmp(&b.id))
        });
        triggered.truncate(top_n);
        triggered
    }
}

/// The deterministic all-clear returned when no rule triggers
fn fallback_recommendation() -> Recommendation {
    Recommendation {
        id: "good_habits".into(),
        message: "You're maintaining good habits today. Keep up the healthy lifestyle!".into(),
        rationale: "All metrics are healthy.".into(),
        tags: Vec::new(),
        guardrails: vec!["non-diagnostic".into()],
        priority: RulePriority::Low,
    }
}

/// Render `{field}` / `{field:.N}` placeholders from the context.
///
/// Unknown placeholders are left verbatim so a typo in a rule file shows up
/// in the message instead of vanishing.
fn render_template(template: &str, ctx: &EvalContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            // Unterminated brace: emit the remainder as-is.
            out.push('{');
            rest = after;
            break;
        };
        let token = &after[..end];
        let (name, precision) = token
            .split_once(":.")
            .map_or((token, None), |(n, p)| (n, p.parse::<usize>().ok()));

        match ctx.lookup(name) {
            Some(value) => out.push_str(&format_value(value, precision)),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Format a metric value: explicit precision wins, otherwise whole numbers
/// print without decimals and everything else with one.
fn format_value(value: f64, precision: Option<usize>) -> String {
    precision.map_or_else(
        || {
            if value.fract().abs() < f64::EPSILON {
                format!("{value:.0}")
            } else {
                format!("{value:.1}")
            }
        },
        |p| format!("{value:.p$}"),
    )
}
