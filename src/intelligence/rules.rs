// ABOUTME: Rule definitions, safe condition AST, and rule-set sourcing
// ABOUTME: Built-in heuristic table and YAML-declared rules share one evaluation path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Rule sets.
//!
//! A rule pairs a condition with a message, rationale, tags, and priority.
//! Conditions are a small whitelisted expression AST (field references,
//! constants, arithmetic, comparisons, and boolean combinators) evaluated
//! by a safe interpreter. Externally supplied rule files therefore get no
//! code-execution surface: an unparseable condition is a load error, a
//! condition referencing an absent field is a per-rule skip at evaluation
//! time.
//!
//! Two sourcing strategies compose: [`RuleSet::builtin`] carries the shipped
//! heuristic table as structured data, and [`RuleSet::load_dir`] /
//! [`RuleSet::from_yaml_str`] parse declarative YAML definitions. Both
//! produce the same [`Rule`] records, and [`RuleSet::merge`] combines them.
//! A `RuleSet` is immutable once built; share it freely across threads.

use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};
use crate::intelligence::evaluator::EvalContext;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Calories per gram of protein and carbohydrate
const KCAL_PER_G_PROTEIN_CARBS: f64 = 4.0;
/// Calories per gram of fat
const KCAL_PER_G_FAT: f64 = 9.0;

/// Severity of a rule, driving recommendation ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RulePriority {
    /// Surfaced first
    High,
    /// Surfaced after high
    Medium,
    /// Surfaced after medium
    Low,
    /// Any unrecognized spelling; sorts after everything else
    #[default]
    Unspecified,
}

impl RulePriority {
    /// Parse a priority, mapping unknown spellings to `Unspecified`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unspecified,
        }
    }

    /// Sort rank: high=0, medium=1, low=2, anything else=3
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
            Self::Unspecified => 3,
        }
    }
}

impl<'de> Deserialize<'de> for RulePriority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&raw))
    }
}

/// Numeric expression over the evaluation context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueExpr {
    /// Named field (metric, `target_`-prefixed target, or extra feature)
    Field(String),
    /// Numeric literal
    Const(f64),
    /// Sum of sub-expressions
    Add(Vec<ValueExpr>),
    /// Difference: first minus second
    Sub(Box<ValueExpr>, Box<ValueExpr>),
    /// Product of sub-expressions
    Mul(Vec<ValueExpr>),
    /// Quotient: first over second; a zero denominator is an evaluation
    /// error, which skips the owning rule
    Div(Box<ValueExpr>, Box<ValueExpr>),
}

impl ValueExpr {
    /// Evaluate against the merged metrics+targets context
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownField`] for an absent field,
    /// [`EngineError::Arithmetic`] for division by zero.
    pub fn eval(&self, ctx: &EvalContext) -> EngineResult<f64> {
        match self {
            Self::Field(name) => ctx.get(name),
            Self::Const(value) => Ok(*value),
            Self::Add(terms) => terms.iter().try_fold(0.0, |acc, t| Ok(acc + t.eval(ctx)?)),
            Self::Sub(lhs, rhs) => Ok(lhs.eval(ctx)? - rhs.eval(ctx)?),
            Self::Mul(factors) => factors
                .iter()
                .try_fold(1.0, |acc, f| Ok(acc * f.eval(ctx)?)),
            Self::Div(num, den) => {
                let den = den.eval(ctx)?;
                if den == 0.0 {
                    return Err(EngineError::Arithmetic("division by zero"));
                }
                Ok(num.eval(ctx)? / den)
            }
        }
    }
}

/// Comparison operators permitted in rule conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// Strictly less than
    Lt,
    /// Less than or equal
    Le,
    /// Strictly greater than
    Gt,
    /// Greater than or equal
    Ge,
}

impl CompareOp {
    fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

/// Boolean condition over the evaluation context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Comparison between two numeric expressions
    Compare {
        /// Left-hand side
        lhs: ValueExpr,
        /// Operator
        op: CompareOp,
        /// Right-hand side
        rhs: ValueExpr,
    },
    /// True when every sub-predicate holds; short-circuits left to right,
    /// so later predicates are never evaluated once one is false
    All(Vec<Predicate>),
    /// True when any sub-predicate holds; short-circuits left to right
    Any(Vec<Predicate>),
    /// Negation
    Not(Box<Predicate>),
}

impl Predicate {
    /// Evaluate against the merged metrics+targets context
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::UnknownField`] and
    /// [`EngineError::Arithmetic`] from sub-expressions that actually get
    /// evaluated; short-circuited branches cannot fail.
    pub fn matches(&self, ctx: &EvalContext) -> EngineResult<bool> {
        match self {
            Self::Compare { lhs, op, rhs } => Ok(op.apply(lhs.eval(ctx)?, rhs.eval(ctx)?)),
            Self::All(preds) => {
                for pred in preds {
                    if !pred.matches(ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any(preds) => {
                for pred in preds {
                    if pred.matches(ctx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(pred) => Ok(!pred.matches(ctx)?),
        }
    }
}

/// One immutable recommendation rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Unique identifier, also the ordering tiebreaker
    pub id: String,
    /// Display name
    pub name: String,
    /// Condition that must hold for the rule to trigger
    pub when: Predicate,
    /// User-facing message; `{field}` / `{field:.N}` placeholders are
    /// rendered from the evaluation context at trigger time
    pub message: String,
    /// Why the nudge is being made
    pub rationale: String,
    /// Free-form classification tags
    pub tags: Vec<String>,
    /// Disclaimer tags bounding the claim (e.g. `non-diagnostic`)
    pub guardrails: Vec<String>,
    /// Severity driving output order
    pub priority: RulePriority,
}

/// Wire format of one declarative rule file: `{id, name, when, then}`
#[derive(Debug, Deserialize)]
struct RuleDefinition {
    id: String,
    #[serde(default)]
    name: String,
    when: Predicate,
    then: RuleOutcome,
}

/// The `then` block of a declarative rule
#[derive(Debug, Deserialize)]
struct RuleOutcome {
    message: String,
    #[serde(default)]
    rationale: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    guardrails: Vec<String>,
    #[serde(default)]
    priority: RulePriority,
}

impl From<RuleDefinition> for Rule {
    fn from(def: RuleDefinition) -> Self {
        Self {
            id: def.id,
            name: def.name,
            when: def.when,
            message: def.then.message,
            rationale: def.then.rationale,
            tags: def.then.tags,
            guardrails: def.then.guardrails,
            priority: def.then.priority,
        }
    }
}

/// An ordered, read-only collection of rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Wrap an explicit list of rules
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parse a single declarative rule from YAML
    ///
    /// # Errors
    ///
    /// [`EngineError::RuleParse`] when the document does not match the
    /// `{id, when, then}` record shape or uses an operation outside the
    /// whitelisted grammar.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let def: RuleDefinition = serde_yaml::from_str(yaml)?;
        Ok(Self::new(vec![def.into()]))
    }

    /// Load every `*.yaml` / `*.yml` file in a directory, one rule per file,
    /// in lexicographic filename order so the resulting set is stable.
    ///
    /// # Errors
    ///
    /// [`EngineError::Io`] for unreadable files or directories,
    /// [`EngineError::RuleParse`] for malformed definitions.
    pub fn load_dir(dir: &Path) -> EngineResult<Self> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
            })
            .collect();
        paths.sort();

        let mut rules = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = fs::read_to_string(&path)?;
            let def: RuleDefinition = serde_yaml::from_str(&raw)?;
            tracing::debug!(rule = %def.id, file = %path.display(), "loaded rule definition");
            rules.push(def.into());
        }
        Ok(Self::new(rules))
    }

    /// Combine two sets, preserving order: `self` first, then `other`
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Iterate rules in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Number of rules in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The shipped heuristic table, parameterized by engine thresholds.
    ///
    /// Covers fiber, hydration, protein, sleep, steps, calorie budget, and
    /// macro balance. Same structured condition form as externally loaded
    /// rules, so both sources share one evaluation path.
    #[must_use]
    pub fn builtin(config: &EngineConfig) -> Self {
        let t = &config.thresholds;

        let rules = vec![
            Rule {
                id: "fiber_boost".into(),
                name: "Increase Fiber Intake".into(),
                when: below_ratio_of_target("fiber_g", t.fiber_target_ratio),
                message: "Try increasing fiber intake by 6-8g/day: add an apple and a handful of almonds.".into(),
                rationale: "Your fiber intake is below target.".into(),
                tags: vec!["nutrition".into(), "digestive-health".into()],
                guardrails: Vec::new(),
                priority: RulePriority::High,
            },
            Rule {
                id: "water_intake_reminder".into(),
                name: "Hydration Reminder".into(),
                when: field_below("water_ml", t.hydration_min_ml),
                message: "Drink more water! Aim for at least 8-10 glasses per day.".into(),
                rationale: "Proper hydration supports energy and metabolism.".into(),
                tags: vec!["hydration".into(), "wellness".into()],
                guardrails: Vec::new(),
                priority: RulePriority::Medium,
            },
            Rule {
                id: "protein_target".into(),
                name: "Protein Goal".into(),
                when: below_ratio_of_target("protein_g", t.protein_target_ratio),
                message: "Increase protein intake to support muscle health and satiety.".into(),
                rationale: "Adequate protein is essential for body composition.".into(),
                tags: vec!["nutrition".into(), "protein".into()],
                guardrails: Vec::new(),
                priority: RulePriority::Medium,
            },
            Rule {
                id: "sleep_quality".into(),
                name: "Sleep Optimization".into(),
                when: field_below("sleep_hours", t.sleep_min_hours),
                message: "Aim for 7-9 hours of quality sleep each night.".into(),
                rationale: "Better sleep improves metabolism and recovery.".into(),
                tags: vec!["sleep".into(), "wellness".into()],
                guardrails: Vec::new(),
                priority: RulePriority::High,
            },
            Rule {
                id: "activity_reminder".into(),
                name: "Daily Movement".into(),
                when: field_below("steps", t.steps_min),
                message: "Try to reach 10,000 steps today with regular movement.".into(),
                rationale: "Daily activity strengthens cardiovascular health.".into(),
                tags: vec!["activity".into(), "fitness".into()],
                guardrails: Vec::new(),
                priority: RulePriority::Medium,
            },
            Rule {
                id: "high_calories".into(),
                name: "Calorie Budget".into(),
                when: Predicate::Compare {
                    lhs: ValueExpr::Field("calories".into()),
                    op: CompareOp::Gt,
                    rhs: ValueExpr::Field("target_calories".into()),
                },
                message: "Today's calorie intake is {calories:.0} kcal. Try vegetables and protein for your next meal.".into(),
                rationale: "Calorie intake exceeds goal.".into(),
                tags: vec!["nutrition".into(), "calories".into()],
                guardrails: vec!["non-diagnostic".into()],
                priority: RulePriority::High,
            },
            Rule {
                id: "balanced_macros".into(),
                name: "Macro Balance".into(),
                when: macro_imbalance(t.macro_min_calories, [
                    ("protein_g", KCAL_PER_G_PROTEIN_CARBS, t.protein_pct_min, t.protein_pct_max),
                    ("carbs_g", KCAL_PER_G_PROTEIN_CARBS, t.carbs_pct_min, t.carbs_pct_max),
                    ("fat_g", KCAL_PER_G_FAT, t.fat_pct_min, t.fat_pct_max),
                ]),
                message: "Aim for balanced macronutrients: 40% carbs, 30% protein, 30% fat.".into(),
                rationale: "Balanced macros support sustained energy and health.".into(),
                tags: vec!["nutrition".into(), "macros".into()],
                guardrails: Vec::new(),
                priority: RulePriority::Low,
            },
        ];

        Self::new(rules)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `field < constant`
fn field_below(field: &str, threshold: f64) -> Predicate {
    Predicate::Compare {
        lhs: ValueExpr::Field(field.into()),
        op: CompareOp::Lt,
        rhs: ValueExpr::Const(threshold),
    }
}

/// `field < target_field * ratio`
fn below_ratio_of_target(field: &str, ratio: f64) -> Predicate {
    Predicate::Compare {
        lhs: ValueExpr::Field(field.into()),
        op: CompareOp::Lt,
        rhs: ValueExpr::Mul(vec![
            ValueExpr::Field(format!("target_{field}")),
            ValueExpr::Const(ratio),
        ]),
    }
}

/// Share of total calories contributed by a macro field, in percent
fn pct_of_calories(field: &str, kcal_per_g: f64) -> ValueExpr {
    ValueExpr::Mul(vec![
        ValueExpr::Div(
            Box::new(ValueExpr::Mul(vec![
                ValueExpr::Field(field.into()),
                ValueExpr::Const(kcal_per_g),
            ])),
            Box::new(ValueExpr::Field("calories".into())),
        ),
        ValueExpr::Const(100.0),
    ])
}

/// `min <= expr <= max`
fn between(expr: ValueExpr, min: f64, max: f64) -> Predicate {
    Predicate::All(vec![
        Predicate::Compare {
            lhs: expr.clone(),
            op: CompareOp::Ge,
            rhs: ValueExpr::Const(min),
        },
        Predicate::Compare {
            lhs: expr,
            op: CompareOp::Le,
            rhs: ValueExpr::Const(max),
        },
    ])
}

/// Macro split outside the given percentage bands.
///
/// The leading calorie floor doubles as the insufficient-data guard: below
/// it the conjunction short-circuits to false (balanced) before any ratio is
/// computed, so the division by `calories` can never see zero.
fn macro_imbalance(min_calories: f64, bands: [(&str, f64, f64, f64); 3]) -> Predicate {
    let in_range = bands
        .into_iter()
        .map(|(field, kcal_per_g, min, max)| between(pct_of_calories(field, kcal_per_g), min, max))
        .collect();

    Predicate::All(vec![
        Predicate::Compare {
            lhs: ValueExpr::Field("calories".into()),
            op: CompareOp::Ge,
            rhs: ValueExpr::Const(min_calories),
        },
        Predicate::Not(Box::new(Predicate::All(in_range))),
    ])
}
