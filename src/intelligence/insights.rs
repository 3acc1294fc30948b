// ABOUTME: Insight generation producing narrative summaries, alerts, and trend labels
// ABOUTME: Fixed decision ladder over daily metrics, independent of the rule set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Insight generation.
//!
//! Insights are the narrative companion to recommendations: a one-line
//! summary chosen by a fixed first-match ladder, urgent alerts for extreme
//! values, and three independent qualitative trend labels. They read the
//! same daily features the evaluator does but never consult the rule set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Qualitative trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendLabel {
    /// Metric is trending up toward its goal
    Increasing,
    /// Metric is at or above its healthy threshold
    Good,
    /// Metric is below its healthy threshold
    NeedsImprovement,
}

/// The three per-category trend labels, computed independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Fiber intake trend
    pub fiber_trend: TrendLabel,
    /// Step-count trend
    pub activity_trend: TrendLabel,
    /// Sleep-duration trend
    pub sleep_trend: TrendLabel,
}

/// Narrative view of a user's day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessInsight {
    /// One-line summary of the day
    pub summary: String,
    /// Urgent alerts, calorie alert first when both fire
    pub alerts: Vec<String>,
    /// Per-category qualitative labels
    pub trends: TrendReport,
}

/// Thresholds for the summary ladder, alerts, and trend labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Fiber above this (grams) counts toward the on-track summary
    pub on_track_fiber_g: f64,
    /// Calories below this count toward the on-track summary
    pub on_track_max_calories: f64,
    /// Sleep at or above this (hours) counts toward the on-track summary
    pub on_track_min_sleep_hours: f64,
    /// Calories above this select the high-calorie summary
    pub high_calorie_summary: f64,
    /// Sleep below this (hours) selects the low-sleep summary
    pub low_sleep_summary: f64,
    /// Calories above this raise an urgent alert
    pub calorie_alert: f64,
    /// Sleep below this (hours) raises a severe-deficiency alert
    pub sleep_alert: f64,
    /// Fiber above this (grams) labels the fiber trend as increasing
    pub fiber_trend_g: f64,
    /// Steps above this label the activity trend as good
    pub activity_trend_steps: f64,
    /// Sleep at or above this (hours) labels the sleep trend as good
    pub sleep_trend_hours: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            on_track_fiber_g: 20.0,
            on_track_max_calories: 2500.0,
            on_track_min_sleep_hours: 7.0,
            high_calorie_summary: 2500.0,
            low_sleep_summary: 6.0,
            calorie_alert: 3500.0,
            sleep_alert: 4.0,
            fiber_trend_g: 15.0,
            activity_trend_steps: 8000.0,
            sleep_trend_hours: 7.0,
        }
    }
}

/// Derives insights from daily features
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    config: InsightConfig,
}

/// Absent features read as zero; the ladder and trends treat "not logged"
/// and "logged zero" the same way.
fn feature(features: &HashMap<String, f64>, name: &str) -> f64 {
    features.get(name).copied().unwrap_or_default()
}

impl InsightGenerator {
    /// Generator with stock thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with custom thresholds
    #[must_use]
    pub const fn with_config(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Produce the full insight record for one day of features
    #[must_use]
    pub fn generate(&self, features: &HashMap<String, f64>) -> WellnessInsight {
        WellnessInsight {
            summary: self.summary(features),
            alerts: self.alerts(features),
            trends: self.trends(features),
        }
    }

    /// First-match summary ladder: on-track, high-calorie, low-sleep, steady
    fn summary(&self, features: &HashMap<String, f64>) -> String {
        let fiber = feature(features, "fiber_g");
        let calories = feature(features, "calories");
        let sleep = feature(features, "sleep_hours");

        if fiber > self.config.on_track_fiber_g
            && calories < self.config.on_track_max_calories
            && sleep >= self.config.on_track_min_sleep_hours
        {
            "Great day! You're on track with nutrition and sleep.".into()
        } else if calories > self.config.high_calorie_summary {
            "Calorie intake was higher today. Consider lighter meals tomorrow.".into()
        } else if sleep < self.config.low_sleep_summary {
            "Sleep was below target. Prioritize rest tonight.".into()
        } else {
            "Steady day. Keep up the good habits!".into()
        }
    }

    /// Zero to two urgent alerts; calorie alert always precedes sleep alert
    fn alerts(&self, features: &HashMap<String, f64>) -> Vec<String> {
        let mut alerts = Vec::new();
        if feature(features, "calories") > self.config.calorie_alert {
            alerts.push("Very high calorie intake detected".to_owned());
        }
        if feature(features, "sleep_hours") < self.config.sleep_alert {
            alerts.push("Severe sleep deficiency".to_owned());
        }
        alerts
    }

    /// Three binary classifications with no cross-metric interaction
    fn trends(&self, features: &HashMap<String, f64>) -> TrendReport {
        TrendReport {
            fiber_trend: if feature(features, "fiber_g") > self.config.fiber_trend_g {
                TrendLabel::Increasing
            } else {
                TrendLabel::NeedsImprovement
            },
            activity_trend: if feature(features, "steps") > self.config.activity_trend_steps {
                TrendLabel::Good
            } else {
                TrendLabel::NeedsImprovement
            },
            sleep_trend: if feature(features, "sleep_hours") >= self.config.sleep_trend_hours {
                TrendLabel::Good
            } else {
                TrendLabel::NeedsImprovement
            },
        }
    }
}
