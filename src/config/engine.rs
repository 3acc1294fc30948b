// ABOUTME: Engine configuration for rule thresholds, output limits, and default targets
// ABOUTME: Defaults mirror the shipped heuristic rule table; env vars override per deployment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Engine Configuration
//!
//! Thresholds that drive the built-in heuristic rules, limits on
//! recommendation output, and the default targets substituted when a user
//! has not configured their own.

use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Threshold values for the built-in heuristic rules
    pub thresholds: RuleThresholds,
    /// Limits on recommendation generation
    pub limits: EngineLimits,
    /// Default goal values substituted when a target is absent
    pub targets: TargetDefaults,
}

/// Thresholds for the built-in heuristic rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Fiber intake below this fraction of target triggers the fiber rule
    pub fiber_target_ratio: f64,
    /// Protein intake below this fraction of target triggers the protein rule
    pub protein_target_ratio: f64,
    /// Water intake below this volume (ml) triggers the hydration rule
    pub hydration_min_ml: f64,
    /// Sleep below this many hours triggers the sleep rule
    pub sleep_min_hours: f64,
    /// Step count below this triggers the activity rule
    pub steps_min: f64,
    /// Below this many calories the macro-balance check reports balanced
    /// (insufficient data guard, also keeps the ratio math away from zero)
    pub macro_min_calories: f64,
    /// Protein share of total calories, lower bound (percent)
    pub protein_pct_min: f64,
    /// Protein share of total calories, upper bound (percent)
    pub protein_pct_max: f64,
    /// Carbohydrate share of total calories, lower bound (percent)
    pub carbs_pct_min: f64,
    /// Carbohydrate share of total calories, upper bound (percent)
    pub carbs_pct_max: f64,
    /// Fat share of total calories, lower bound (percent)
    pub fat_pct_min: f64,
    /// Fat share of total calories, upper bound (percent)
    pub fat_pct_max: f64,
}

/// Limits on recommendation generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineLimits {
    /// Maximum recommendations returned per evaluation
    pub max_recommendations: usize,
}

/// Default goal values, used when the caller supplies no target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDefaults {
    /// Daily fiber target (grams)
    pub fiber_g: f64,
    /// Daily calorie target (kcal)
    pub calories: f64,
    /// Daily protein target (grams)
    pub protein_g: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            fiber_target_ratio: 0.8,
            protein_target_ratio: 0.9,
            hydration_min_ml: 2000.0,
            sleep_min_hours: 7.0,
            steps_min: 8000.0,
            macro_min_calories: 100.0,
            protein_pct_min: 25.0,
            protein_pct_max: 40.0,
            carbs_pct_min: 40.0,
            carbs_pct_max: 55.0,
            fat_pct_min: 25.0,
            fat_pct_max: 35.0,
        }
    }
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_recommendations: 5,
        }
    }
}

impl Default for TargetDefaults {
    fn default() -> Self {
        Self {
            fiber_g: 25.0,
            calories: 2000.0,
            protein_g: 50.0,
        }
    }
}

/// Parse an optional float override from the environment
fn env_f64(name: &str, current: f64) -> EngineResult<f64> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<f64>()
            .map_err(|_| EngineError::Config(format!("{name} must be a number, got {raw:?}"))),
        Err(_) => Ok(current),
    }
}

impl EngineConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `BIOAI_ENGINE_MAX_RECOMMENDATIONS`,
    /// `BIOAI_ENGINE_SLEEP_MIN_HOURS`, `BIOAI_ENGINE_STEPS_MIN`,
    /// `BIOAI_ENGINE_HYDRATION_MIN_ML`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when a variable is set but does not
    /// parse as a number.
    pub fn from_env() -> EngineResult<Self> {
        let mut config = Self::default();

        config.thresholds.sleep_min_hours = env_f64(
            "BIOAI_ENGINE_SLEEP_MIN_HOURS",
            config.thresholds.sleep_min_hours,
        )?;
        config.thresholds.steps_min =
            env_f64("BIOAI_ENGINE_STEPS_MIN", config.thresholds.steps_min)?;
        config.thresholds.hydration_min_ml = env_f64(
            "BIOAI_ENGINE_HYDRATION_MIN_ML",
            config.thresholds.hydration_min_ml,
        )?;

        if let Ok(raw) = env::var("BIOAI_ENGINE_MAX_RECOMMENDATIONS") {
            config.limits.max_recommendations = raw.parse::<usize>().map_err(|_| {
                EngineError::Config(format!(
                    "BIOAI_ENGINE_MAX_RECOMMENDATIONS must be an integer, got {raw:?}"
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Sanity-check threshold relationships
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when a limit is zero or a macro range
    /// is inverted.
    pub fn validate(&self) -> EngineResult<()> {
        if self.limits.max_recommendations == 0 {
            return Err(EngineError::Config(
                "max_recommendations must be at least 1".into(),
            ));
        }
        let ranges = [
            (self.thresholds.protein_pct_min, self.thresholds.protein_pct_max),
            (self.thresholds.carbs_pct_min, self.thresholds.carbs_pct_max),
            (self.thresholds.fat_pct_min, self.thresholds.fat_pct_max),
        ];
        if ranges.iter().any(|(min, max)| min >= max) {
            return Err(EngineError::Config(
                "macro percentage ranges must satisfy min < max".into(),
            ));
        }
        Ok(())
    }
}
