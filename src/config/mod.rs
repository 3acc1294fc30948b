// ABOUTME: Configuration module root for the intelligence engine
// ABOUTME: Exposes threshold, limit, and default-target configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Engine configuration.

/// Engine thresholds, limits, and default targets
pub mod engine;

pub use engine::{EngineConfig, EngineLimits, RuleThresholds, TargetDefaults};
