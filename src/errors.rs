// ABOUTME: Central error types for the intelligence engine
// ABOUTME: Covers boundary validation, rule parsing, and condition evaluation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Unified error handling for the engine.
//!
//! Almost everything inside the engine is recoverable: a failing rule
//! condition is a per-rule skip, a missing metric contributes zero. The
//! variants here cover the few surfaces that do fail: event validation at
//! the ingestion boundary, rule-definition parsing, and configuration.

use crate::models::EventValidationError;
use thiserror::Error;

/// Result alias used across the engine
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors produced by the intelligence engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// An event failed boundary validation before aggregation
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] EventValidationError),

    /// A declarative rule definition failed to parse
    #[error("failed to parse rule definition: {0}")]
    RuleParse(#[from] serde_yaml::Error),

    /// A rule file could not be read
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    /// A condition referenced a field absent from the evaluation context.
    /// The evaluator treats this as a per-rule skip, never a hard failure.
    #[error("unknown context field: {0}")]
    UnknownField(String),

    /// A condition hit an arithmetic dead end (division by zero)
    #[error("arithmetic error evaluating condition: {0}")]
    Arithmetic(&'static str),

    /// Invalid engine configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
}
