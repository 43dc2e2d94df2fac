// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Engine Types
// (C) 2026 Sovereign Framework Contributors.
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Sovereign Semantic Inconsistency Scoring (SSIS) engine.

pub mod config;
pub mod error;
pub mod score;

pub use config::{SeverityWeights, SsisConfig};
pub use error::{SsisError, SsisResult};
pub use score::{
    clamp_score, AnalysisResult, ConfidenceInterval, Evidence, MatchScore, Polarity, RiskLevel,
    Severity, Tension, Violation, ViolationReason,
};
