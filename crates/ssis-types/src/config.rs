// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Engine Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{SsisError, SsisResult};
use crate::score::Severity;

/// Penalty multipliers applied to an axiom's weight per violation severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 0.3,
            medium: 0.6,
            high: 1.0,
        }
    }
}

impl SeverityWeights {
    pub fn multiplier(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }
}

/// Runtime configuration for one analysis.
///
/// Every field has a default, so partial JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SsisConfig {
    /// An axiom whose best similarity falls below this is unsupported.
    /// Default: 0.15.
    pub support_threshold: f64,

    /// Similarity a pair must exceed before differing polarity counts
    /// as a contradiction. Default: 0.2.
    pub polarity_overlap_threshold: f64,

    /// Severity multipliers used by the compliance score.
    pub severity_weights: SeverityWeights,

    /// Floor on the confidence interval half-width. Default: 0.05.
    pub min_half_width: f64,

    /// Half-width numerator: `interval_scale / (1 + propositions)`.
    /// Default: 0.5.
    pub interval_scale: f64,

    /// A document is compliant while `1 - compliance_score` stays below
    /// this. Default: 0.3.
    pub violation_threshold: f64,
}

impl Default for SsisConfig {
    fn default() -> Self {
        Self {
            support_threshold: 0.15,
            polarity_overlap_threshold: 0.2,
            severity_weights: SeverityWeights::default(),
            min_half_width: 0.05,
            interval_scale: 0.5,
            violation_threshold: 0.3,
        }
    }
}

fn check_unit(name: &str, value: f64) -> SsisResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SsisError::Config(format!("{name} must be in [0, 1], got {value}")));
    }
    Ok(())
}

impl SsisConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> SsisResult<()> {
        check_unit("support_threshold", self.support_threshold)?;
        check_unit("polarity_overlap_threshold", self.polarity_overlap_threshold)?;
        check_unit("violation_threshold", self.violation_threshold)?;

        let w = &self.severity_weights;
        check_unit("severity_weights.low", w.low)?;
        check_unit("severity_weights.medium", w.medium)?;
        check_unit("severity_weights.high", w.high)?;
        if !(w.low <= w.medium && w.medium <= w.high) {
            return Err(SsisError::Config(format!(
                "severity weights must satisfy low <= medium <= high, got {} / {} / {}",
                w.low, w.medium, w.high
            )));
        }

        if !(0.0..=0.5).contains(&self.min_half_width) {
            return Err(SsisError::Config(format!(
                "min_half_width must be in [0, 0.5], got {}",
                self.min_half_width
            )));
        }
        if !self.interval_scale.is_finite() || self.interval_scale < 0.0 {
            return Err(SsisError::Config(format!(
                "interval_scale must be finite and >= 0, got {}",
                self.interval_scale
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> SsisResult<Self> {
        serde_json::from_str(json).map_err(|e| SsisError::Config(format!("JSON parse error: {e}")))
    }

    /// Copy of this config with a different compliance cut-off.
    pub fn with_violation_threshold(mut self, violation_threshold: f64) -> Self {
        self.violation_threshold = violation_threshold;
        self
    }
}
