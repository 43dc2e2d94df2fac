// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Score and Result Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Stance of a statement: does it assert or deny its subject?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Affirmative,
    Negative,
}

/// Violation severity, ordered from mildest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an axiom was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    /// No proposition overlaps the axiom enough to count as support.
    NoSupport,
    /// A proposition on the same subject takes the opposite stance.
    Contradiction,
}

impl ViolationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationReason::NoSupport => "no_support",
            ViolationReason::Contradiction => "contradiction",
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score of one (axiom, proposition) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub axiom_id: String,
    pub proposition_index: usize,
    /// Similarity in [0, 1].
    pub similarity: f64,
    /// Same subject, opposite stance.
    pub polarity_conflict: bool,
}

/// The proposition a violation points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub proposition_index: usize,
    pub text: String,
}

/// A business pressure in the document that strains a value an axiom
/// protects. Advisory only; tensions never move the compliance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tension {
    pub axiom_id: String,
    pub pressure: String,
    pub value: String,
    /// First proposition carrying the pressure.
    pub evidence: Evidence,
}

impl Tension {
    pub fn message(&self) -> String {
        format!(
            "Policy emphasizes {} which may conflict with {}",
            self.pressure, self.value
        )
    }
}

/// One flagged axiom. At most one per axiom per analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub axiom_id: String,
    pub axiom_text: String,
    pub severity: Severity,
    pub reason: ViolationReason,
    pub best_similarity: f64,
    /// Contradicting proposition, or the closest one for weak support.
    pub evidence: Option<Evidence>,
}

/// Bounds on the compliance score, both within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    /// Interval of `half_width` around `center`, clamped to [0, 1].
    pub fn around(center: f64, half_width: f64) -> Self {
        Self {
            low: clamp_score(center - half_width, 0.0, 1.0),
            high: clamp_score(center + half_width, 0.0, 1.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

/// Coarse risk bucket over the divergence `1 - compliance_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_divergence(divergence: f64) -> Self {
        if divergence < 0.1 {
            RiskLevel::Low
        } else if divergence < 0.3 {
            RiskLevel::Moderate
        } else if divergence < 0.5 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full outcome of analysing one document against one axiom set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 1.0 = every axiom upheld, 0.0 = every axiom violated at full severity.
    pub compliance_score: f64,
    /// In axiom order.
    pub violations: Vec<Violation>,
    pub confidence_interval: ConfidenceInterval,
    /// One per violation, same order.
    pub recommendations: Vec<String>,
    /// Document-level suggestions not tied to a single violation.
    pub advisories: Vec<String>,
    /// In axiom order.
    pub tensions: Vec<Tension>,
    pub axioms_checked: usize,
    pub proposition_count: usize,
    pub risk_level: RiskLevel,
    pub is_compliant: bool,
    pub document_preview: String,
    pub source_id: Option<String>,
    pub timestamp: Option<String>,
    /// Display name of the built-in template, when one was used.
    pub template: Option<String>,
}

impl AnalysisResult {
    /// `1 - compliance_score`.
    pub fn divergence(&self) -> f64 {
        1.0 - self.compliance_score
    }

    pub fn violation_for(&self, axiom_id: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.axiom_id == axiom_id)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tension_message() {
        let tension = Tension {
            axiom_id: "A1".into(),
            pressure: "reduce costs".into(),
            value: "well-being".into(),
            evidence: Evidence {
                proposition_index: 0,
                text: "Reduce costs".into(),
            },
        };
        assert_eq!(
            tension.message(),
            "Policy emphasizes reduce costs which may conflict with well-being"
        );
    }

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_score(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_pos_inf() {
        assert_eq!(clamp_score(f64::INFINITY, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_clamp_neg_inf() {
        assert_eq!(clamp_score(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_normal() {
        assert_eq!(clamp_score(0.75, 0.0, 1.0), 0.75);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn test_interval_clamped_at_edges() {
        let ci = ConfidenceInterval::around(0.02, 0.25);
        assert_eq!(ci.low, 0.0);
        assert!((ci.high - 0.27).abs() < 1e-12);

        let ci = ConfidenceInterval::around(0.95, 0.25);
        assert_eq!(ci.high, 1.0);
        assert!(ci.contains(0.95));
    }

    #[test]
    fn test_risk_buckets() {
        assert_eq!(RiskLevel::from_divergence(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_divergence(0.2), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_divergence(0.4), RiskLevel::High);
        assert_eq!(RiskLevel::from_divergence(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ViolationReason::NoSupport).unwrap(),
            "\"no_support\""
        );
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Critical).unwrap(),
            "\"CRITICAL\""
        );
        assert_eq!(
            serde_json::to_string(&Polarity::Negative).unwrap(),
            "\"negative\""
        );
    }
}
