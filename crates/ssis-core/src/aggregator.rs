// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Aggregator
// ─────────────────────────────────────────────────────────────────────
//! Reduces the (axiom × proposition) score matrix to a verdict.
//!
//! Per axiom, the best similarity decides support and any polarity
//! conflict decides contradiction:
//!
//! 1. `best < support_threshold` → `no_support`, severity from the
//!    weight-scaled shortfall.
//! 2. otherwise any conflicting pair → `contradiction`, always high.
//! 3. otherwise satisfied.
//!
//! The compliance score is `1 - Σ(weight × multiplier) / Σ weight` over
//! violated axioms, so it can only fall as violations grow in number or
//! severity. Iteration follows axiom order, keeping output reproducible.

use ssis_types::score::clamp_score;
use ssis_types::{
    ConfidenceInterval, Evidence, MatchScore, Severity, SsisConfig, Violation, ViolationReason,
};

use crate::axiom::Axiom;
use crate::extractor::Proposition;

/// Pressure at or above which a missing axiom is a high-severity gap.
pub const HIGH_PRESSURE: f64 = 2.0 / 3.0;
/// Pressure at or above which a missing axiom is a medium-severity gap.
pub const MEDIUM_PRESSURE: f64 = 1.0 / 3.0;

/// Reduced outcome before recommendations are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub compliance_score: f64,
    pub violations: Vec<Violation>,
    pub confidence_interval: ConfidenceInterval,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    config: SsisConfig,
}

impl Aggregator {
    pub fn new(config: SsisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SsisConfig {
        &self.config
    }

    /// Severity of an unsupported axiom.
    pub fn no_support_severity(&self, weight: f64, best_similarity: f64) -> Severity {
        let threshold = self.config.support_threshold;
        if threshold <= 0.0 {
            return Severity::Low;
        }
        let shortfall = ((threshold - best_similarity) / threshold).clamp(0.0, 1.0);
        let pressure = weight * shortfall;
        if pressure >= HIGH_PRESSURE {
            Severity::High
        } else if pressure >= MEDIUM_PRESSURE {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Judge a single axiom from its row of match scores.
    pub fn judge(
        &self,
        axiom: &Axiom,
        row: &[MatchScore],
        propositions: &[Proposition],
    ) -> Option<Violation> {
        // First maximum wins on ties, so evidence is stable.
        let best = row.iter().fold(None::<&MatchScore>, |acc, s| match acc {
            Some(b) if b.similarity >= s.similarity => Some(b),
            _ => Some(s),
        });
        let best_similarity = best.map_or(0.0, |s| s.similarity);

        let evidence_for = |score: &MatchScore| {
            propositions
                .get(score.proposition_index)
                .map(|p| Evidence {
                    proposition_index: p.index,
                    text: p.text.clone(),
                })
        };

        let (reason, severity, evidence) = if best_similarity < self.config.support_threshold {
            let evidence = best.filter(|s| s.similarity > 0.0).and_then(evidence_for);
            (
                ViolationReason::NoSupport,
                self.no_support_severity(axiom.weight(), best_similarity),
                evidence,
            )
        } else {
            let conflict = row
                .iter()
                .filter(|s| s.polarity_conflict)
                .fold(None::<&MatchScore>, |acc, s| match acc {
                    Some(b) if b.similarity >= s.similarity => Some(b),
                    _ => Some(s),
                })?;
            (
                ViolationReason::Contradiction,
                Severity::High,
                evidence_for(conflict),
            )
        };

        Some(Violation {
            axiom_id: axiom.id().to_string(),
            axiom_text: axiom.text().to_string(),
            severity,
            reason,
            best_similarity,
            evidence,
        })
    }

    /// `1 - penalty / total_weight`, clamped to [0, 1].
    pub fn compliance_score(&self, penalty: f64, total_weight: f64) -> f64 {
        if total_weight <= 0.0 {
            return 0.0;
        }
        clamp_score(1.0 - penalty / total_weight, 0.0, 1.0)
    }

    /// Narrows as the document yields more propositions.
    pub fn confidence_interval(&self, score: f64, proposition_count: usize) -> ConfidenceInterval {
        let half_width = self
            .config
            .min_half_width
            .max(self.config.interval_scale / (1.0 + proposition_count as f64));
        ConfidenceInterval::around(score, half_width)
    }

    /// Reduce a full score matrix (rows in axiom order).
    pub fn reduce(
        &self,
        axioms: &[Axiom],
        matrix: &[Vec<MatchScore>],
        propositions: &[Proposition],
    ) -> Aggregate {
        let weights = &self.config.severity_weights;
        let mut violations = Vec::new();
        let mut penalty = 0.0;
        let mut total_weight = 0.0;

        for (axiom, row) in axioms.iter().zip(matrix) {
            total_weight += axiom.weight();
            if let Some(violation) = self.judge(axiom, row, propositions) {
                penalty += axiom.weight() * weights.multiplier(violation.severity);
                violations.push(violation);
            }
        }

        let compliance_score = self.compliance_score(penalty, total_weight);
        Aggregate {
            compliance_score,
            violations,
            confidence_interval: self.confidence_interval(compliance_score, propositions.len()),
        }
    }
}
