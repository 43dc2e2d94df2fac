// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Recommendation Resolver
// ─────────────────────────────────────────────────────────────────────
//! Maps violations to remediation text through a rule table keyed by
//! `(reason, severity)`. Extend it by adding rows, not types.

use ssis_types::{Severity, Tension, Violation, ViolationReason};

/// Placeholder replaced by the axiom text.
pub const AXIOM_PLACEHOLDER: &str = "{axiom}";

const FALLBACK: &str = "Review policy against axiom: {axiom}";

const DEFAULT_RULES: &[(ViolationReason, Option<Severity>, &str)] = &[
    (
        ViolationReason::Contradiction,
        None,
        "Revise policy to remove explicit contradiction of axiom: {axiom}",
    ),
    (
        ViolationReason::NoSupport,
        Some(Severity::High),
        "Add an explicit commitment to: {axiom}",
    ),
    (
        ViolationReason::NoSupport,
        Some(Severity::Medium),
        "Add explicit language addressing: {axiom}",
    ),
    (
        ViolationReason::NoSupport,
        Some(Severity::Low),
        "Strengthen existing language supporting: {axiom}",
    ),
];

const BALANCING_ADVISORY: &str = "Add balancing language or constraints for ";

const REVIEW_ADVISORIES: &[&str] = &[
    "Consider comprehensive policy review with ethics committee",
    "Implement ongoing SSIS monitoring for all AI deployments",
];

/// One row of the table. `severity: None` matches any severity.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRule {
    pub reason: ViolationReason,
    pub severity: Option<Severity>,
    pub template: String,
}

impl RecommendationRule {
    fn matches(&self, violation: &Violation) -> bool {
        self.reason == violation.reason
            && self.severity.map_or(true, |s| s == violation.severity)
    }
}

/// Stateless rule table; first matching row wins.
#[derive(Debug, Clone)]
pub struct RecommendationResolver {
    rules: Vec<RecommendationRule>,
}

impl Default for RecommendationResolver {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(reason, severity, template)| RecommendationRule {
                    reason: *reason,
                    severity: *severity,
                    template: template.to_string(),
                })
                .collect(),
        }
    }
}

impl RecommendationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row ahead of the existing ones, so it takes precedence.
    pub fn with_rule(
        mut self,
        reason: ViolationReason,
        severity: Option<Severity>,
        template: impl Into<String>,
    ) -> Self {
        self.rules.insert(
            0,
            RecommendationRule {
                reason,
                severity,
                template: template.into(),
            },
        );
        self
    }

    pub fn rules(&self) -> &[RecommendationRule] {
        &self.rules
    }

    pub fn resolve(&self, violation: &Violation) -> String {
        let template = self
            .rules
            .iter()
            .find(|rule| rule.matches(violation))
            .map_or(FALLBACK, |rule| rule.template.as_str());
        template.replace(AXIOM_PLACEHOLDER, &violation.axiom_text)
    }

    /// One recommendation per violation, in the same order.
    pub fn resolve_all(&self, violations: &[Violation]) -> Vec<String> {
        violations.iter().map(|v| self.resolve(v)).collect()
    }

    /// Document-level advice: one balancing note per strained value, then
    /// the review notes once more than half the axioms are violated.
    pub fn advisories(
        &self,
        violation_count: usize,
        axiom_count: usize,
        tensions: &[Tension],
    ) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tension in tensions {
            let advisory = format!("{BALANCING_ADVISORY}{}", tension.value);
            if !out.contains(&advisory) {
                out.push(advisory);
            }
        }
        if violation_count * 2 > axiom_count {
            out.extend(REVIEW_ADVISORIES.iter().map(|s| s.to_string()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssis_types::Evidence;

    fn violation(reason: ViolationReason, severity: Severity) -> Violation {
        Violation {
            axiom_id: "A1".into(),
            axiom_text: "AI must not deceive users".into(),
            severity,
            reason,
            best_similarity: 0.0,
            evidence: None,
        }
    }

    #[test]
    fn test_contradiction_text() {
        let r = RecommendationResolver::new()
            .resolve(&violation(ViolationReason::Contradiction, Severity::High));
        assert_eq!(
            r,
            "Revise policy to remove explicit contradiction of axiom: AI must not deceive users"
        );
    }

    #[test]
    fn test_no_support_by_severity() {
        let resolver = RecommendationResolver::new();
        assert_eq!(
            resolver.resolve(&violation(ViolationReason::NoSupport, Severity::Medium)),
            "Add explicit language addressing: AI must not deceive users"
        );
        assert!(resolver
            .resolve(&violation(ViolationReason::NoSupport, Severity::High))
            .starts_with("Add an explicit commitment to:"));
        assert!(resolver
            .resolve(&violation(ViolationReason::NoSupport, Severity::Low))
            .starts_with("Strengthen existing language"));
    }

    #[test]
    fn test_custom_rule_takes_precedence() {
        let resolver = RecommendationResolver::new().with_rule(
            ViolationReason::NoSupport,
            Some(Severity::High),
            "Escalate to compliance: {axiom}",
        );
        assert_eq!(
            resolver.resolve(&violation(ViolationReason::NoSupport, Severity::High)),
            "Escalate to compliance: AI must not deceive users"
        );
        assert_eq!(resolver.rules().len(), DEFAULT_RULES.len() + 1);
    }

    #[test]
    fn test_order_preserved() {
        let vs = vec![
            violation(ViolationReason::NoSupport, Severity::Low),
            violation(ViolationReason::Contradiction, Severity::High),
        ];
        let recs = RecommendationResolver::new().resolve_all(&vs);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Strengthen"));
        assert!(recs[1].starts_with("Revise"));
    }

    fn tension(axiom_id: &str, value: &str) -> Tension {
        Tension {
            axiom_id: axiom_id.into(),
            pressure: "efficiency".into(),
            value: value.into(),
            evidence: Evidence {
                proposition_index: 0,
                text: "Maximise efficiency".into(),
            },
        }
    }

    #[test]
    fn test_advisories_threshold() {
        let resolver = RecommendationResolver::new();
        assert!(resolver.advisories(2, 4, &[]).is_empty());
        assert_eq!(resolver.advisories(3, 4, &[]).len(), 2);
        assert_eq!(resolver.advisories(1, 1, &[]).len(), 2);
    }

    #[test]
    fn test_balancing_advisories_deduplicated() {
        let tensions = [
            tension("A1", "accurate"),
            tension("A2", "accurate"),
            tension("A3", "reliability"),
        ];
        let advisories = RecommendationResolver::new().advisories(3, 3, &tensions);
        assert_eq!(
            advisories,
            vec![
                "Add balancing language or constraints for accurate",
                "Add balancing language or constraints for reliability",
                "Consider comprehensive policy review with ethics committee",
                "Implement ongoing SSIS monitoring for all AI deployments",
            ]
        );
    }
}
