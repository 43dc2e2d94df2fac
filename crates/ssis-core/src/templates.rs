// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — Built-in Compliance Templates
// ─────────────────────────────────────────────────────────────────────
//! Named axiom sets offered by the dashboard.

use serde::Serialize;

use ssis_types::{SsisConfig, SsisError, SsisResult};

/// A named axiom set with its own compliance cut-off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub axioms: &'static [&'static str],
    pub violation_threshold: f64,
}

impl ComplianceTemplate {
    /// Default config with this template's violation threshold.
    pub fn config(&self) -> SsisConfig {
        SsisConfig::default().with_violation_threshold(self.violation_threshold)
    }
}

pub const TEMPLATES: &[ComplianceTemplate] = &[
    ComplianceTemplate {
        key: "healthcare",
        name: "Healthcare AI Ethics",
        axioms: &[
            "AI must prioritize patient well-being above all else",
            "AI must not discriminate based on protected characteristics",
            "AI must maintain strict patient confidentiality",
            "AI must provide accurate medical information",
        ],
        violation_threshold: 0.3,
    },
    ComplianceTemplate {
        key: "gdpr",
        name: "GDPR Data Protection",
        axioms: &[
            "Must obtain explicit user consent for data processing",
            "Must allow users to delete their data upon request",
            "Must not transfer data to unsafe jurisdictions",
            "Must implement data protection by design",
        ],
        violation_threshold: 0.2,
    },
    ComplianceTemplate {
        key: "finance",
        name: "Financial Services Ethics",
        axioms: &[
            "AI must not engage in market manipulation",
            "AI must treat all customers fairly without discrimination",
            "AI must maintain financial system integrity",
            "AI must provide transparent explanations for decisions",
        ],
        violation_threshold: 0.25,
    },
];

/// Look up a template by key (case-insensitive).
pub fn template(key: &str) -> SsisResult<&'static ComplianceTemplate> {
    TEMPLATES
        .iter()
        .find(|t| t.key.eq_ignore_ascii_case(key.trim()))
        .ok_or_else(|| SsisError::UnknownTemplate(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let t = template("GDPR").unwrap();
        assert_eq!(t.name, "GDPR Data Protection");
        assert_eq!(t.axioms.len(), 4);
        assert_eq!(t.config().violation_threshold, 0.2);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            template("aviation").unwrap_err(),
            SsisError::UnknownTemplate("aviation".into())
        );
    }

    #[test]
    fn test_template_configs_valid() {
        for t in TEMPLATES {
            assert!(t.config().validate().is_ok(), "{}", t.key);
            assert!(t.axioms.iter().all(|a| !a.trim().is_empty()));
        }
    }
}
