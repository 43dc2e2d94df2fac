// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Axiom Model
// ─────────────────────────────────────────────────────────────────────
//! Normative statements and their derived matching features.

use serde::Serialize;

use ssis_types::{Polarity, SsisError, SsisResult};

use crate::lexicon::{KeywordSet, Lexicon};

/// An immutable normative statement used as a comparison baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axiom {
    id: String,
    text: String,
    keywords: KeywordSet,
    polarity: Polarity,
    weight: f64,
}

impl Axiom {
    /// Build an axiom with the standard lexicon and weight 1.0.
    pub fn new(id: impl Into<String>, text: &str) -> SsisResult<Self> {
        Self::with_lexicon(id, text, Lexicon::standard())
    }

    pub fn with_lexicon(id: impl Into<String>, text: &str, lexicon: &Lexicon) -> SsisResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SsisError::InvalidAxiom {
                index: 0,
                reason: "text is empty after trimming".into(),
            });
        }
        let features = lexicon.features(trimmed);
        Ok(Self {
            id: id.into(),
            text: trimmed.to_string(),
            keywords: features.keywords,
            polarity: features.polarity,
            weight: 1.0,
        })
    }

    /// Same axiom with a different weight. Weight must be finite and > 0.
    pub fn with_weight(mut self, weight: f64) -> SsisResult<Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(SsisError::InvalidAxiom {
                index: 0,
                reason: format!("weight must be finite and > 0, got {weight}"),
            });
        }
        self.weight = weight;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Build `A1, A2, ...` axioms from plain texts, reporting the failing
/// position on error.
pub fn axioms_from_texts<S: AsRef<str>>(texts: &[S], lexicon: &Lexicon) -> SsisResult<Vec<Axiom>> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            Axiom::with_lexicon(format!("A{}", index + 1), text.as_ref(), lexicon)
                .map_err(|e| at_position(e, index))
        })
        .collect()
}

pub(crate) fn at_position(err: SsisError, index: usize) -> SsisError {
    match err {
        SsisError::InvalidAxiom { reason, .. } => SsisError::InvalidAxiom { index, reason },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_features() {
        let axiom = Axiom::new("A1", "  AI must not deceive users ").unwrap();
        assert_eq!(axiom.text(), "AI must not deceive users");
        assert_eq!(axiom.polarity(), Polarity::Negative);
        assert!(axiom.keywords().contains("deceive"));
        assert!(axiom.keywords().contains("user"));
        assert_eq!(axiom.weight(), 1.0);
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = Axiom::new("A1", " \n\t ").unwrap_err();
        assert!(matches!(err, SsisError::InvalidAxiom { .. }));
    }

    #[test]
    fn test_weight_validation() {
        let axiom = Axiom::new("A1", "Must protect privacy").unwrap();
        assert_eq!(axiom.clone().with_weight(2.5).unwrap().weight(), 2.5);
        assert!(axiom.clone().with_weight(0.0).is_err());
        assert!(axiom.clone().with_weight(-1.0).is_err());
        assert!(axiom.with_weight(f64::NAN).is_err());
    }

    #[test]
    fn test_ids_follow_input_order() {
        let axioms =
            axioms_from_texts(&["Must protect privacy", "Must not harm"], Lexicon::standard())
                .unwrap();
        let ids: Vec<&str> = axioms.iter().map(Axiom::id).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
    }

    #[test]
    fn test_error_reports_position() {
        let err = axioms_from_texts(&["Must protect privacy", "", "x"], Lexicon::standard())
            .unwrap_err();
        assert!(matches!(err, SsisError::InvalidAxiom { index: 1, .. }));
    }
}
