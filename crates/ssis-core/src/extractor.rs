// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Proposition Extractor
// ─────────────────────────────────────────────────────────────────────
//! Splits a document into sentence-like propositions.
//!
//! Extraction is a pure function of the document text: running it twice
//! on the same input yields the same sequence.

use serde::{Deserialize, Serialize};

use ssis_types::Polarity;

use crate::lexicon::{KeywordSet, Lexicon};

/// Characters that end a proposition.
pub const TERMINATORS: &[char] = &['.', '!', '?', '\n'];

/// Raw input text plus opaque metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub source_id: Option<String>,
    pub timestamp: Option<String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// An atomic claim extracted from a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposition {
    pub index: usize,
    pub text: String,
    pub keywords: KeywordSet,
    pub polarity: Polarity,
}

/// Split `text` into propositions using the given lexicon.
pub fn extract_propositions(text: &str, lexicon: &Lexicon) -> Vec<Proposition> {
    text.split(TERMINATORS)
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .enumerate()
        .map(|(index, unit)| {
            let features = lexicon.features(unit);
            Proposition {
                index,
                text: unit.to_string(),
                keywords: features.keywords,
                polarity: features.polarity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(props: &[Proposition]) -> Vec<&str> {
        props.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_splits_on_terminators() {
        let props = extract_propositions(
            "We protect privacy. We never sell data! Do we track users?\nConsent first",
            Lexicon::standard(),
        );
        assert_eq!(
            texts(&props),
            vec![
                "We protect privacy",
                "We never sell data",
                "Do we track users",
                "Consent first"
            ]
        );
        assert_eq!(props[1].polarity, Polarity::Negative);
        assert_eq!(props[0].polarity, Polarity::Affirmative);
    }

    #[test]
    fn test_indices_are_dense() {
        let props = extract_propositions("One claim...\n\n  \nTwo claims.", Lexicon::standard());
        let indices: Vec<usize> = props.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_propositions("", Lexicon::standard()).is_empty());
        assert!(extract_propositions(" \n . ! ? ", Lexicon::standard()).is_empty());
    }

    #[test]
    fn test_restartable() {
        let text = "Data is encrypted. Users may delete accounts.";
        let a = extract_propositions(text, Lexicon::standard());
        let b = extract_propositions(text, Lexicon::standard());
        assert_eq!(a, b);
    }

    #[test]
    fn test_document_metadata_builder() {
        let doc = Document::new("text")
            .with_source_id("policy-7")
            .with_timestamp("2026-01-01T00:00:00Z");
        assert_eq!(doc.source_id.as_deref(), Some("policy-7"));
        assert_eq!(doc.timestamp.as_deref(), Some("2026-01-01T00:00:00Z"));
    }
}
