// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Axiom Matcher
// ─────────────────────────────────────────────────────────────────────
//! Scores every (axiom, proposition) pair.
//!
//! Two signals per pair:
//! - **Similarity** from a pluggable [`SimilarityBackend`]. The default
//!   [`LexicalOverlap`] is the Jaccard index of the keyword sets.
//! - **Polarity conflict**: the pair clearly shares a subject
//!   (similarity above the overlap threshold) yet the stances differ.
//!
//! Pairs are independent, so rows are computed in parallel. Row order
//! always follows the axiom order.

use std::sync::Arc;

use rayon::prelude::*;

use ssis_types::MatchScore;

use crate::axiom::Axiom;
use crate::extractor::Proposition;
use crate::lexicon::KeywordSet;

/// Trait for similarity backends.
///
/// Returns similarity in [0, 1]:
/// - 0.0 = unrelated
/// - 1.0 = same subject matter
pub trait SimilarityBackend: Send + Sync {
    fn similarity(&self, axiom: &Axiom, proposition: &Proposition) -> f64;
}

/// Jaccard overlap of normalised keyword sets.
pub struct LexicalOverlap;

impl SimilarityBackend for LexicalOverlap {
    fn similarity(&self, axiom: &Axiom, proposition: &Proposition) -> f64 {
        jaccard(axiom.keywords(), &proposition.keywords)
    }
}

/// `|a ∩ b| / |a ∪ b|`, or 0.0 when both are empty.
pub fn jaccard(a: &KeywordSet, b: &KeywordSet) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// External similarity backend that calls a scoring closure on the raw
/// axiom and proposition texts.
///
/// Lets callers plug in embedding-based scoring without the engine
/// depending on a model.
type SimilarityFn = Box<dyn Fn(&str, &str) -> f64 + Send + Sync>;

pub struct ExternalSimilarity {
    score_fn: SimilarityFn,
}

impl ExternalSimilarity {
    pub fn new(score_fn: impl Fn(&str, &str) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            score_fn: Box::new(score_fn),
        }
    }
}

impl SimilarityBackend for ExternalSimilarity {
    fn similarity(&self, axiom: &Axiom, proposition: &Proposition) -> f64 {
        (self.score_fn)(axiom.text(), &proposition.text)
    }
}

/// Pairs every axiom with every proposition.
#[derive(Clone)]
pub struct AxiomMatcher {
    backend: Arc<dyn SimilarityBackend>,
    polarity_overlap_threshold: f64,
}

impl AxiomMatcher {
    pub fn new(backend: Arc<dyn SimilarityBackend>, polarity_overlap_threshold: f64) -> Self {
        Self {
            backend,
            polarity_overlap_threshold,
        }
    }

    pub fn lexical(polarity_overlap_threshold: f64) -> Self {
        Self::new(Arc::new(LexicalOverlap), polarity_overlap_threshold)
    }

    /// Score one pair.
    pub fn score(&self, axiom: &Axiom, proposition: &Proposition) -> MatchScore {
        let raw = self.backend.similarity(axiom, proposition);
        let similarity = if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            log::warn!(
                "similarity backend returned non-finite score for axiom {}, defaulting to 0.0",
                axiom.id()
            );
            0.0
        };
        MatchScore {
            axiom_id: axiom.id().to_string(),
            proposition_index: proposition.index,
            similarity,
            polarity_conflict: similarity > self.polarity_overlap_threshold
                && axiom.polarity() != proposition.polarity,
        }
    }

    /// One row per axiom (in axiom order), one entry per proposition.
    pub fn score_matrix(
        &self,
        axioms: &[Axiom],
        propositions: &[Proposition],
    ) -> Vec<Vec<MatchScore>> {
        axioms
            .par_iter()
            .map(|axiom| propositions.iter().map(|p| self.score(axiom, p)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_propositions;
    use crate::lexicon::Lexicon;

    fn props(text: &str) -> Vec<Proposition> {
        extract_propositions(text, Lexicon::standard())
    }

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["b", "c"])), 1.0 / 3.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&["a"])), 1.0);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&[])), 0.0);
    }

    #[test]
    fn test_contradiction_flagged() {
        let axiom = Axiom::new("A1", "AI must not deceive users").unwrap();
        let p = props("Our AI always deceives users for profit.");
        let score = AxiomMatcher::lexical(0.2).score(&axiom, &p[0]);
        assert!((score.similarity - 2.0 / 3.0).abs() < 1e-12);
        assert!(score.polarity_conflict);
        assert_eq!(score.axiom_id, "A1");
        assert_eq!(score.proposition_index, 0);
    }

    #[test]
    fn test_same_polarity_no_conflict() {
        let axiom = Axiom::new("A1", "AI must not deceive users").unwrap();
        let p = props("We never deceive users.");
        let score = AxiomMatcher::lexical(0.2).score(&axiom, &p[0]);
        assert_eq!(score.similarity, 1.0);
        assert!(!score.polarity_conflict);
    }

    #[test]
    fn test_weak_overlap_no_conflict() {
        // Shares one keyword out of nine: below the overlap threshold.
        let axiom = Axiom::new("A1", "Must not transfer data to unsafe jurisdictions").unwrap();
        let p = props("Analytics dashboards display aggregated data trends.");
        let score = AxiomMatcher::lexical(0.2).score(&axiom, &p[0]);
        assert!(score.similarity > 0.0 && score.similarity <= 0.2);
        assert!(!score.polarity_conflict);
    }

    #[test]
    fn test_overlap_at_threshold_no_conflict() {
        // One shared keyword out of five: exactly 0.2.
        let axiom = Axiom::new("A1", "Never track").unwrap();
        let p = props("We track clicks, scrolls, purchases, locations.");
        assert_eq!(p[0].keywords.len(), 5);
        let score = AxiomMatcher::lexical(0.2).score(&axiom, &p[0]);
        assert_eq!(score.similarity, 0.2);
        assert_ne!(axiom.polarity(), p[0].polarity);
        assert!(!score.polarity_conflict);
    }

    #[test]
    fn test_external_backend_nan_is_zero() {
        let matcher = AxiomMatcher::new(Arc::new(ExternalSimilarity::new(|_, _| f64::NAN)), 0.2);
        let axiom = Axiom::new("A1", "Must protect privacy").unwrap();
        let p = props("Privacy matters.");
        assert_eq!(matcher.score(&axiom, &p[0]).similarity, 0.0);
    }

    #[test]
    fn test_external_backend_clamped() {
        let matcher = AxiomMatcher::new(Arc::new(ExternalSimilarity::new(|_, _| 1.7)), 0.2);
        let axiom = Axiom::new("A1", "Must protect privacy").unwrap();
        let p = props("We never protect privacy.");
        let score = matcher.score(&axiom, &p[0]);
        assert_eq!(score.similarity, 1.0);
        assert!(score.polarity_conflict);
    }

    #[test]
    fn test_matrix_shape_and_order() {
        let axioms = vec![
            Axiom::new("A1", "Must protect privacy").unwrap(),
            Axiom::new("A2", "Must not harm users").unwrap(),
        ];
        let p = props("We protect privacy. Users are never harmed. Data is kept.");
        let matrix = AxiomMatcher::lexical(0.2).score_matrix(&axioms, &p);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.iter().all(|row| row.len() == 3));
        assert!(matrix[0].iter().all(|s| s.axiom_id == "A1"));
        assert!(matrix[1].iter().all(|s| s.axiom_id == "A2"));
        assert_eq!(matrix[0][0].similarity, 1.0);
    }
}
