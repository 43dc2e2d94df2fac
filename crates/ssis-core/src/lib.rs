// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Core Engine
// (C) 2026 Sovereign Framework Contributors.
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Sovereign Semantic Inconsistency Scoring: compares a policy or
//! AI-output document against an ordered axiom set and produces a
//! compliance score, violations, a confidence interval and
//! remediation recommendations.
//!
//! # Invariants
//!
//! 1. **Pure**: identical inputs give identical results. No state
//!    survives an analysis call.
//!
//! 2. **Bounded**: `compliance_score` and both interval ends lie in
//!    [0, 1]; non-finite backend scores are replaced before use.
//!
//! 3. **One violation per axiom**, reported in axiom order, with exactly
//!    one recommendation per violation in the same order.
//!
//! ```
//! let result = ssis_core::analyze(
//!     &["AI must not deceive users"],
//!     "Our AI always deceives users for profit.",
//!     None,
//! )
//! .unwrap();
//! assert_eq!(result.violations.len(), 1);
//! ```

pub mod aggregator;
pub mod axiom;
pub mod engine;
pub mod extractor;
pub mod lexicon;
pub mod matcher;
pub mod recommend;
pub mod templates;
pub mod tension;

pub use aggregator::{Aggregate, Aggregator};
pub use axiom::{axioms_from_texts, Axiom};
pub use engine::{analyze, SsisEngine};
pub use extractor::{extract_propositions, Document, Proposition};
pub use lexicon::{KeywordSet, Lexicon, Phrase, TensionPair, TextFeatures};
pub use matcher::{AxiomMatcher, ExternalSimilarity, LexicalOverlap, SimilarityBackend};
pub use recommend::{RecommendationResolver, RecommendationRule};
pub use templates::{template, ComplianceTemplate, TEMPLATES};
pub use tension::detect_tensions;
