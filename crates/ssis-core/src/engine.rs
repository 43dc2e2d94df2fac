// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Engine Entry Point
// ─────────────────────────────────────────────────────────────────────
//! Wires extraction, matching, aggregation and recommendations behind a
//! single `analyze` call.
//!
//! The engine holds configuration only. Nothing about a previous
//! analysis survives the call, so one `SsisEngine` can be shared across
//! threads behind an `Arc`.

use std::collections::HashSet;
use std::sync::Arc;

use ssis_types::{AnalysisResult, RiskLevel, SsisConfig, SsisError, SsisResult};

use crate::aggregator::Aggregator;
use crate::axiom::{axioms_from_texts, Axiom};
use crate::extractor::{extract_propositions, Document};
use crate::lexicon::Lexicon;
use crate::matcher::{AxiomMatcher, SimilarityBackend};
use crate::recommend::RecommendationResolver;
use crate::templates::template;
use crate::tension::detect_tensions;

/// Characters of document text echoed back in the result.
pub const PREVIEW_CHARS: usize = 200;

/// Stateless SSIS analysis engine.
#[derive(Clone)]
pub struct SsisEngine {
    config: SsisConfig,
    lexicon: Arc<Lexicon>,
    matcher: AxiomMatcher,
    aggregator: Aggregator,
    resolver: RecommendationResolver,
}

impl SsisEngine {
    /// Engine with the lexical backend and standard lexicon.
    pub fn new(config: SsisConfig) -> SsisResult<Self> {
        config.validate()?;
        Ok(Self {
            matcher: AxiomMatcher::lexical(config.polarity_overlap_threshold),
            aggregator: Aggregator::new(config.clone()),
            lexicon: Lexicon::shared(),
            resolver: RecommendationResolver::default(),
            config,
        })
    }

    /// Swap the similarity backend (e.g. an embedding scorer).
    pub fn with_backend(mut self, backend: Arc<dyn SimilarityBackend>) -> Self {
        self.matcher = AxiomMatcher::new(backend, self.config.polarity_overlap_threshold);
        self
    }

    /// Lexicon used for documents and for axioms built from text.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Arc::new(lexicon);
        self
    }

    /// Recommendation table, e.g. the default one with extra rows.
    pub fn with_resolver(mut self, resolver: RecommendationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &SsisConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Analyse `document` against pre-built axioms.
    pub fn analyze(&self, axioms: &[Axiom], document: &Document) -> SsisResult<AnalysisResult> {
        self.run(axioms, document, self.config.violation_threshold)
    }

    /// Analyse against plain axiom texts, numbered `A1, A2, ...`.
    pub fn analyze_texts<S: AsRef<str>>(
        &self,
        axioms: &[S],
        document: &Document,
    ) -> SsisResult<AnalysisResult> {
        if axioms.is_empty() {
            return Err(SsisError::EmptyAxiomSet);
        }
        let axioms = axioms_from_texts(axioms, &self.lexicon)?;
        self.analyze(&axioms, document)
    }

    /// Analyse against a built-in template, using its violation threshold.
    pub fn analyze_template(&self, key: &str, document: &Document) -> SsisResult<AnalysisResult> {
        let template = template(key)?;
        let axioms = axioms_from_texts(template.axioms, &self.lexicon)?;
        log::debug!("analyzing against template {}", template.key);
        let mut result = self.run(&axioms, document, template.violation_threshold)?;
        result.template = Some(template.name.to_string());
        Ok(result)
    }

    fn run(
        &self,
        axioms: &[Axiom],
        document: &Document,
        violation_threshold: f64,
    ) -> SsisResult<AnalysisResult> {
        if axioms.is_empty() {
            return Err(SsisError::EmptyAxiomSet);
        }
        let mut seen = HashSet::with_capacity(axioms.len());
        for (index, axiom) in axioms.iter().enumerate() {
            if !seen.insert(axiom.id()) {
                return Err(SsisError::InvalidAxiom {
                    index,
                    reason: format!("duplicate axiom id {}", axiom.id()),
                });
            }
        }

        let propositions = extract_propositions(&document.text, &self.lexicon);
        log::debug!(
            "SSIS analysis: {} axioms x {} propositions",
            axioms.len(),
            propositions.len()
        );

        let matrix = self.matcher.score_matrix(axioms, &propositions);
        let aggregate = self.aggregator.reduce(axioms, &matrix, &propositions);

        let tensions = detect_tensions(axioms, &propositions, &self.lexicon);
        let recommendations = self.resolver.resolve_all(&aggregate.violations);
        let advisories = self
            .resolver
            .advisories(aggregate.violations.len(), axioms.len(), &tensions);

        let mut result = AnalysisResult {
            compliance_score: aggregate.compliance_score,
            violations: aggregate.violations,
            confidence_interval: aggregate.confidence_interval,
            recommendations,
            advisories,
            tensions,
            axioms_checked: axioms.len(),
            proposition_count: propositions.len(),
            risk_level: RiskLevel::Low,
            is_compliant: false,
            document_preview: preview(&document.text),
            source_id: document.source_id.clone(),
            timestamp: document.timestamp.clone(),
            template: None,
        };
        let divergence = result.divergence();
        result.risk_level = RiskLevel::from_divergence(divergence);
        result.is_compliant = divergence < violation_threshold;

        if result.is_compliant {
            log::info!(
                "SSIS verdict: compliant, score {:.4}, {} violations",
                result.compliance_score,
                result.violations.len()
            );
        } else {
            log::info!(
                "SSIS verdict: NON-COMPLIANT, score {:.4} (divergence {:.4} >= {}), {} violations",
                result.compliance_score,
                divergence,
                violation_threshold,
                result.violations.len()
            );
        }
        Ok(result)
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Analyse `document_text` against plain axiom texts.
///
/// `config` defaults to [`SsisConfig::default`] when `None`.
pub fn analyze<S: AsRef<str>>(
    axioms: &[S],
    document_text: &str,
    config: Option<&SsisConfig>,
) -> SsisResult<AnalysisResult> {
    let engine = SsisEngine::new(config.cloned().unwrap_or_default())?;
    engine.analyze_texts(axioms, &Document::new(document_text))
}
