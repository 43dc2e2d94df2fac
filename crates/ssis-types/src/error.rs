// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Engine Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all SSIS engine failures.
///
/// Every variant is an input-validation failure. Scoring itself is pure
/// and cannot fail once inputs are accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SsisError {
    /// An axiom is empty after trimming, or carries an unusable weight.
    #[error("invalid axiom at position {index}: {reason}")]
    InvalidAxiom { index: usize, reason: String },

    /// No axioms were supplied, so no verdict can be formed.
    #[error("empty axiom set: at least one axiom is required")]
    EmptyAxiomSet,

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// No built-in compliance template has this key.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

pub type SsisResult<T> = Result<T, SsisError>;
