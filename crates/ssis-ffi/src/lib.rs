// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Engine PyO3 FFI Bindings
// (C) 2026 Sovereign Framework Contributors.
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Rust SSIS engine, consumed by
//! the compliance dashboard's request handler.
//!
//! # FFI Safety
//!
//! - The GIL is released while an analysis runs; a Python similarity
//!   callback re-acquires it via `Python::with_gil` per call.
//! - Python exceptions inside a callback → similarity 0.0.
//! - All config validated before storage (`SsisConfig::validate()`).
//!
//! Install: `pip install -e crates/ssis-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from ssis_kernel import analyze, analyze_template
//!
//! result = analyze(["AI must not deceive users"], policy_text)
//! print(result.compliance_score, result.risk_level)
//! ```

use std::sync::Arc;

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use ssis_core::{Document, ExternalSimilarity, SsisEngine, TEMPLATES};
use ssis_types::{
    AnalysisResult, Evidence, SeverityWeights, SsisConfig, SsisError, Tension, Violation,
};

create_exception!(ssis_kernel, InvalidAxiomError, PyValueError);
create_exception!(ssis_kernel, EmptyAxiomSetError, PyValueError);

fn to_py_err(err: SsisError) -> PyErr {
    match &err {
        SsisError::InvalidAxiom { .. } => InvalidAxiomError::new_err(err.to_string()),
        SsisError::EmptyAxiomSet => EmptyAxiomSetError::new_err(err.to_string()),
        SsisError::Config(_) | SsisError::UnknownTemplate(_) => {
            PyValueError::new_err(err.to_string())
        }
    }
}

// ─── PySsisConfig ───────────────────────────────────────────────────

/// Python-visible configuration for the SSIS engine.
#[pyclass(name = "SsisConfig")]
#[derive(Clone)]
struct PySsisConfig {
    inner: SsisConfig,
}

#[pymethods]
impl PySsisConfig {
    #[new]
    #[pyo3(signature = (
        support_threshold = 0.15,
        polarity_overlap_threshold = 0.2,
        severity_low = 0.3,
        severity_medium = 0.6,
        severity_high = 1.0,
        min_half_width = 0.05,
        interval_scale = 0.5,
        violation_threshold = 0.3,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        support_threshold: f64,
        polarity_overlap_threshold: f64,
        severity_low: f64,
        severity_medium: f64,
        severity_high: f64,
        min_half_width: f64,
        interval_scale: f64,
        violation_threshold: f64,
    ) -> PyResult<Self> {
        let config = SsisConfig {
            support_threshold,
            polarity_overlap_threshold,
            severity_weights: SeverityWeights {
                low: severity_low,
                medium: severity_medium,
                high: severity_high,
            },
            min_half_width,
            interval_scale,
            violation_threshold,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = SsisConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn support_threshold(&self) -> f64 {
        self.inner.support_threshold
    }

    #[getter]
    fn polarity_overlap_threshold(&self) -> f64 {
        self.inner.polarity_overlap_threshold
    }

    #[getter]
    fn violation_threshold(&self) -> f64 {
        self.inner.violation_threshold
    }

    fn __repr__(&self) -> String {
        format!(
            "SsisConfig(support_threshold={}, polarity_overlap_threshold={}, \
             violation_threshold={})",
            self.inner.support_threshold,
            self.inner.polarity_overlap_threshold,
            self.inner.violation_threshold
        )
    }
}

// ─── PyAnalysisResult ───────────────────────────────────────────────

fn location(e: &Evidence) -> String {
    format!("Proposition {}: {}", e.proposition_index + 1, e.text)
}

fn tension_dict<'py>(py: Python<'py>, t: &Tension) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("axiom_id", &t.axiom_id)?;
    dict.set_item("pressure", &t.pressure)?;
    dict.set_item("value", &t.value)?;
    dict.set_item("reason", t.message())?;
    dict.set_item("location", location(&t.evidence))?;
    dict.set_item("evidence_index", t.evidence.proposition_index)?;
    Ok(dict)
}

fn violation_dict<'py>(py: Python<'py>, v: &Violation) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("axiom_id", &v.axiom_id)?;
    dict.set_item("axiom", &v.axiom_text)?;
    dict.set_item("severity", v.severity.as_str())?;
    dict.set_item("reason", v.reason.as_str())?;
    dict.set_item("best_similarity", v.best_similarity)?;
    match &v.evidence {
        Some(e) => {
            dict.set_item("location", location(e))?;
            dict.set_item("evidence_index", e.proposition_index)?;
        }
        None => {
            dict.set_item("location", "Policy scope")?;
            dict.set_item("evidence_index", py.None())?;
        }
    }
    Ok(dict)
}

/// Python-visible analysis result.
#[pyclass(name = "AnalysisResult")]
#[derive(Clone)]
struct PyAnalysisResult {
    inner: AnalysisResult,
}

#[pymethods]
impl PyAnalysisResult {
    #[getter]
    fn compliance_score(&self) -> f64 {
        self.inner.compliance_score
    }

    #[getter]
    fn confidence_interval(&self) -> (f64, f64) {
        let ci = self.inner.confidence_interval;
        (ci.low, ci.high)
    }

    #[getter]
    fn violations<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyList>> {
        let items = self
            .inner
            .violations
            .iter()
            .map(|v| violation_dict(py, v))
            .collect::<PyResult<Vec<_>>>()?;
        PyList::new(py, items)
    }

    #[getter]
    fn recommendations(&self) -> Vec<String> {
        self.inner.recommendations.clone()
    }

    #[getter]
    fn advisories(&self) -> Vec<String> {
        self.inner.advisories.clone()
    }

    #[getter]
    fn tensions<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyList>> {
        let items = self
            .inner
            .tensions
            .iter()
            .map(|t| tension_dict(py, t))
            .collect::<PyResult<Vec<_>>>()?;
        PyList::new(py, items)
    }

    #[getter]
    fn template(&self) -> Option<String> {
        self.inner.template.clone()
    }

    #[getter]
    fn risk_level(&self) -> &'static str {
        self.inner.risk_level.as_str()
    }

    #[getter]
    fn is_compliant(&self) -> bool {
        self.inner.is_compliant
    }

    #[getter]
    fn axioms_checked(&self) -> usize {
        self.inner.axioms_checked
    }

    #[getter]
    fn proposition_count(&self) -> usize {
        self.inner.proposition_count
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("compliance_score", self.inner.compliance_score)?;
        dict.set_item("confidence_interval", self.confidence_interval())?;
        dict.set_item("violations", self.violations(py)?)?;
        dict.set_item("total_violations", self.inner.violations.len())?;
        dict.set_item("recommendations", self.recommendations())?;
        dict.set_item("advisories", self.advisories())?;
        dict.set_item("tensions", self.tensions(py)?)?;
        dict.set_item("axioms_checked", self.inner.axioms_checked)?;
        dict.set_item("proposition_count", self.inner.proposition_count)?;
        dict.set_item("risk_level", self.risk_level())?;
        dict.set_item("is_compliant", self.inner.is_compliant)?;
        dict.set_item("policy_preview", &self.inner.document_preview)?;
        dict.set_item("source_id", self.inner.source_id.clone())?;
        dict.set_item("timestamp", self.inner.timestamp.clone())?;
        if let Some(name) = &self.inner.template {
            dict.set_item("template", name)?;
        }
        Ok(dict)
    }

    fn to_json(&self) -> String {
        self.inner.to_json()
    }

    fn __repr__(&self) -> String {
        format!(
            "AnalysisResult(score={:.4}, violations={}, risk={}, compliant={})",
            self.inner.compliance_score,
            self.inner.violations.len(),
            self.inner.risk_level,
            self.inner.is_compliant,
        )
    }
}

// ─── Entry points ───────────────────────────────────────────────────

fn build_engine(config: SsisConfig, similarity: Option<PyObject>) -> PyResult<SsisEngine> {
    let engine = SsisEngine::new(config).map_err(to_py_err)?;
    Ok(match similarity {
        Some(callback) => engine.with_backend(Arc::new(ExternalSimilarity::new(
            move |axiom: &str, proposition: &str| -> f64 {
                Python::with_gil(|py| match callback.call1(py, (axiom, proposition)) {
                    Ok(result) => result.extract::<f64>(py).unwrap_or(0.0),
                    Err(_) => 0.0,
                })
            },
        ))),
        None => engine,
    })
}

/// Analyse a document against an ordered list of axiom texts.
///
/// Args:
///     axioms: List of axiom strings.
///     document: Policy or AI output text.
///     config: Optional SsisConfig.
///     source_id / timestamp: Opaque metadata echoed into the result.
///     similarity: Optional Callable[[str, str], float] replacing
///         keyword overlap (e.g. an embedding scorer).
#[pyfunction]
#[pyo3(signature = (
    axioms,
    document,
    config = None,
    source_id = None,
    timestamp = None,
    similarity = None,
))]
fn analyze(
    py: Python<'_>,
    axioms: Vec<String>,
    document: String,
    config: Option<PyRef<'_, PySsisConfig>>,
    source_id: Option<String>,
    timestamp: Option<String>,
    similarity: Option<PyObject>,
) -> PyResult<PyAnalysisResult> {
    let config = config.map(|c| c.inner.clone()).unwrap_or_default();
    let engine = build_engine(config, similarity)?;
    let doc = Document {
        text: document,
        source_id,
        timestamp,
    };
    let inner = py
        .allow_threads(|| engine.analyze_texts(&axioms, &doc))
        .map_err(to_py_err)?;
    Ok(PyAnalysisResult { inner })
}

/// Analyse a document against a built-in template ("healthcare",
/// "gdpr", "finance").
///
/// `config` defaults to the standard settings; compliance is always
/// judged against the template's own violation threshold. The result
/// carries the template's display name.
#[pyfunction]
#[pyo3(signature = (template, document, config = None, source_id = None, timestamp = None))]
fn analyze_template(
    py: Python<'_>,
    template: String,
    document: String,
    config: Option<PyRef<'_, PySsisConfig>>,
    source_id: Option<String>,
    timestamp: Option<String>,
) -> PyResult<PyAnalysisResult> {
    let config = match config {
        Some(c) => c.inner.clone(),
        None => ssis_core::template(&template).map_err(to_py_err)?.config(),
    };
    let engine = build_engine(config, None)?;
    let doc = Document {
        text: document,
        source_id,
        timestamp,
    };
    let inner = py
        .allow_threads(|| engine.analyze_template(&template, &doc))
        .map_err(to_py_err)?;
    Ok(PyAnalysisResult { inner })
}

/// Built-in templates as `{key: {"name", "axioms", "threshold"}}`.
#[pyfunction]
fn templates(py: Python<'_>) -> PyResult<Bound<'_, PyDict>> {
    let out = PyDict::new(py);
    for t in TEMPLATES {
        let entry = PyDict::new(py);
        entry.set_item("name", t.name)?;
        entry.set_item("axioms", t.axioms.to_vec())?;
        entry.set_item("threshold", t.violation_threshold)?;
        out.set_item(t.key, entry)?;
    }
    Ok(out)
}

// ─── Module ─────────────────────────────────────────────────────────

#[pymodule]
fn ssis_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySsisConfig>()?;
    m.add_class::<PyAnalysisResult>()?;
    m.add_function(wrap_pyfunction!(analyze, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_template, m)?)?;
    m.add_function(wrap_pyfunction!(templates, m)?)?;
    m.add("InvalidAxiomError", m.py().get_type::<InvalidAxiomError>())?;
    m.add("EmptyAxiomSetError", m.py().get_type::<EmptyAxiomSetError>())?;
    Ok(())
}
