// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — SSIS Lexicon (Keyword + Polarity Rule Tables)
// ─────────────────────────────────────────────────────────────────────
//! Data-driven rule tables shared by axiom and proposition feature
//! derivation.
//!
//! A `Lexicon` owns four tables: stop words, negation cues, a synonym
//! map that folds variants onto one canonical keyword, and tension
//! pairs (business pressures that pull against a protected value).
//! Axioms and propositions are always run through the same lexicon, so
//! a new matching signal is a new table row rather than a new matcher
//! type.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use ssis_types::Polarity;

/// Sorted, deduplicated set of normalised keywords.
pub type KeywordSet = BTreeSet<String>;

/// Tokens shorter than this never become keywords.
pub const MIN_KEYWORD_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "are", "for", "with", "that", "this", "these", "those", "was", "were", "been",
    "being", "have", "has", "had", "its", "our", "ours", "their", "theirs", "them", "they",
    "there", "from", "into", "onto", "upon", "all", "any", "each", "every", "some", "such",
    "than", "then", "also", "just", "only", "very", "will", "would", "shall", "should", "must",
    "may", "might", "can", "could", "does", "did", "doing", "about", "who", "whom", "which",
    "what", "when", "where", "while", "why", "how", "you", "your", "yours", "his", "her", "hers",
    "him", "she", "always", "but", "not", "out", "off", "too", "own", "same", "other", "more",
    "most", "here", "again", "once", "both", "because", "until", "via", "per",
];

/// Negation cues. Multi-word cues match contiguous tokens.
const NEGATION_CUES: &[&str] = &[
    "must not",
    "shall not",
    "not",
    "never",
    "no",
    "cannot",
    "nor",
    "prohibit",
    "prohibits",
    "prohibited",
    "forbid",
    "forbids",
    "forbidden",
    "ban",
    "bans",
    "banned",
];

/// Canonical keyword followed by the variants folded onto it.
const SYNONYMS: &[(&str, &[&str])] = &[
    (
        "deceive",
        &[
            "deception",
            "deceptive",
            "deceit",
            "lie",
            "lying",
            "mislead",
            "misleading",
            "misled",
            "dishonest",
            "dishonesty",
        ],
    ),
    (
        "harm",
        &["harmful", "hurt", "damage", "injure", "injury", "danger", "dangerous"],
    ),
    ("privacy", &["private", "confidential", "confidentiality"]),
    (
        "discriminate",
        &[
            "discrimination",
            "discriminatory",
            "bias",
            "biased",
            "unfair",
            "prejudice",
            "favoritism",
        ],
    ),
];

/// Pressures a policy may emphasise, paired with the values they strain.
const TENSION_PAIRS: &[(&[&str], &[&str])] = &[
    (
        &[
            "optimize profit",
            "maximize revenue",
            "reduce costs",
            "cost-saving",
        ],
        &[
            "prioritize safety",
            "ensure wellbeing",
            "well-being",
            "protect users",
        ],
    ),
    (
        &["efficiency", "speed", "performance"],
        &["thoroughness", "accuracy", "accurate", "reliability"],
    ),
    (
        &[
            "collect data",
            "analyze behavior",
            "track users",
            "demographic analysis",
        ],
        &["respect privacy", "minimize data", "anonymous", "confidentiality"],
    ),
];

static STANDARD: Lazy<Arc<Lexicon>> = Lazy::new(|| Arc::new(Lexicon::new()));

/// A table phrase with its normalised keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub text: String,
    pub keywords: KeywordSet,
}

impl Phrase {
    /// Every keyword of the phrase occurs in `keywords`.
    pub fn occurs_in(&self, keywords: &KeywordSet) -> bool {
        self.keywords.is_subset(keywords)
    }
}

/// Policy pressures that may conflict with the listed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensionPair {
    pub pressures: Vec<Phrase>,
    pub values: Vec<Phrase>,
}

/// Keyword set and stance derived from one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub keywords: KeywordSet,
    pub polarity: Polarity,
}

/// Stop-word, negation-cue and synonym tables.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    negation_cues: Vec<Vec<String>>,
    cue_words: HashSet<String>,
    synonyms: HashMap<String, String>,
    tension_pairs: Vec<TensionPair>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Lexicon built from the built-in tables.
    pub fn new() -> Self {
        let mut lexicon = Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            negation_cues: Vec::new(),
            cue_words: HashSet::new(),
            synonyms: HashMap::new(),
            tension_pairs: Vec::new(),
        };
        for cue in NEGATION_CUES {
            lexicon.add_negation_cue(cue);
        }
        for (canonical, variants) in SYNONYMS {
            lexicon.add_synonyms(canonical, variants);
        }
        for (pressures, values) in TENSION_PAIRS {
            lexicon.add_tension_pair(pressures, values);
        }
        lexicon
    }

    /// Shared process-wide instance of the built-in tables.
    pub fn standard() -> &'static Lexicon {
        &STANDARD
    }

    /// Handle to the shared instance, without copying its tables.
    pub fn shared() -> Arc<Lexicon> {
        Arc::clone(&STANDARD)
    }

    pub fn add_stop_word(&mut self, word: &str) {
        self.stop_words.insert(word.to_lowercase());
    }

    /// Register a negation cue. Cue words are never keywords.
    pub fn add_negation_cue(&mut self, cue: &str) {
        let tokens: Vec<String> = cue.unicode_words().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return;
        }
        self.cue_words.extend(tokens.iter().cloned());
        self.negation_cues.push(tokens);
    }

    /// Fold `variants` onto `canonical` during keyword normalisation.
    pub fn add_synonyms(&mut self, canonical: &str, variants: &[&str]) {
        let canonical = canonical.to_lowercase();
        for variant in variants {
            self.synonyms.insert(variant.to_lowercase(), canonical.clone());
        }
    }

    /// Register a tension pair. Phrases are normalised with the current
    /// tables, so add synonyms first. Phrases without keywords are dropped.
    pub fn add_tension_pair(&mut self, pressures: &[&str], values: &[&str]) {
        let pair = TensionPair {
            pressures: self.phrases(pressures),
            values: self.phrases(values),
        };
        if !pair.pressures.is_empty() && !pair.values.is_empty() {
            self.tension_pairs.push(pair);
        }
    }

    fn phrases(&self, texts: &[&str]) -> Vec<Phrase> {
        texts
            .iter()
            .map(|text| Phrase {
                text: text.to_string(),
                keywords: self.keywords(&self.tokenize(text)),
            })
            .filter(|p| !p.keywords.is_empty())
            .collect()
    }

    pub fn tension_pairs(&self) -> &[TensionPair] {
        &self.tension_pairs
    }

    /// Lower-cased UAX #29 words, with typographic apostrophes folded.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|w| w.to_lowercase().replace('\u{2019}', "'"))
            .collect()
    }

    fn is_negation_token(&self, token: &str) -> bool {
        token.ends_with("n't")
    }

    /// Negative when any cue (or an `n't` contraction) occurs.
    pub fn polarity(&self, tokens: &[String]) -> Polarity {
        if tokens.iter().any(|t| self.is_negation_token(t)) {
            return Polarity::Negative;
        }
        let negated = self.negation_cues.iter().any(|cue| {
            tokens
                .windows(cue.len())
                .any(|window| window.iter().zip(cue).all(|(t, c)| t == c))
        });
        if negated {
            Polarity::Negative
        } else {
            Polarity::Affirmative
        }
    }

    /// Normalise a single token into a keyword, or drop it.
    pub fn keyword(&self, token: &str) -> Option<String> {
        let token = token.strip_suffix("'s").unwrap_or(token);
        if token.chars().count() < MIN_KEYWORD_LEN
            || self.stop_words.contains(token)
            || self.cue_words.contains(token)
            || self.is_negation_token(token)
        {
            return None;
        }
        if let Some(canonical) = self.synonyms.get(token) {
            return Some(canonical.clone());
        }
        let stemmed = stem(token);
        let keyword = self
            .synonyms
            .get(stemmed.as_str())
            .cloned()
            .unwrap_or(stemmed);
        Some(keyword.replace('\'', ""))
    }

    pub fn keywords(&self, tokens: &[String]) -> KeywordSet {
        tokens.iter().filter_map(|t| self.keyword(t)).collect()
    }

    /// Keywords and polarity of `text`.
    pub fn features(&self, text: &str) -> TextFeatures {
        let tokens = self.tokenize(text);
        TextFeatures {
            keywords: self.keywords(&tokens),
            polarity: self.polarity(&tokens),
        }
    }
}

/// Fold plural and third-person endings: `policies -> policy`,
/// `deceives -> deceive`. Leaves `-ss`, `-us`, `-is` alone.
fn stem(token: &str) -> String {
    let len = token.chars().count();
    if len > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..token.len() - 3]);
    }
    if len > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}
