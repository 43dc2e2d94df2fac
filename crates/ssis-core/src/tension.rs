// ─────────────────────────────────────────────────────────────────────
// Sovereign Framework — Policy Tension Detection
// ─────────────────────────────────────────────────────────────────────
//! Flags business pressures stated in a document that pull against a
//! value an axiom protects ("reduce costs" against patient well-being).
//!
//! Tensions are advisory. They are reported next to the violations and
//! never feed the compliance score.

use ssis_types::{Evidence, Tension};

use crate::axiom::Axiom;
use crate::extractor::Proposition;
use crate::lexicon::Lexicon;

/// At most one tension per (axiom, tension pair), in axiom order.
///
/// The value is the first phrase of the pair found in the axiom. The
/// pressure is the first phrase found in the earliest proposition that
/// carries any of them.
pub fn detect_tensions(
    axioms: &[Axiom],
    propositions: &[Proposition],
    lexicon: &Lexicon,
) -> Vec<Tension> {
    let mut tensions = Vec::new();
    for axiom in axioms {
        for pair in lexicon.tension_pairs() {
            let Some(value) = pair.values.iter().find(|v| v.occurs_in(axiom.keywords())) else {
                continue;
            };
            let hit = propositions.iter().find_map(|prop| {
                pair.pressures
                    .iter()
                    .find(|p| p.occurs_in(&prop.keywords))
                    .map(|pressure| (pressure, prop))
            });
            if let Some((pressure, prop)) = hit {
                tensions.push(Tension {
                    axiom_id: axiom.id().to_string(),
                    pressure: pressure.text.clone(),
                    value: value.text.clone(),
                    evidence: Evidence {
                        proposition_index: prop.index,
                        text: prop.text.clone(),
                    },
                });
            }
        }
    }
    if !tensions.is_empty() {
        log::debug!("{} policy tensions found", tensions.len());
    }
    tensions
}
