use std::collections::BTreeSet;

use proptest::prelude::*;

use ssis_core::analyze;
use ssis_types::ViolationReason;

const CONTENT: &[&str] = &[
    "protect", "privacy", "users", "data", "consent", "deceive", "harm", "share", "collect",
    "delete", "records", "patients", "customers", "transparent",
];
const CUES: &[&str] = &["not", "never", "no"];
const FILLER: &[&str] = &["quarterly", "revenue", "growth", "office", "lunch", "weather"];

fn phrase(pool: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(pool), 1..5).prop_map(|w| w.join(" "))
}

/// Affirmative axioms only, so a restated axiom cannot contradict another.
fn affirmative_axiom() -> impl Strategy<Value = String> {
    phrase(CONTENT).prop_map(|p| format!("AI must {p}"))
}

fn any_axiom() -> impl Strategy<Value = String> {
    (phrase(CONTENT), any::<bool>()).prop_map(|(p, negate)| {
        if negate {
            format!("AI must not {p}")
        } else {
            format!("AI must {p}")
        }
    })
}

fn sentence() -> impl Strategy<Value = String> {
    (
        phrase(CONTENT),
        prop::option::of(prop::sample::select(CUES)),
        phrase(FILLER),
    )
        .prop_map(|(content, cue, filler)| match cue {
            Some(cue) => format!("We {cue} {content} {filler}"),
            None => format!("We {content} {filler}"),
        })
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 0..6).prop_map(|s| s.join(". "))
}

proptest! {
    #[test]
    fn score_and_interval_bounded(
        axioms in prop::collection::vec(any_axiom(), 1..6),
        doc in document(),
    ) {
        let result = analyze(&axioms, &doc, None).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.compliance_score));
        let ci = result.confidence_interval;
        prop_assert!(0.0 <= ci.low && ci.low <= ci.high && ci.high <= 1.0);
        prop_assert!(ci.contains(result.compliance_score));
    }

    #[test]
    fn at_most_one_violation_per_axiom(
        axioms in prop::collection::vec(any_axiom(), 1..6),
        doc in document(),
    ) {
        let result = analyze(&axioms, &doc, None).unwrap();
        prop_assert!(result.violations.len() <= axioms.len());
        let ids: BTreeSet<&str> = result.violations.iter().map(|v| v.axiom_id.as_str()).collect();
        prop_assert_eq!(ids.len(), result.violations.len());
        prop_assert_eq!(result.recommendations.len(), result.violations.len());
    }

    #[test]
    fn analysis_is_idempotent(
        axioms in prop::collection::vec(any_axiom(), 1..6),
        doc in document(),
    ) {
        let a = analyze(&axioms, &doc, None).unwrap();
        let b = analyze(&axioms, &doc, None).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn restating_an_axiom_never_lowers_compliance(
        axioms in prop::collection::vec(affirmative_axiom(), 1..6),
        doc in document(),
        pick in any::<prop::sample::Index>(),
    ) {
        let target = pick.index(axioms.len());
        let before = analyze(&axioms, &doc, None).unwrap();
        let restated = format!("{doc}\n{}", axioms[target]);
        let after = analyze(&axioms, &restated, None).unwrap();

        prop_assert!(after.compliance_score >= before.compliance_score);

        let id = format!("A{}", target + 1);
        let was_unsupported = before
            .violation_for(&id)
            .map_or(false, |v| v.reason == ViolationReason::NoSupport);
        if was_unsupported {
            prop_assert!(after.violation_for(&id).is_none());
        }
    }

    #[test]
    fn more_propositions_narrow_the_interval(
        axiom in any_axiom(),
        claim in sentence(),
        extra in 1usize..6,
    ) {
        let padding: Vec<String> = (0..extra).map(|i| format!("{} lunch", FILLER[i % 3])).collect();
        let single = analyze(&[&axiom], &claim, None).unwrap();
        let padded_doc = format!("{claim}. {}", padding.join(". "));
        let padded = analyze(&[&axiom], &padded_doc, None).unwrap();

        prop_assert_eq!(single.compliance_score, padded.compliance_score);
        prop_assert!(padded.confidence_interval.width() < single.confidence_interval.width());
    }
}
