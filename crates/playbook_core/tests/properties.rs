//! Whole-catalog properties: geometry bounds, action coverage, builder
//! idempotence, allocation uniqueness and pass/run ratio convergence

use playbook_core::models::{BuildPolicy, ConceptTemplate, ConceptType, Player, Requirements};
use playbook_core::{
    build_actions, builtin_catalog, plan_playbook, Catalog, Concept, GenerateOptions, PlannerConfig,
    SequentialIds,
};
use proptest::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

fn catalog() -> &'static Catalog {
    builtin_catalog().expect("built-in catalog parses")
}

fn roster(key: &str) -> Vec<Player> {
    catalog().formations[key].roster(&mut SequentialIds::new(key))
}

fn digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn every_pair_builds_in_bounds_with_full_coverage() {
    for key in catalog().formation_keys() {
        let roster = roster(key);
        for concept in &catalog().concepts {
            let output = build_actions(concept, &roster).unwrap();

            for action in &output.actions {
                for point in action.points() {
                    assert!(point.in_safe_bounds(), "{key}/{}: {point:?}", concept.id);
                }
            }

            for player in &roster {
                let n = output.actions.iter().filter(|a| a.from_player_id() == player.id).count();
                let expected = usize::from(!(player.is("QB") || player.is("BALL")));
                assert_eq!(n, expected, "{key}/{}: {}", concept.id, player.role);
            }
        }
    }
}

#[test]
fn builder_is_idempotent() {
    for key in catalog().formation_keys() {
        let roster = roster(key);
        for concept in &catalog().concepts {
            let first = serde_json::to_vec(&build_actions(concept, &roster).unwrap()).unwrap();
            let second = serde_json::to_vec(&build_actions(concept, &roster).unwrap()).unwrap();
            assert_eq!(digest(&first), digest(&second), "{key}/{}", concept.id);
        }
    }
}

/// `count` pass and `count` run concepts viable in any formation
fn deep_library(count: usize) -> Vec<Concept> {
    let concept = |id: String, concept_type| Concept {
        name: id.clone(),
        id,
        concept_type,
        category: None,
        requirements: Requirements::default(),
        template: ConceptTemplate { roles: vec![], build_policy: BuildPolicy::default() },
        suggestion_hints: vec![],
    };
    (0..count)
        .map(|i| concept(format!("pass_{i}"), ConceptType::Pass))
        .chain((0..count).map(|i| concept(format!("run_{i}"), ConceptType::Run)))
        .collect()
}

#[test]
fn pass_share_converges_on_ratio() {
    let library = deep_library(80);
    let formations = ["spread_doubles", "i_form"];

    let ratio_error = |target: usize, ratio: f64| {
        let options = GenerateOptions::new(formations).with_target(target).with_ratio(ratio);
        let plays = plan_playbook(
            catalog(),
            &library,
            &options,
            &PlannerConfig::default(),
            &mut SequentialIds::new("play"),
        );
        assert_eq!(plays.len(), target, "target {target} ratio {ratio}");
        let pass = plays.iter().filter(|p| p.concept.is_pass()).count();
        (pass as f64 / plays.len() as f64 - ratio).abs()
    };

    for ratio in [0.3, 0.5, 0.7] {
        let errors: Vec<(usize, f64)> =
            [10, 20, 60, 100].into_iter().map(|t| (t, ratio_error(t, ratio))).collect();

        // per-formation rounding bounds the drift
        for &(target, error) in &errors {
            let tolerance = formations.len() as f64 / target as f64;
            assert!(error <= tolerance + 1e-9, "target {target} ratio {ratio}: {error}");
        }
        let small = errors[0].1;
        let large = errors[errors.len() - 1].1;
        assert!(large <= small + 1e-9, "ratio {ratio}: {large} > {small}");
    }
}

fn formation_subset() -> impl Strategy<Value = Vec<String>> {
    let keys: Vec<String> = catalog().formation_keys().map(str::to_string).collect();
    proptest::sample::subsequence(keys.clone(), 1..=keys.len())
}

proptest! {
    #[test]
    fn allocation_never_repeats_or_overshoots(
        formations in formation_subset(),
        target in 1usize..40,
        ratio in 0.0f64..=1.0,
    ) {
        let options = GenerateOptions::new(formations).with_target(target).with_ratio(ratio);
        let plays = plan_playbook(
            catalog(),
            &catalog().concepts,
            &options,
            &PlannerConfig::default(),
            &mut SequentialIds::new("play"),
        );

        prop_assert!(plays.len() <= target);
        let ids: HashSet<_> = plays.iter().map(|p| p.concept.id.as_str()).collect();
        prop_assert_eq!(ids.len(), plays.len());
        prop_assert!(plays.windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert!(plays.iter().all(|p| p.score >= 40 && p.score <= 100));
    }
}
