//! Allocation planner
//!
//! Spreads a target number of plays over the requested formations while
//! honoring a pass/run ratio and the concept reuse policy. The run is a fold
//! over formations with an explicit accumulator; nothing is
//! shared between calls.
//!
//! Primary pass: per formation, score the still-eligible concepts, drop those
//! under the viability floor and take the best of each type up to the local
//! quota. Fill pass: if the target is still short, walk the formations again
//! and take the best remaining viable concepts with no type balancing.
//! Under-delivery is a normal result.

pub mod allocation;

use crate::analysis::{analyze_formation, FormationContext};
use crate::catalog::FormationLookup;
use crate::config::{CategoryFilter, ConceptReuse, GenerateOptions, PlannerConfig};
use crate::models::{Concept, ConceptType, FormationSpec, GeneratedPlay};
use crate::provider::IdProvider;
use crate::scoring::{rank_concepts, ScoredConcept};
use allocation::{fit_to_room, Quotas, TypeTotals};
use std::collections::HashSet;

/// Running state threaded through both passes
#[derive(Debug, Default)]
struct Allocation {
    used_concepts: HashSet<String>,
    used_pairs: HashSet<(String, String)>,
    totals: TypeTotals,
    plays: Vec<GeneratedPlay>,
}

impl Allocation {
    fn is_available(&self, reuse: ConceptReuse, formation_key: &str, concept_id: &str) -> bool {
        match reuse {
            ConceptReuse::Never => !self.used_concepts.contains(concept_id),
            ConceptReuse::AcrossFormations => {
                !self.used_pairs.contains(&(formation_key.to_string(), concept_id.to_string()))
            }
        }
    }

    fn push(&mut self, formation: &Formation<'_>, scored: &ScoredConcept<'_>, ids: &mut dyn IdProvider) {
        let concept = scored.concept;
        self.used_concepts.insert(concept.id.clone());
        self.used_pairs.insert((formation.key.to_string(), concept.id.clone()));
        self.totals.add(concept.concept_type);
        self.plays.push(GeneratedPlay {
            id: ids.next_id(),
            name: format!("{} {}", formation.spec.name, concept.name),
            formation_key: formation.key.to_string(),
            formation_name: formation.spec.name.clone(),
            concept: concept.clone(),
            score: scored.score.score,
            rationale: scored.score.rationale.clone(),
            selected: true,
        });
    }
}

/// A requested formation that resolved in the lookup
struct Formation<'a> {
    key: &'a str,
    spec: &'a FormationSpec,
    context: FormationContext,
}

/// Generate a playbook: ordered plays, best score first, without geometry.
pub fn plan_playbook(
    lookup: &dyn FormationLookup,
    concepts: &[Concept],
    options: &GenerateOptions,
    config: &PlannerConfig,
    ids: &mut dyn IdProvider,
) -> Vec<GeneratedPlay> {
    let target = options.target(config);
    let ratio = options.ratio(config);
    let quotas = Quotas::new(target, options.formations.len(), ratio);
    let filter = options.include_categories.as_ref();

    let formations: Vec<Formation<'_>> = options
        .formations
        .iter()
        .filter_map(|key| match lookup.formation(key) {
            Some(spec) => Some(Formation { key, spec, context: analyze_formation(spec) }),
            None => {
                tracing::warn!(formation = %key, "unknown formation key, skipping");
                None
            }
        })
        .collect();

    // primary pass never reuses, whatever the policy
    let primary = formations.iter().fold(Allocation::default(), |mut acc, formation| {
        let room = quotas.target.saturating_sub(acc.plays.len());
        if room == 0 {
            return acc;
        }

        let ranked = eligible(formation, concepts, filter, config, |c| {
            acc.is_available(ConceptReuse::Never, formation.key, &c.id)
        });
        let (pass, run): (Vec<_>, Vec<_>) = ranked.into_iter().partition(|s| s.concept.is_pass());

        let (pass_quota, run_quota) = quotas.local(ratio, acc.totals);
        let (pass_take, run_take) = fit_to_room(
            pass_quota.min(pass.len()),
            run_quota.min(run.len()),
            room,
            acc.totals,
            &quotas,
        );
        tracing::debug!(
            formation = %formation.key,
            structure = formation.context.structure.code(),
            viable_pass = pass.len(),
            viable_run = run.len(),
            pass_take,
            run_take,
            "allocated formation"
        );

        for scored in pass.iter().take(pass_take).chain(run.iter().take(run_take)) {
            acc.push(formation, scored, ids);
        }
        acc
    });

    let primary_count = primary.plays.len();
    let mut result = if primary_count < quotas.target {
        fill(primary, &formations, concepts, filter, config, &quotas, ids)
    } else {
        primary
    };

    result.plays.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::info!(
        requested = quotas.target,
        formations = formations.len(),
        generated = result.plays.len(),
        filled = result.plays.len() - primary_count,
        pass = result.totals.pass,
        run = result.totals.run,
        "playbook generated"
    );
    if result.plays.len() < quotas.target {
        tracing::debug!(short = quotas.target - result.plays.len(), "viable concept pool exhausted");
    }

    result.plays
}

/// Second walk over the formations to top up a short playbook
fn fill(
    acc: Allocation,
    formations: &[Formation<'_>],
    concepts: &[Concept],
    filter: Option<&CategoryFilter>,
    config: &PlannerConfig,
    quotas: &Quotas,
    ids: &mut dyn IdProvider,
) -> Allocation {
    formations.iter().fold(acc, |mut acc, formation| {
        let room = quotas.target.saturating_sub(acc.plays.len());
        if room == 0 {
            return acc;
        }
        let ranked = eligible(formation, concepts, filter, config, |c| {
            acc.is_available(config.concept_reuse, formation.key, &c.id)
        });
        for scored in ranked.iter().take(room) {
            acc.push(formation, scored, ids);
        }
        acc
    })
}

/// Ranked viable concepts for one formation among those `available` allows
fn eligible<'c>(
    formation: &Formation<'_>,
    concepts: &'c [Concept],
    filter: Option<&CategoryFilter>,
    config: &PlannerConfig,
    available: impl Fn(&Concept) -> bool,
) -> Vec<ScoredConcept<'c>> {
    let pool = concepts.iter().filter(|&c| category_allowed(c, filter) && available(c));
    rank_concepts(pool, &formation.context, config.viability_floor)
}

fn category_allowed(concept: &Concept, filter: Option<&CategoryFilter>) -> bool {
    let Some(filter) = filter else { return true };
    let allowed = match concept.concept_type {
        ConceptType::Pass => &filter.pass,
        ConceptType::Run => &filter.run,
    };
    allowed.is_empty()
        || concept.category.as_deref().is_some_and(|c| allowed.iter().any(|a| a.eq_ignore_ascii_case(c)))
}
