//! Concept scoring
//!
//! Fitness of one concept for one formation context, 0-100, starting from a
//! base of 50. Each bonus appends a short coaching point to the rationale, in
//! evaluation order. The rationale is shown verbatim downstream, so the order
//! and wording are part of the output contract.

use crate::analysis::{FormationContext, Structure};
use crate::models::{Concept, ConceptType, SurfaceNeeds};
use serde::{Deserialize, Serialize};

pub const BASE_SCORE: i32 = 50;
pub const MAX_SCORE: i32 = 100;

/// Concepts scoring below this are not offered
pub const DEFAULT_VIABILITY_FLOOR: u8 = 40;

// Pass adjustments
const RECEIVERS_MET: i32 = 20;
const RECEIVERS_SHORT: i32 = -30;
const TE_PRESENT: i32 = 10;
const TE_MISSING: i32 = -40;
const STRUCTURE_MATCH: i32 = 20;
const PERSONNEL_MATCH: i32 = 10;

// Run adjustments
const SURFACE_PRESENT: i32 = 15;
const SURFACE_MISSING: i32 = -50;
const FULLBACK_LEAD: i32 = 15;
const OUTSIDE_ZONE_SPREAD: i32 = 10;
const DOWNHILL_BACKFIELD: i32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptScore {
    pub score: u8,
    pub rationale: Vec<String>,
}

/// A catalog concept with its score against one formation
#[derive(Debug, Clone)]
pub struct ScoredConcept<'a> {
    pub concept: &'a Concept,
    pub score: ConceptScore,
}

/// Score one concept against one formation context.
pub fn score_concept(concept: &Concept, ctx: &FormationContext) -> ConceptScore {
    let mut score = BASE_SCORE;
    let mut rationale = Vec::new();

    match concept.concept_type {
        ConceptType::Pass => score_pass(concept, ctx, &mut score, &mut rationale),
        ConceptType::Run => score_run(concept, ctx, &mut score, &mut rationale),
    }

    // personnel is checked last for both types
    if concept.requirements.personnel_hints.iter().any(|p| *p == ctx.personnel) {
        score += PERSONNEL_MATCH;
        rationale.push(format!("{} personnel match", ctx.personnel));
    }

    ConceptScore { score: score.clamp(0, MAX_SCORE) as u8, rationale }
}

fn score_pass(concept: &Concept, ctx: &FormationContext, score: &mut i32, rationale: &mut Vec<String>) {
    let req = &concept.requirements;

    let min_receivers = req.min_eligible_receivers.unwrap_or(0);
    if ctx.receiver_count >= min_receivers {
        *score += RECEIVERS_MET;
        rationale.push(format!("{} eligible receivers available", ctx.receiver_count));
    } else {
        *score += RECEIVERS_SHORT;
    }

    if req.needs_te {
        if ctx.has_tight_end {
            *score += TE_PRESENT;
            rationale.push("Tight end in the route tree".to_string());
        } else {
            *score += TE_MISSING;
        }
    }

    if req.preferred_structures.contains(&ctx.structure) {
        *score += STRUCTURE_MATCH;
        rationale.push(format!("Built for {} looks", ctx.structure.code()));
    }
}

fn score_run(concept: &Concept, ctx: &FormationContext, score: &mut i32, rationale: &mut Vec<String>) {
    if concept.requirements.surface_needs == SurfaceNeeds::TeRequired {
        if ctx.has_tight_end {
            *score += SURFACE_PRESENT;
            rationale.push("Tight end sets the edge".to_string());
        } else {
            *score += SURFACE_MISSING;
        }
    }

    if ctx.has_fullback && concept.category_is(&["power", "gap"]) {
        *score += FULLBACK_LEAD;
        rationale.push("Fullback leads through the hole".to_string());
    }

    if concept.category_is(&["outside_zone"]) && ctx.structure.is_spread() {
        *score += OUTSIDE_ZONE_SPREAD;
        rationale.push("Spread alignment widens the front".to_string());
    }

    if concept.category_is(&["inside_zone", "gap"]) && (ctx.structure == Structure::I || ctx.has_fullback)
    {
        *score += DOWNHILL_BACKFIELD;
        rationale.push("Downhill angle from the backfield".to_string());
    }
}

/// Score every concept, drop those under `floor`, and sort best first.
///
/// The sort is stable: equal scores keep catalog order.
pub fn rank_concepts<'a, I>(concepts: I, ctx: &FormationContext, floor: u8) -> Vec<ScoredConcept<'a>>
where
    I: IntoIterator<Item = &'a Concept>,
{
    let mut ranked: Vec<ScoredConcept<'a>> = concepts
        .into_iter()
        .map(|concept| ScoredConcept { concept, score: score_concept(concept, ctx) })
        .filter(|s| s.score.score >= floor)
        .collect();
    ranked.sort_by(|a, b| b.score.score.cmp(&a.score.score));
    ranked
}


#[cfg(test)]
mod snapshot_tests;
