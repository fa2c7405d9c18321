//! Quota arithmetic for the allocation planner
//!
//! Global targets are ceiling-rounded toward pass; run takes the remainder.
//! Per-formation quotas fold one type into the other once the global target
//! for that type has been met.

use crate::models::ConceptType;

/// Run-wide targets derived once from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quotas {
    pub target: usize,
    pub plays_per_formation: usize,
    pub target_pass: usize,
    pub target_run: usize,
}

impl Quotas {
    /// `formation_count` counts every requested key, known or not
    pub fn new(target: usize, formation_count: usize, ratio: f64) -> Self {
        let plays_per_formation = target.div_ceil(formation_count.max(1));
        let target_pass = ceil_share(target, ratio).min(target);
        Self { target, plays_per_formation, target_pass, target_run: target - target_pass }
    }

    /// (pass, run) to add for one formation given the running totals
    pub fn local(&self, ratio: f64, totals: TypeTotals) -> (usize, usize) {
        let mut pass = ceil_share(self.plays_per_formation, ratio).min(self.plays_per_formation);
        let mut run = self.plays_per_formation - pass;

        if totals.pass >= self.target_pass {
            run += pass;
            pass = 0;
        } else if totals.run >= self.target_run {
            pass += run;
            run = 0;
        }
        (pass, run)
    }
}

fn ceil_share(count: usize, ratio: f64) -> usize {
    (count as f64 * ratio).ceil().max(0.0) as usize
}

/// Running pass/run counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTotals {
    pub pass: usize,
    pub run: usize,
}

impl TypeTotals {
    pub fn total(&self) -> usize {
        self.pass + self.run
    }

    pub fn add(&mut self, concept_type: ConceptType) {
        match concept_type {
            ConceptType::Pass => self.pass += 1,
            ConceptType::Run => self.run += 1,
        }
    }
}

/// Trim `(pass, run)` takes so the total fits in `room`.
///
/// Cuts come off whichever type would overshoot its global target the most;
/// ties cut pass first.
pub fn fit_to_room(
    mut pass: usize,
    mut run: usize,
    room: usize,
    totals: TypeTotals,
    quotas: &Quotas,
) -> (usize, usize) {
    while pass + run > room {
        let pass_over = (totals.pass + pass) as i64 - quotas.target_pass as i64;
        let run_over = (totals.run + run) as i64 - quotas.target_run as i64;
        if pass > 0 && (pass_over >= run_over || run == 0) {
            pass -= 1;
        } else {
            run -= 1;
        }
    }
    (pass, run)
}
