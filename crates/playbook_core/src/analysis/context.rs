//! Formation context analysis
//!
//! Derives the structural features the concept scorer keys on (personnel,
//! receiver count, surface/backfield presence, shape, strength) from a
//! formation's raw player list. A context is computed fresh per call and never
//! stored.

use crate::catalog::FormationLookup;
use crate::models::{FormationSlot, FormationSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Split boundaries used when four or more receivers are aligned
const LEFT_SPLIT_X: f64 = 0.4;
const RIGHT_SPLIT_X: f64 = 0.6;

/// FB and RB stacked within this horizontal distance form an I
const STACK_TOLERANCE_X: f64 = 0.1;

/// Coarse formation shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Structure {
    #[serde(rename = "2x2")]
    TwoByTwo,
    #[serde(rename = "3x1")]
    ThreeByOne,
    #[serde(rename = "bunch")]
    Bunch,
    #[serde(rename = "trips")]
    Trips,
    #[serde(rename = "twins")]
    Twins,
    #[serde(rename = "I")]
    I,
    #[serde(rename = "ace")]
    Ace,
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "pistol")]
    Pistol,
}

impl Structure {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TwoByTwo => "2x2",
            Self::ThreeByOne => "3x1",
            Self::Bunch => "bunch",
            Self::Trips => "trips",
            Self::Twins => "twins",
            Self::I => "I",
            Self::Ace => "ace",
            Self::Empty => "empty",
            Self::Pistol => "pistol",
        }
    }

    /// Spread shapes that widen the defensive front
    pub fn is_spread(&self) -> bool {
        matches!(self, Self::TwoByTwo | Self::Trips)
    }
}

/// Side with more receivers aligned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StrengthSide {
    Left,
    Right,
    Balanced,
}

/// Structural features of one formation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormationContext {
    /// Personnel code ("11", "12", "21")
    pub personnel: String,
    pub receiver_count: u32,
    pub has_tight_end: bool,
    pub has_fullback: bool,
    pub structure: Structure,
    pub strength_side: StrengthSide,
}

fn role_is(slot: &FormationSlot, codes: &[&str]) -> bool {
    codes.iter().any(|c| slot.role.eq_ignore_ascii_case(c))
}

fn is_receiver(slot: &FormationSlot) -> bool {
    role_is(slot, &["WR", "TE"])
}

fn is_running_back(slot: &FormationSlot) -> bool {
    role_is(slot, &["RB", "HB", "TB"])
}

/// Analyze a formation template.
pub fn analyze_formation(spec: &FormationSpec) -> FormationContext {
    let players = &spec.players;

    let receiver_count = players.iter().filter(|p| is_receiver(p)).count() as u32;
    let has_tight_end = players.iter().any(|p| role_is(p, &["TE"]));
    let has_fullback = players.iter().any(|p| role_is(p, &["FB"]));

    let wide_receivers: Vec<&FormationSlot> =
        players.iter().filter(|p| role_is(p, &["WR"])).collect();

    let mut structure = match wide_receivers.len() {
        n if n >= 4 => {
            let left = wide_receivers.iter().filter(|p| p.x < LEFT_SPLIT_X).count();
            let right = wide_receivers.iter().filter(|p| p.x > RIGHT_SPLIT_X).count();
            if left >= 3 || right >= 3 {
                Structure::Trips
            } else {
                Structure::TwoByTwo
            }
        }
        3 => Structure::Trips,
        _ => Structure::TwoByTwo,
    };

    let running_back = players.iter().find(|p| is_running_back(p));
    let fullback = players.iter().find(|p| role_is(p, &["FB"]));

    match (running_back, fullback) {
        (None, None) => structure = Structure::Empty,
        (Some(rb), Some(fb)) if (rb.x - fb.x).abs() < STACK_TOLERANCE_X => {
            structure = Structure::I;
        }
        _ => {}
    }

    let personnel = if receiver_count >= 3 {
        "11"
    } else if receiver_count >= 2 {
        "12"
    } else {
        "21"
    };

    let left = players.iter().filter(|p| is_receiver(p) && p.x < 0.5).count();
    let right = players.iter().filter(|p| is_receiver(p) && p.x > 0.5).count();
    let strength_side = match left.cmp(&right) {
        std::cmp::Ordering::Less => StrengthSide::Right,
        std::cmp::Ordering::Greater => StrengthSide::Left,
        std::cmp::Ordering::Equal => StrengthSide::Balanced,
    };

    FormationContext {
        personnel: personnel.to_string(),
        receiver_count,
        has_tight_end,
        has_fullback,
        structure,
        strength_side,
    }
}

/// Analyze a formation by catalog key. Unknown keys yield `None`.
pub fn context_for(lookup: &dyn FormationLookup, key: &str) -> Option<FormationContext> {
    lookup.formation(key).map(analyze_formation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(role: &str, x: f64) -> FormationSlot {
        FormationSlot { role: role.to_string(), label: None, x, y: 0.0, appearance: None }
    }

    fn formation(players: Vec<FormationSlot>) -> FormationSpec {
        FormationSpec { name: "Test".to_string(), players }
    }

    fn line() -> Vec<FormationSlot> {
        vec![slot("LT", 0.4), slot("LG", 0.45), slot("C", 0.5), slot("RG", 0.55), slot("RT", 0.6), slot("QB", 0.5)]
    }

    #[test]
    fn test_eleven_personnel_counts_te_as_receiver() {
        let mut players = line();
        players.extend([slot("WR", 0.1), slot("WR", 0.25), slot("WR", 0.75), slot("TE", 0.65), slot("RB", 0.55)]);
        let ctx = analyze_formation(&formation(players));

        assert_eq!(ctx.receiver_count, 4);
        // shape only looks at WRs: exactly three
        assert_eq!(ctx.structure, Structure::Trips);
        assert_eq!(ctx.personnel, "11");
        assert!(ctx.has_tight_end);
        assert!(!ctx.has_fullback);
    }

    #[test]
    fn test_three_receivers_is_trips() {
        let mut players = line();
        players.extend([slot("WR", 0.1), slot("WR", 0.8), slot("WR", 0.9), slot("RB", 0.5)]);
        let ctx = analyze_formation(&formation(players));
        assert_eq!(ctx.structure, Structure::Trips);
        assert_eq!(ctx.strength_side, StrengthSide::Right);
    }

    #[test]
    fn test_four_wide_split_by_halves() {
        let mut players = line();
        players.extend([slot("WR", 0.1), slot("WR", 0.2), slot("WR", 0.8), slot("WR", 0.9), slot("RB", 0.5)]);
        let ctx = analyze_formation(&formation(players));
        assert_eq!(ctx.structure, Structure::TwoByTwo);
        assert_eq!(ctx.strength_side, StrengthSide::Balanced);

        let mut players = line();
        players.extend([slot("WR", 0.1), slot("WR", 0.7), slot("WR", 0.8), slot("WR", 0.9), slot("RB", 0.5)]);
        let ctx = analyze_formation(&formation(players));
        assert_eq!(ctx.structure, Structure::Trips);
    }

    #[test]
    fn test_no_backs_is_empty() {
        let mut players = line();
        players.extend([slot("WR", 0.1), slot("WR", 0.2), slot("WR", 0.8), slot("WR", 0.9), slot("TE", 0.65)]);
        let ctx = analyze_formation(&formation(players));
        assert_eq!(ctx.structure, Structure::Empty);
        assert_eq!(ctx.receiver_count, 5);
    }

    #[test]
    fn test_stacked_backs_is_i_formation() {
        let mut players = line();
        players.extend([slot("WR", 0.1), slot("WR", 0.9), slot("TE", 0.65), slot("FB", 0.5), slot("RB", 0.52)]);
        let ctx = analyze_formation(&formation(players));
        assert_eq!(ctx.structure, Structure::I);
        assert!(ctx.has_fullback);
        // 3 receivers (2 WR + TE)
        assert_eq!(ctx.personnel, "11");
    }

    #[test]
    fn test_offset_backs_are_not_i() {
        let mut players = line();
        players.extend([slot("WR", 0.1), slot("WR", 0.9), slot("FB", 0.4), slot("RB", 0.55)]);
        let ctx = analyze_formation(&formation(players));
        assert_eq!(ctx.structure, Structure::TwoByTwo);
        assert_eq!(ctx.personnel, "12");
    }

    #[test]
    fn test_personnel_thresholds() {
        let mut players = line();
        players.extend([slot("TE", 0.65), slot("FB", 0.5), slot("RB", 0.5)]);
        let ctx = analyze_formation(&formation(players));
        assert_eq!(ctx.receiver_count, 1);
        assert_eq!(ctx.personnel, "21");
    }
}
