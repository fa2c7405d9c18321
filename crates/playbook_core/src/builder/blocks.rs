//! Block scheme offsets
//!
//! Blocks are short directional paths. Lateral movement is relative to the
//! concept's play side (`buildPolicy.defaultSide`); crack and stalk blocks
//! work back against it.

use crate::models::{FieldSide, Point};

/// (lateral, forward) offset for a scheme, lateral already signed
pub fn scheme_offset(scheme: &str, play_side: FieldSide) -> (f64, f64) {
    let s = play_side.sign();
    match scheme.to_ascii_lowercase().as_str() {
        "pull_kick" | "pull_lead" => (0.15 * s, 0.1),
        "reach" => (0.05 * s, 0.03),
        "trap" | "wham" => (0.1 * s, 0.08),
        "arc" => (0.12 * s, 0.1),
        "crack" | "stalk" => (-0.05 * s, 0.08),
        "lead" | "iso" | "insert" => (0.0, 0.1),
        "down" | "kick" => (0.03 * s, 0.05),
        // zone_step, combo, climb, scoop and anything else
        _ => (0.0, 0.05),
    }
}

/// Clamped block endpoint
pub fn block_end(start: Point, scheme: &str, play_side: FieldSide) -> Point {
    let (dx, dy) = scheme_offset(scheme, play_side);
    start.offset(dx, dy).clamped()
}
