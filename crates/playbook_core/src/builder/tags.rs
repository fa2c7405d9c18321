//! Position capability tags
//!
//! Every position code resolves to a static set of capability tags. A player
//! carries the union of the tags of its role and label. A template entry
//! matches in two ways:
//!
//! - exactly, when the player carries the entry's most specific tag: a
//!   generic `WR` entry finds every X/Z/H/F and `RB` finds a `HB` or `TB`;
//! - by alias, when everything the player carries is implied by the entry:
//!   `Y` finds an unlabeled `TE`, `X` an unlabeled `WR`, `LG` a bare `OL`.
//!
//! A labeled player never aliases into a sibling letter, so `Z` does not take
//! the `X` receiver.

use crate::models::Player;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityTag {
    Quarterback,
    Ball,
    OffensiveLine,
    Center,
    LeftGuard,
    RightGuard,
    LeftTackle,
    RightTackle,
    Guard,
    Tackle,
    TightEnd,
    YTight,
    UTight,
    Receiver,
    SplitEnd,
    Flanker,
    Slot,
    HReceiver,
    FReceiver,
    RunningBack,
    Fullback,
}

use CapabilityTag::*;

/// Tags granted by a position code, most specific first.
///
/// Codes are matched case-insensitively. Unknown codes grant nothing.
pub fn tags_for_code(code: &str) -> &'static [CapabilityTag] {
    match code.trim().to_ascii_uppercase().as_str() {
        "QB" => &[Quarterback],
        "BALL" => &[Ball],
        "OL" | "LINE" => &[OffensiveLine],
        "C" => &[Center, OffensiveLine],
        "LG" => &[LeftGuard, Guard, OffensiveLine],
        "RG" => &[RightGuard, Guard, OffensiveLine],
        "G" | "OG" => &[Guard, OffensiveLine],
        "LT" => &[LeftTackle, Tackle, OffensiveLine],
        "RT" => &[RightTackle, Tackle, OffensiveLine],
        "T" | "OT" => &[Tackle, OffensiveLine],
        "TE" => &[TightEnd],
        "Y" => &[YTight, TightEnd],
        "U" => &[UTight, TightEnd],
        "WR" => &[Receiver],
        "X" | "SE" => &[SplitEnd, Receiver],
        "Z" | "FL" => &[Flanker, Receiver],
        "SLOT" => &[Slot, Receiver],
        "H" => &[HReceiver, Slot, Receiver],
        "F" => &[FReceiver, Slot, Receiver],
        "RB" | "HB" | "TB" => &[RunningBack],
        "FB" => &[Fullback],
        _ => &[],
    }
}

/// How a player satisfies a template entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagMatch {
    Exact,
    Alias,
}

/// Match one template code against a player's tags
pub fn match_code(code: &str, tags: &BTreeSet<CapabilityTag>) -> Option<TagMatch> {
    let implied = tags_for_code(code);
    let specific = implied.first()?;
    if tags.contains(specific) {
        Some(TagMatch::Exact)
    } else if !tags.is_empty() && tags.iter().all(|t| implied.contains(t)) {
        Some(TagMatch::Alias)
    } else {
        None
    }
}

/// Union of the tags granted by a player's role and label
pub fn player_tags(player: &Player) -> BTreeSet<CapabilityTag> {
    let mut tags: BTreeSet<CapabilityTag> = tags_for_code(&player.role).iter().copied().collect();
    if let Some(label) = &player.label {
        tags.extend(tags_for_code(label).iter().copied());
    }
    tags
}

/// Coarse position class used by the fallback pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionClass {
    /// QB and ball: never assigned an action
    Passer,
    Line,
    TightEnd,
    Fullback,
    Receiver,
    RunningBack,
}

pub fn position_class(tags: &BTreeSet<CapabilityTag>) -> PositionClass {
    if tags.contains(&Quarterback) || tags.contains(&Ball) {
        PositionClass::Passer
    } else if tags.contains(&OffensiveLine) {
        PositionClass::Line
    } else if tags.contains(&TightEnd) {
        PositionClass::TightEnd
    } else if tags.contains(&Fullback) {
        PositionClass::Fullback
    } else if tags.contains(&RunningBack) {
        PositionClass::RunningBack
    } else {
        // X/Z/H/F and anything unrecognised run receiver assignments
        PositionClass::Receiver
    }
}
