//! Formation templates and materialized rosters

use super::geometry::Point;
use crate::provider::IdProvider;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One alignment slot inside a formation template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormationSlot {
    /// Position role (WR, TE, RB, FB, QB, C, LG, ...)
    pub role: String,
    /// Letter tag used by concept templates (X, Z, H, Y, ...)
    #[serde(default)]
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Opaque drawing hints, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<serde_json::Value>,
}

/// Named alignment template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormationSpec {
    pub name: String,
    pub players: Vec<FormationSlot>,
}

impl FormationSpec {
    /// Materialize a fresh roster with injected player ids.
    ///
    /// Every call produces an independent roster; generation for one play never
    /// touches another play's players.
    pub fn roster(&self, ids: &mut dyn IdProvider) -> Vec<Player> {
        self.players
            .iter()
            .map(|slot| Player {
                id: ids.next_id(),
                role: slot.role.clone(),
                label: slot.label.clone(),
                alignment: Point::new(slot.x, slot.y),
                appearance: slot.appearance.clone(),
            })
            .collect()
    }
}

/// Concrete player on a play diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub label: Option<String>,
    pub alignment: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<serde_json::Value>,
}

impl Player {
    /// True when role or label equals `code` (case-insensitive)
    pub fn is(&self, code: &str) -> bool {
        self.role.eq_ignore_ascii_case(code)
            || self.label.as_deref().is_some_and(|l| l.eq_ignore_ascii_case(code))
    }
}
