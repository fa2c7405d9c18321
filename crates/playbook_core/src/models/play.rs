//! Generated plays and the documents handed to persistence

use super::action::Action;
use super::concept::{Concept, ConceptType};
use super::formation::Player;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One candidate (formation, concept) pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedPlay {
    pub id: String,
    pub name: String,
    pub formation_key: String,
    pub formation_name: String,
    pub concept: Concept,
    /// Fitness 0-100
    pub score: u8,
    /// Coaching points, in scoring order
    pub rationale: Vec<String>,
    pub selected: bool,
}

impl GeneratedPlay {
    pub fn concept_type(&self) -> ConceptType {
        self.concept.concept_type
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayMeta {
    pub play_id: String,
    pub name: String,
    pub formation_key: String,
    pub concept_id: String,
    pub concept_type: ConceptType,
    pub score: u8,
    pub rationale: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fully built play diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayDocument {
    pub roster: Vec<Player>,
    pub actions: Vec<Action>,
    pub meta: PlayMeta,
}
