//! Schematic concepts: pass route combinations and run blocking schemes
//!
//! Catalog files are authored in camelCase; snake_case is accepted too.

use crate::analysis::Structure;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pass or run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConceptType {
    Pass,
    Run,
}

impl ConceptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Run => "run",
        }
    }
}

/// Surface (tight end) requirement of a run scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceNeeds {
    TeRequired,
    TePreferred,
    #[default]
    #[serde(other)]
    Any,
}

/// Formation requirements and soft preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Requirements {
    #[serde(default, alias = "minEligibleReceivers")]
    pub min_eligible_receivers: Option<u32>,
    #[serde(default, alias = "preferredStructures")]
    pub preferred_structures: Vec<Structure>,
    #[serde(default, alias = "personnelHints")]
    pub personnel_hints: Vec<String>,
    #[serde(default, alias = "needsTE", alias = "needsTe")]
    pub needs_te: bool,
    #[serde(default, alias = "surfaceNeeds")]
    pub surface_needs: SurfaceNeeds,
}

/// Route break direction relative to the field center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RouteDirection {
    Inside,
    Outside,
}

/// Horizontal side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldSide {
    Left,
    #[default]
    Right,
}

impl FieldSide {
    /// -1.0 for left, 1.0 for right
    pub fn sign(&self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteSpec {
    pub pattern: String,
    /// Depth in yards
    pub depth: f64,
    #[serde(default)]
    pub direction: Option<RouteDirection>,
    #[serde(default, alias = "breakAngleDeg")]
    pub break_angle_deg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlockSpec {
    pub scheme: String,
    #[serde(default)]
    pub target: Option<String>,
}

/// A named slot in a concept template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Role {
    #[serde(alias = "roleName")]
    pub role_name: String,
    /// Position codes this role can be played by, in preference order
    #[serde(alias = "appliesTo")]
    pub applies_to: Vec<String>,
    #[serde(default, alias = "defaultRoute")]
    pub default_route: Option<RouteSpec>,
    #[serde(default, alias = "defaultBlock")]
    pub default_block: Option<BlockSpec>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Bind every matching player instead of the first one
    #[serde(default)]
    pub multiple: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BuildPolicy {
    #[serde(default, alias = "defaultSide")]
    pub default_side: FieldSide,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConceptTemplate {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, alias = "buildPolicy")]
    pub build_policy: BuildPolicy,
}

/// Catalog concept. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Concept {
    pub id: String,
    pub name: String,
    #[serde(alias = "conceptType")]
    pub concept_type: ConceptType,
    /// quick_game, dropback, inside_zone, power, ...
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    pub template: ConceptTemplate,
    #[serde(default, alias = "suggestionHints")]
    pub suggestion_hints: Vec<String>,
}

impl Concept {
    pub fn is_pass(&self) -> bool {
        self.concept_type == ConceptType::Pass
    }

    pub fn category_is(&self, names: &[&str]) -> bool {
        self.category.as_deref().is_some_and(|c| names.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_accepts_camel_case_catalog_json() {
        let json = r#"{
            "id": "pass_stick",
            "name": "Stick",
            "conceptType": "pass",
            "category": "quick_game",
            "requirements": {
                "minEligibleReceivers": 3,
                "preferredStructures": ["trips", "2x2"],
                "personnelHints": ["11"],
                "needsTE": false
            },
            "template": {
                "roles": [{
                    "roleName": "STICK",
                    "appliesTo": ["Y", "H"],
                    "defaultRoute": {"pattern": "stick", "depth": 6, "direction": "inside"}
                }],
                "buildPolicy": {"defaultSide": "left"}
            }
        }"#;

        let concept: Concept = serde_json::from_str(json).unwrap();
        assert_eq!(concept.concept_type, ConceptType::Pass);
        assert_eq!(concept.requirements.min_eligible_receivers, Some(3));
        assert_eq!(concept.requirements.preferred_structures, vec![Structure::Trips, Structure::TwoByTwo]);
        assert_eq!(concept.template.build_policy.default_side, FieldSide::Left);

        let role = &concept.template.roles[0];
        assert_eq!(role.applies_to, vec!["Y", "H"]);
        let route = role.default_route.as_ref().unwrap();
        assert_eq!(route.direction, Some(RouteDirection::Inside));
        assert_eq!(route.depth, 6.0);
    }

    #[test]
    fn test_unknown_surface_needs_is_any() {
        let req: Requirements = serde_json::from_str(r#"{"surfaceNeeds": "whatever"}"#).unwrap();
        assert_eq!(req.surface_needs, SurfaceNeeds::Any);

        let req: Requirements = serde_json::from_str(r#"{"surface_needs": "te_required"}"#).unwrap();
        assert_eq!(req.surface_needs, SurfaceNeeds::TeRequired);
    }
}
