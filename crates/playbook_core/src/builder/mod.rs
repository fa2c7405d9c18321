//! Template action builder
//!
//! Turns one chosen concept plus a materialized roster into per-player route
//! and block geometry:
//!
//! 1. Validate the roster and template (ids unique, alignments finite, every
//!    role carries at most one of route/block, depths finite).
//! 2. Walk template roles in order. Each role binds the first unassigned
//!    player whose capability tags satisfy one of its `applies_to` codes, or
//!    every such player when the role is `multiple`.
//! 3. Give every player left over a coarse default action (see [`fallback`]).
//!
//! Output is a pure function of `(concept, roster)`; every point is clamped
//! into the safe drawing box.

pub mod blocks;
mod fallback;
pub mod routes;
pub mod tags;

use crate::error::TemplateError;
use crate::models::action::DEFAULT_TENSION;
use crate::models::geometry::yards_to_norm;
use crate::models::{
    Action, BlockAction, BlockPath, BlockSpec, Concept, ConceptType, FieldSide, PathType, Player,
    Role, RouteAction, RouteDirection, RoutePath, YARD_SCALE,
};
use routes::RouteRegistry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tags::{match_code, player_tags, CapabilityTag, TagMatch};

/// Actions built for one play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOutput {
    pub actions: Vec<Action>,
    /// Number of actions emitted, template and fallback together
    pub actions_created: usize,
}

/// Shared inputs for every action of one build
pub(crate) struct BuildContext<'a> {
    pub concept_type: ConceptType,
    pub play_side: FieldSide,
    pub registry: &'a RouteRegistry,
    pub yard_scale: f64,
}

/// Builder bound to a route registry and a yard scale
#[derive(Debug, Clone, Copy)]
pub struct ActionBuilder<'a> {
    registry: &'a RouteRegistry,
    yard_scale: f64,
}

impl Default for ActionBuilder<'static> {
    fn default() -> Self {
        Self { registry: RouteRegistry::standard(), yard_scale: YARD_SCALE }
    }
}

impl<'a> ActionBuilder<'a> {
    pub fn new(registry: &'a RouteRegistry, yard_scale: f64) -> Self {
        Self { registry, yard_scale }
    }

    /// Build every action for `concept` against `roster`.
    pub fn build(&self, concept: &Concept, roster: &[Player]) -> Result<BuildOutput, TemplateError> {
        validate_roster(roster)?;
        validate_roles(&concept.template.roles)?;

        let ctx = BuildContext {
            concept_type: concept.concept_type,
            play_side: concept.template.build_policy.default_side,
            registry: self.registry,
            yard_scale: self.yard_scale,
        };

        let tagged: Vec<_> = roster.iter().map(|p| (p, player_tags(p))).collect();
        let mut assigned = vec![false; roster.len()];
        let mut actions = Vec::new();

        for role in &concept.template.roles {
            if role.default_route.is_none() && role.default_block.is_none() {
                continue;
            }
            for idx in bind_role(role, &tagged, &assigned) {
                assigned[idx] = true;
                actions.push(role_action(role, &roster[idx], &ctx));
            }
        }

        let template_count = actions.len();
        for (player, _) in roster.iter().zip(&assigned).filter(|(_, done)| !**done) {
            if let Some(action) = fallback::default_action(player, &ctx) {
                actions.push(action);
            }
        }

        tracing::debug!(
            concept = %concept.id,
            template = template_count,
            fallback = actions.len() - template_count,
            "built play actions"
        );

        let actions_created = actions.len();
        Ok(BuildOutput { actions, actions_created })
    }
}

/// Build with the standard route registry and yard scale.
pub fn build_actions(concept: &Concept, roster: &[Player]) -> Result<BuildOutput, TemplateError> {
    ActionBuilder::default().build(concept, roster)
}

/// Template action for a bound player. Roles are validated before binding,
/// so at most one of route/block is present.
fn role_action(role: &Role, player: &Player, ctx: &BuildContext<'_>) -> Action {
    match (&role.default_route, &role.default_block) {
        (Some(route), _) => route_action(player, &route.pattern, route.depth, route.direction, ctx),
        (None, Some(BlockSpec { scheme, target })) => block_action(player, scheme, target.clone(), ctx),
        // never bound
        (None, None) => block_action(player, "zone_step", None, ctx),
    }
}

/// Roster indices bound by one role.
///
/// `applies_to` codes are tried in order. Within a code, exact matches come
/// first in roster order, then alias matches in roster order.
fn bind_role(
    role: &Role,
    tagged: &[(&Player, BTreeSet<CapabilityTag>)],
    assigned: &[bool],
) -> Vec<usize> {
    let mut bound: Vec<usize> = Vec::new();

    for code in &role.applies_to {
        for wanted in [TagMatch::Exact, TagMatch::Alias] {
            for (idx, (_, tags)) in tagged.iter().enumerate() {
                if assigned[idx] || bound.contains(&idx) || match_code(code, tags) != Some(wanted) {
                    continue;
                }
                bound.push(idx);
                if !role.multiple {
                    return bound;
                }
            }
        }
    }
    bound
}

fn validate_roster(roster: &[Player]) -> Result<(), TemplateError> {
    let mut seen = HashSet::new();
    for player in roster {
        if !seen.insert(player.id.as_str()) {
            return Err(TemplateError::DuplicatePlayerId { player_id: player.id.clone() });
        }
        if !player.alignment.is_finite() {
            return Err(TemplateError::NonFiniteAlignment { player_id: player.id.clone() });
        }
    }
    Ok(())
}

fn validate_roles(roles: &[Role]) -> Result<(), TemplateError> {
    for role in roles {
        if role.default_route.is_some() && role.default_block.is_some() {
            return Err(TemplateError::ConflictingRoleActions { role: role.role_name.clone() });
        }
        if role.default_route.as_ref().is_some_and(|r| !r.depth.is_finite()) {
            return Err(TemplateError::NonFiniteDepth { role: role.role_name.clone() });
        }
    }
    Ok(())
}

/// Route from the player's alignment, depth given in yards
pub(crate) fn route_action(
    player: &Player,
    pattern: &str,
    depth_yards: f64,
    direction: Option<RouteDirection>,
    ctx: &BuildContext<'_>,
) -> Action {
    let start = player.alignment.clamped();
    let depth = yards_to_norm(depth_yards, ctx.yard_scale);
    let shape = ctx.registry.shape(pattern, start, depth, direction);

    let mut control_points = vec![start];
    control_points.extend(shape.control);
    control_points.push(shape.end);

    let path_type = if shape.control.is_some() { PathType::Tension } else { PathType::Straight };
    let tension = if shape.control.is_some() { DEFAULT_TENSION } else { 0.0 };

    Action::Route(RouteAction {
        from_player_id: player.id.clone(),
        route: RoutePath {
            pattern: pattern.to_string(),
            depth: depth_yards,
            control_points,
            path_type,
            tension,
        },
    })
}

/// Short directional block from the player's alignment
pub(crate) fn block_action(
    player: &Player,
    scheme: &str,
    target: Option<String>,
    ctx: &BuildContext<'_>,
) -> Action {
    let start = player.alignment.clamped();
    let end = blocks::block_end(start, scheme, ctx.play_side);

    Action::Block(BlockAction {
        from_player_id: player.id.clone(),
        block: BlockPath { scheme: scheme.to_string(), target, path_points: vec![start, end] },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BuildPolicy, ConceptTemplate, Point, Requirements, RouteSpec};

    fn player(id: &str, role: &str, label: Option<&str>, x: f64, y: f64) -> Player {
        Player {
            id: id.to_string(),
            role: role.to_string(),
            label: label.map(str::to_string),
            alignment: Point::new(x, y),
            appearance: None,
        }
    }

    fn doubles_roster() -> Vec<Player> {
        vec![
            player("x", "WR", Some("X"), 0.1, 0.0),
            player("h", "WR", Some("H"), 0.3, -0.02),
            player("c", "C", None, 0.5, 0.0),
            player("y", "TE", Some("Y"), 0.62, 0.0),
            player("z", "WR", Some("Z"), 0.9, 0.0),
            player("qb", "QB", None, 0.5, -0.12),
            player("rb", "RB", None, 0.56, -0.22),
        ]
    }

    fn route_role(name: &str, applies_to: &[&str], pattern: &str, depth: f64) -> Role {
        Role {
            role_name: name.to_string(),
            applies_to: applies_to.iter().map(|s| s.to_string()).collect(),
            default_route: Some(RouteSpec {
                pattern: pattern.to_string(),
                depth,
                direction: Some(RouteDirection::Inside),
                break_angle_deg: None,
            }),
            default_block: None,
            notes: None,
            multiple: false,
        }
    }

    fn block_role(name: &str, applies_to: &[&str], scheme: &str, multiple: bool) -> Role {
        Role {
            role_name: name.to_string(),
            applies_to: applies_to.iter().map(|s| s.to_string()).collect(),
            default_route: None,
            default_block: Some(BlockSpec { scheme: scheme.to_string(), target: None }),
            notes: None,
            multiple,
        }
    }

    fn concept(concept_type: ConceptType, roles: Vec<Role>) -> Concept {
        Concept {
            id: "test".into(),
            name: "Test".into(),
            concept_type,
            category: None,
            requirements: Requirements::default(),
            template: ConceptTemplate { roles, build_policy: BuildPolicy::default() },
            suggestion_hints: Vec::new(),
        }
    }

    fn action_for<'a>(out: &'a BuildOutput, id: &str) -> Vec<&'a Action> {
        out.actions.iter().filter(|a| a.from_player_id() == id).collect()
    }

    #[test]
    fn test_first_match_binds_one_player() {
        let c = concept(ConceptType::Pass, vec![route_role("STICK", &["Y", "H"], "stick", 6.0)]);
        let out = build_actions(&c, &doubles_roster()).unwrap();

        let sticks: Vec<_> = out
            .actions
            .iter()
            .filter_map(Action::as_route)
            .filter(|r| r.route.pattern == "stick")
            .collect();
        assert_eq!(sticks.len(), 1);
        assert_eq!(sticks[0].from_player_id, "y");

        let points = &sticks[0].route.control_points;
        assert_eq!(points[0], Point::new(0.62, 0.0));
        assert_eq!(points.len(), 2);
        assert!((points[1].y - 6.0 * YARD_SCALE).abs() < 1e-12);
        assert_eq!(points[1].x, 0.62);
        assert_eq!(sticks[0].route.path_type, PathType::Straight);
    }

    #[test]
    fn test_earlier_role_wins_the_player() {
        let c = concept(
            ConceptType::Pass,
            vec![
                route_role("SEAM", &["Y"], "seam", 15.0),
                route_role("STICK", &["Y", "H"], "stick", 6.0),
            ],
        );
        let out = build_actions(&c, &doubles_roster()).unwrap();
        let y = action_for(&out, "y");
        assert_eq!(y.len(), 1);
        assert_eq!(y[0].as_route().unwrap().route.pattern, "seam");
        assert_eq!(action_for(&out, "h")[0].as_route().unwrap().route.pattern, "stick");
    }

    #[test]
    fn test_letter_codes_reach_unlabeled_players() {
        let roster = vec![
            player("p-1", "WR", None, 0.1, 0.0),
            player("p-2", "TE", None, 0.62, 0.0),
            player("p-3", "WR", None, 0.9, 0.0),
            player("p-4", "QB", None, 0.5, -0.12),
        ];
        let c = concept(
            ConceptType::Pass,
            vec![route_role("STICK", &["Y", "H"], "stick", 6.0), route_role("SLANT", &["X"], "slant", 6.0)],
        );
        let out = build_actions(&c, &roster).unwrap();

        assert_eq!(action_for(&out, "p-2")[0].as_route().unwrap().route.pattern, "stick");
        assert_eq!(action_for(&out, "p-1")[0].as_route().unwrap().route.pattern, "slant");
        // unbound receiver falls back to a go
        assert_eq!(action_for(&out, "p-3")[0].as_route().unwrap().route.pattern, "go");
    }

    #[test]
    fn test_exact_label_beats_earlier_alias() {
        let roster = vec![
            player("wr", "WR", None, 0.1, 0.0),
            player("x", "WR", Some("X"), 0.25, 0.0),
            player("z", "WR", Some("Z"), 0.9, 0.0),
        ];
        let c = concept(ConceptType::Pass, vec![route_role("GO", &["X"], "go", 12.0)]);
        let out = build_actions(&c, &roster).unwrap();

        let go = action_for(&out, "x")[0].as_route().unwrap();
        assert_eq!(go.route.pattern, "go");
        assert!((go.route.control_points[1].y - 12.0 * YARD_SCALE).abs() < 1e-12);
        // the labeled Z never aliases into X
        let c = concept(ConceptType::Pass, vec![route_role("GO", &["X"], "slant", 6.0)]);
        let out = build_actions(&c, &roster[2..]).unwrap();
        assert_eq!(action_for(&out, "z")[0].as_route().unwrap().route.pattern, "go");
    }

    #[test]
    fn test_every_non_qb_player_gets_one_action() {
        let c = concept(ConceptType::Run, vec![block_role("LINE", &["OL"], "zone_step", true)]);
        let roster = doubles_roster();
        let out = build_actions(&c, &roster).unwrap();

        for p in &roster {
            let expected = if p.is("QB") { 0 } else { 1 };
            assert_eq!(action_for(&out, &p.id).len(), expected, "{}", p.id);
        }
        assert_eq!(out.actions_created, roster.len() - 1);
    }

    #[test]
    fn test_multiple_binds_whole_group() {
        let roster = vec![
            player("lg", "LG", None, 0.46, 0.0),
            player("c", "C", None, 0.5, 0.0),
            player("rg", "RG", None, 0.54, 0.0),
        ];
        let c = concept(ConceptType::Run, vec![block_role("LINE", &["OL"], "reach", true)]);
        let out = build_actions(&c, &roster).unwrap();
        assert_eq!(out.actions.len(), 3);
        assert!(out.actions.iter().all(|a| a.as_block().unwrap().block.scheme == "reach"));
    }

    #[test]
    fn test_conflicting_role_is_rejected() {
        let mut role = route_role("BAD", &["X"], "go", 10.0);
        role.default_block = Some(BlockSpec { scheme: "stalk".into(), target: None });
        let err = build_actions(&concept(ConceptType::Pass, vec![role]), &doubles_roster()).unwrap_err();
        assert_eq!(err, TemplateError::ConflictingRoleActions { role: "BAD".into() });
    }

    #[test]
    fn test_non_finite_inputs_are_rejected() {
        let c = concept(ConceptType::Pass, vec![route_role("DEEP", &["X"], "go", f64::NAN)]);
        assert!(matches!(
            build_actions(&c, &doubles_roster()),
            Err(TemplateError::NonFiniteDepth { .. })
        ));

        let mut roster = doubles_roster();
        roster[0].alignment.x = f64::INFINITY;
        let c = concept(ConceptType::Pass, vec![]);
        assert!(matches!(
            build_actions(&c, &roster),
            Err(TemplateError::NonFiniteAlignment { .. })
        ));
    }

    #[test]
    fn test_duplicate_player_ids_are_rejected() {
        let mut roster = doubles_roster();
        roster[1].id = "x".into();
        let err = build_actions(&concept(ConceptType::Pass, vec![]), &roster).unwrap_err();
        assert_eq!(err, TemplateError::DuplicatePlayerId { player_id: "x".into() });
    }

    #[test]
    fn test_all_points_in_bounds() {
        let c = concept(
            ConceptType::Pass,
            vec![
                route_role("DEEP", &["X"], "corner", 40.0),
                route_role("WIDE", &["Z"], "wheel", 30.0),
            ],
        );
        let out = build_actions(&c, &doubles_roster()).unwrap();
        for action in &out.actions {
            assert!(action.points().iter().all(Point::in_safe_bounds));
        }
    }

    #[test]
    fn test_role_without_action_binds_nobody() {
        let mut role = route_role("SPY", &["X"], "go", 10.0);
        role.default_route = None;
        let out = build_actions(&concept(ConceptType::Run, vec![role]), &doubles_roster()).unwrap();
        // X falls through to the run fallback
        assert_eq!(action_for(&out, "x")[0].as_block().unwrap().block.scheme, "stalk");
    }
}
