//! Default assignments for players no template role claimed
//!
//! One action per leftover player, keyed by coarse position class. QB and
//! ball are skipped. Every other player ends up with something renderable even
//! when a concept template is sparse.

use super::tags::{player_tags, position_class, PositionClass};
use super::{block_action, route_action, BuildContext};
use crate::models::action::DEFAULT_TENSION;
use crate::models::geometry::yards_to_norm;
use crate::models::{Action, ConceptType, PathType, Player, RouteAction, RouteDirection, RoutePath};

/// Fallback route depths (yards)
const TE_FLAT_YARDS: f64 = 5.0;
const CHECKDOWN_YARDS: f64 = 3.0;
const RECEIVER_GO_YARDS: f64 = 15.0;
const RUN_PATH_YARDS: f64 = 10.0;

/// Default action for one player, `None` for QB/ball
pub(crate) fn default_action(player: &Player, ctx: &BuildContext<'_>) -> Option<Action> {
    let class = position_class(&player_tags(player));
    let pass = ctx.concept_type == ConceptType::Pass;
    let outside = Some(RouteDirection::Outside);

    let action = match class {
        PositionClass::Passer => return None,
        PositionClass::Line => block_action(player, "zone_step", None, ctx),
        PositionClass::TightEnd if pass => route_action(player, "flat", TE_FLAT_YARDS, outside, ctx),
        PositionClass::TightEnd => block_action(player, "zone_step", None, ctx),
        PositionClass::Fullback if pass => route_action(player, "flat", CHECKDOWN_YARDS, outside, ctx),
        PositionClass::Fullback => block_action(player, "lead", None, ctx),
        PositionClass::Receiver if pass => route_action(player, "go", RECEIVER_GO_YARDS, None, ctx),
        PositionClass::Receiver => block_action(player, "stalk", None, ctx),
        PositionClass::RunningBack if pass => {
            route_action(player, "swing", CHECKDOWN_YARDS, outside, ctx)
        }
        PositionClass::RunningBack => run_path(player, ctx),
    };
    Some(action)
}

/// Ball carrier path: a downhill track leaning to the play side
fn run_path(player: &Player, ctx: &BuildContext<'_>) -> Action {
    let s = ctx.play_side.sign();
    let d = yards_to_norm(RUN_PATH_YARDS, ctx.yard_scale);
    let start = player.alignment.clamped();
    let control = player.alignment.offset(0.05 * s, 0.4 * d).clamped();
    let end = player.alignment.offset(0.08 * s, d).clamped();

    Action::Route(RouteAction {
        from_player_id: player.id.clone(),
        route: RoutePath {
            pattern: "go".to_string(),
            depth: RUN_PATH_YARDS,
            control_points: vec![start, control, end],
            path_type: PathType::Tension,
            tension: DEFAULT_TENSION,
        },
    })
}
