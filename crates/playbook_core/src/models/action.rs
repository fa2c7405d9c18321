//! Renderable per-player actions

use super::geometry::Point;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a renderer should join control points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    Straight,
    Tension,
}

/// Curve tension used for paths with a control point
pub const DEFAULT_TENSION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoutePath {
    pub pattern: String,
    /// Depth in yards as authored
    pub depth: f64,
    /// start, optional control, end
    pub control_points: Vec<Point>,
    pub path_type: PathType,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteAction {
    pub from_player_id: String,
    pub route: RoutePath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlockPath {
    pub scheme: String,
    #[serde(default)]
    pub target: Option<String>,
    pub path_points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlockAction {
    pub from_player_id: String,
    pub block: BlockPath,
}

/// Route or block anchored to one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Route(RouteAction),
    Block(BlockAction),
}

impl Action {
    pub fn from_player_id(&self) -> &str {
        match self {
            Action::Route(r) => &r.from_player_id,
            Action::Block(b) => &b.from_player_id,
        }
    }

    /// All geometry carried by the action
    pub fn points(&self) -> &[Point] {
        match self {
            Action::Route(r) => &r.route.control_points,
            Action::Block(b) => &b.block.path_points,
        }
    }

    pub fn as_route(&self) -> Option<&RouteAction> {
        match self {
            Action::Route(r) => Some(r),
            Action::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&BlockAction> {
        match self {
            Action::Block(b) => Some(b),
            Action::Route(_) => None,
        }
    }
}
