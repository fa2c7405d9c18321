// crates/playbook_core/src/models/mod.rs
// Plain data shared by the analyzer, planner and builder

pub mod action;
pub mod concept;
pub mod formation;
pub mod geometry;
pub mod play;

pub use action::{Action, BlockAction, BlockPath, PathType, RouteAction, RoutePath};
pub use concept::{
    BlockSpec, BuildPolicy, Concept, ConceptTemplate, ConceptType, FieldSide, Requirements, Role,
    RouteDirection, RouteSpec, SurfaceNeeds,
};
pub use formation::{FormationSlot, FormationSpec, Player};
pub use geometry::{Point, YARD_SCALE};
pub use play::{GeneratedPlay, PlayDocument, PlayMeta};
