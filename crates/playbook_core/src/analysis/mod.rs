// crates/playbook_core/src/analysis/mod.rs
// Formation analysis

pub mod context;

pub use context::{analyze_formation, context_for, FormationContext, StrengthSide, Structure};
