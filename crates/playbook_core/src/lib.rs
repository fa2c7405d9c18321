//! # playbook_core - Deterministic Playbook Generator
//!
//! Matches offensive formations against a library of schematic concepts,
//! allocates a playbook across the chosen formations, and turns each chosen
//! (formation, concept) pair into concrete per-player route and block paths.
//!
//! ## Pipeline
//! - [`analysis`]: formation context (personnel, receivers, structure)
//! - [`scoring`]: 0-100 concept fitness with coaching-point rationale
//! - [`planner`]: quota-based allocation with a fill pass
//! - [`builder`]: template roles to clamped route/block geometry
//! - [`materialize`]: play documents for the persistence hand-off
//!
//! Everything is synchronous and side-effect free apart from logging; ids and
//! timestamps come from injectable providers.

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Planner and materializer entry points thread lookup, config, ids and clock
#![allow(clippy::too_many_arguments)]

pub mod analysis;
pub mod api;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod materialize;
pub mod models;
pub mod planner;
pub mod provider;
pub mod scoring;

pub use analysis::{analyze_formation, context_for, FormationContext, StrengthSide, Structure};
pub use api::{generate_playbook_json, playbook_request_schema, score_formation_json};
pub use builder::{build_actions, ActionBuilder, BuildOutput};
pub use catalog::{builtin_catalog, Catalog, FormationLookup};
pub use config::{CategoryFilter, ConceptReuse, GenerateOptions, PlannerConfig};
pub use error::{CatalogError, ConfigError, PlaybookError, Result, TemplateError};
pub use materialize::{materialize_play, materialize_selected, save_selected, MemorySink, PlaySink};
pub use models::{Action, Concept, FormationSpec, GeneratedPlay, PlayDocument, Player, Point};
pub use planner::plan_playbook;
pub use provider::{Clock, FixedClock, IdProvider, SequentialIds, SystemClock, UuidIds};
pub use scoring::{rank_concepts, score_concept, ConceptScore, ScoredConcept};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
