//! Planner configuration and per-call generation options
//!
//! `PlannerConfig` holds process-wide knobs (viability floor, defaults, yard
//! scale, reuse policy). It can be loaded from a JSON file named by
//! `PLAYBOOK_CONFIG_PATH`; every field falls back to its default.

use crate::error::ConfigError;
use crate::models::YARD_SCALE;
use crate::scoring::DEFAULT_VIABILITY_FLOOR;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "PLAYBOOK_CONFIG_PATH";

pub const DEFAULT_TARGET_PLAY_COUNT: usize = 30;
pub const DEFAULT_PASS_RUN_RATIO: f64 = 0.5;

/// Whether a concept may appear more than once in one playbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConceptReuse {
    /// Each concept id is used at most once per generation run
    #[default]
    Never,
    /// The fill pass may reuse a concept against a different formation
    AcrossFormations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlannerConfig {
    /// Concepts scoring below this are never allocated
    pub viability_floor: u8,
    pub default_target_play_count: usize,
    /// Fraction of plays that should be pass concepts
    pub default_pass_run_ratio: f64,
    pub concept_reuse: ConceptReuse,
    /// Normalized units per yard of route depth
    pub yard_scale: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            viability_floor: DEFAULT_VIABILITY_FLOOR,
            default_target_play_count: DEFAULT_TARGET_PLAY_COUNT,
            default_pass_run_ratio: DEFAULT_PASS_RUN_RATIO,
            concept_reuse: ConceptReuse::Never,
            yard_scale: YARD_SCALE,
        }
    }
}

impl PlannerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viability_floor > 100 {
            return Err(ConfigError::Invalid(format!(
                "viability_floor must be at most 100, got {}",
                self.viability_floor
            )));
        }
        if !(0.0..=1.0).contains(&self.default_pass_run_ratio) {
            return Err(ConfigError::Invalid(format!(
                "default_pass_run_ratio must be within [0, 1], got {}",
                self.default_pass_run_ratio
            )));
        }
        if !self.yard_scale.is_finite() || self.yard_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "yard_scale must be finite and positive, got {}",
                self.yard_scale
            )));
        }
        Ok(())
    }

    /// Load from the file named by `PLAYBOOK_CONFIG_PATH`, defaults when unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };
        Self::from_path_str(path.trim())
    }

    fn from_path_str(path: &str) -> Result<Self, ConfigError> {
        if path.is_empty() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
        let config = Self::from_json(&content)?;
        tracing::info!(path, "loaded planner config");
        Ok(config)
    }
}

/// Allowed categories per concept type. An empty list allows every category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryFilter {
    #[serde(default)]
    pub pass: Vec<String>,
    #[serde(default)]
    pub run: Vec<String>,
}

/// One generation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenerateOptions {
    /// Formation keys, in allocation order
    pub formations: Vec<String>,
    #[serde(default, alias = "targetPlayCount")]
    pub target_play_count: Option<usize>,
    #[serde(default, alias = "passRunRatio")]
    pub pass_run_ratio: Option<f64>,
    #[serde(default, alias = "includeCategories")]
    pub include_categories: Option<CategoryFilter>,
}

impl GenerateOptions {
    pub fn new<I, S>(formations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { formations: formations.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn with_target(mut self, count: usize) -> Self {
        self.target_play_count = Some(count);
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.pass_run_ratio = Some(ratio);
        self
    }

    pub fn target(&self, config: &PlannerConfig) -> usize {
        self.target_play_count.unwrap_or(config.default_target_play_count)
    }

    /// Pass fraction, clamped into [0, 1]. NaN falls back to the default.
    pub fn ratio(&self, config: &PlannerConfig) -> f64 {
        match self.pass_run_ratio {
            Some(r) if !r.is_nan() => r.clamp(0.0, 1.0),
            _ => config.default_pass_run_ratio,
        }
    }
}
