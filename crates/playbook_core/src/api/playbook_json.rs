//! Playbook generation and formation scoring over JSON
//!
//! Both endpoints run against the built-in catalog. The typed cores
//! ([`generate_playbook`], [`score_formation`]) take any catalog plus
//! injected id/clock sources.

use super::{ApiError, ApiResponse, API_VERSION};
use crate::analysis::{analyze_formation, FormationContext};
use crate::builder::routes::RouteRegistry;
use crate::builder::ActionBuilder;
use crate::catalog::{builtin_catalog, Catalog, FormationLookup};
use crate::config::{GenerateOptions, PlannerConfig};
use crate::error::{PlaybookError, Result};
use crate::materialize::materialize_selected;
use crate::models::{ConceptType, GeneratedPlay, PlayDocument};
use crate::planner::plan_playbook;
use crate::provider::{Clock, IdProvider, SystemClock, UuidIds};
use crate::scoring::score_concept;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PlaybookRequest {
    #[serde(default)]
    pub schema_version: Option<String>,
    #[serde(flatten)]
    pub options: GenerateOptions,
    /// Also build geometry for every selected play
    #[serde(default)]
    pub materialize: bool,
    /// Overrides the process configuration for this call
    #[serde(default)]
    pub config: Option<PlannerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookResponse {
    pub requested: usize,
    pub generated: usize,
    pub plays: Vec<GeneratedPlay>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<PlayDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoreFormationRequest {
    #[serde(default)]
    pub schema_version: Option<String>,
    pub formation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptScoreEntry {
    pub concept_id: String,
    pub concept_name: String,
    pub concept_type: ConceptType,
    pub score: u8,
    pub rationale: Vec<String>,
    /// At or above the viability floor
    pub viable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFormationResponse {
    pub formation_key: String,
    pub context: FormationContext,
    /// Every catalog concept, best first
    pub scores: Vec<ConceptScoreEntry>,
}

fn check_version(version: Option<&str>) -> Result<()> {
    match version {
        Some(v) if v != API_VERSION => {
            Err(PlaybookError::InvalidRequest(format!("Unsupported schema version: {v}")))
        }
        _ => Ok(()),
    }
}

/// Plan (and optionally materialize) a playbook from `catalog`.
pub fn generate_playbook(
    catalog: &Catalog,
    request: &PlaybookRequest,
    base_config: &PlannerConfig,
    ids: &mut dyn IdProvider,
    clock: &dyn Clock,
) -> Result<PlaybookResponse> {
    check_version(request.schema_version.as_deref())?;
    if request.options.formations.is_empty() {
        return Err(PlaybookError::InvalidRequest("No formations requested".to_string()));
    }

    let config = request.config.as_ref().unwrap_or(base_config);
    config.validate()?;

    let plays = plan_playbook(catalog, &catalog.concepts, &request.options, config, ids);
    let documents = if request.materialize {
        let builder = ActionBuilder::new(RouteRegistry::standard(), config.yard_scale);
        materialize_selected(&plays, catalog, &builder, ids, clock)
    } else {
        Vec::new()
    };

    Ok(PlaybookResponse {
        requested: request.options.target(config),
        generated: plays.len(),
        plays,
        documents,
    })
}

/// Score every concept in `catalog` against one formation.
pub fn score_formation(
    catalog: &Catalog,
    formation_key: &str,
    config: &PlannerConfig,
) -> Result<ScoreFormationResponse> {
    let spec = catalog
        .formation(formation_key)
        .ok_or_else(|| PlaybookError::InvalidRequest(format!("Unknown formation: {formation_key}")))?;
    let context = analyze_formation(spec);

    let mut scores: Vec<ConceptScoreEntry> = catalog
        .concepts
        .iter()
        .map(|concept| {
            let s = score_concept(concept, &context);
            ConceptScoreEntry {
                concept_id: concept.id.clone(),
                concept_name: concept.name.clone(),
                concept_type: concept.concept_type,
                viable: s.score >= config.viability_floor,
                score: s.score,
                rationale: s.rationale,
            }
        })
        .collect();
    scores.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(ScoreFormationResponse { formation_key: formation_key.to_string(), context, scores })
}

fn error_code(e: &PlaybookError) -> &'static str {
    match e {
        PlaybookError::InvalidRequest(_) => "INVALID_REQUEST",
        PlaybookError::Config(_) => "INVALID_CONFIG",
        PlaybookError::Catalog(_) => "CATALOG_ERROR",
        PlaybookError::Template(_) => "TEMPLATE_ERROR",
    }
}

fn respond<T: Serialize>(result: Result<T>) -> String {
    match result {
        Ok(data) => ApiResponse::success(data).to_json(),
        Err(e) => {
            warn!("Playbook request failed: {}", e);
            ApiResponse::<T>::error(ApiError::new(error_code(&e), e.to_string())).to_json()
        }
    }
}

fn builtin() -> Result<&'static Catalog> {
    Ok(builtin_catalog()?)
}

/// Generate a playbook from the built-in catalog.
pub fn generate_playbook_json(request_json: &str) -> String {
    let request: PlaybookRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            let error = ApiError::new("INVALID_JSON", format!("Invalid JSON format: {}", e));
            return ApiResponse::<PlaybookResponse>::error(error).to_json();
        }
    };
    info!("Processing playbook request for {} formations", request.options.formations.len());

    respond(builtin().and_then(|catalog| {
        let config = PlannerConfig::from_env()?;
        generate_playbook(catalog, &request, &config, &mut UuidIds, &SystemClock)
    }))
}

/// Score every built-in concept against one built-in formation.
pub fn score_formation_json(request_json: &str) -> String {
    let request: ScoreFormationRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            let error = ApiError::new("INVALID_JSON", format!("Invalid JSON format: {}", e));
            return ApiResponse::<ScoreFormationResponse>::error(error).to_json();
        }
    };

    respond(builtin().and_then(|catalog| {
        check_version(request.schema_version.as_deref())?;
        let config = PlannerConfig::from_env()?;
        score_formation(catalog, &request.formation, &config)
    }))
}

/// JSON schema of [`PlaybookRequest`], pretty printed
pub fn playbook_request_schema() -> String {
    let schema = schemars::schema_for!(PlaybookRequest);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
