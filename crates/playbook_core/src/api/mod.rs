//! JSON API layer
//!
//! String-in, string-out entry points for hosts that speak JSON (editor
//! front ends, scripting bridges). Every response uses the same envelope:
//! `success`, `data`, `error`, `schema_version`, `timestamp`.

pub mod playbook_json;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use playbook_json::{
    generate_playbook, generate_playbook_json, playbook_request_schema, score_formation,
    score_formation_json, ConceptScoreEntry, PlaybookRequest, PlaybookResponse, ScoreFormationRequest,
    ScoreFormationResponse,
};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), message: message.into() }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"success":false,"error":{"code":"SERIALIZATION","message":"Serialization failed"}}"#.to_string())
    }
}
