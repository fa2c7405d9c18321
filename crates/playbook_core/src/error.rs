use thiserror::Error;

/// Malformed concept template or roster data hit while building actions.
///
/// Caught per play by the materializer; never aborts a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Role '{role}' defines both a route and a block")]
    ConflictingRoleActions { role: String },

    #[error("Role '{role}' has a non-finite route depth")]
    NonFiniteDepth { role: String },

    #[error("Player '{player_id}' has a non-finite alignment")]
    NonFiniteAlignment { player_id: String },

    #[error("Duplicate player id in roster: {player_id}")]
    DuplicatePlayerId { player_id: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported catalog file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("Duplicate concept id: {id}")]
    DuplicateConcept { id: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum PlaybookError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, PlaybookError>;
