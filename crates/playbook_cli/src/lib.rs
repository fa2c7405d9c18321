//! Playbook CLI support library
//!
//! Catalog loading and playbook export with a SHA256 checksum, kept out of
//! `main.rs` so they can be tested without a terminal.

use anyhow::{Context, Result};
use playbook_core::{builtin_catalog, Catalog, GeneratedPlay, PlayDocument};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Export file schema version
pub const EXPORT_SCHEMA_VERSION: &str = "v1";

/// Playbook export written by `generate --out`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookExport {
    pub schema_version: String,
    pub formations: Vec<String>,
    pub plays: Vec<GeneratedPlay>,
    #[serde(default)]
    pub documents: Vec<PlayDocument>,
}

/// Export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub schema_version: String,
    /// SHA256 of the export file (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    pub size: u64,
    pub play_count: usize,
    pub document_count: usize,
}

/// Catalog from `path`, or the built-in one
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display())),
        None => Ok(builtin_catalog().context("Failed to parse built-in catalog")?.clone()),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write `export` as pretty JSON and describe what was written
pub fn write_export(path: &Path, export: &PlaybookExport) -> Result<ExportMetadata> {
    let json = serde_json::to_string_pretty(export).context("Failed to serialize playbook")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, &json).with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(ExportMetadata {
        schema_version: export.schema_version.clone(),
        checksum: sha256_hex(json.as_bytes()),
        created_at: chrono::Utc::now().to_rfc3339(),
        size: json.len() as u64,
        play_count: export.plays.len(),
        document_count: export.documents.len(),
    })
}

/// True when the file's checksum matches
pub fn verify_export(path: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read export file: {}", path.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Read an export back
pub fn load_export(path: &Path) -> Result<PlaybookExport> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read export file: {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to parse playbook export")
}
