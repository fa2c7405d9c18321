//! Formation and concept catalogs
//!
//! The catalog is read-only content: formations keyed by name and an ordered
//! concept list. Catalog order matters, it is the tie-break for equal scores.

mod builtin;

pub use builtin::{builtin_catalog, BUILTIN_CATALOG_YAML};

use crate::error::CatalogError;
use crate::models::{Concept, FormationSpec};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Formation lookup by key
pub trait FormationLookup {
    fn formation(&self, key: &str) -> Option<&FormationSpec>;
}

impl FormationLookup for BTreeMap<String, FormationSpec> {
    fn formation(&self, key: &str) -> Option<&FormationSpec> {
        self.get(key)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub formations: BTreeMap<String, FormationSpec>,
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

impl FormationLookup for Catalog {
    fn formation(&self, key: &str) -> Option<&FormationSpec> {
        self.formations.get(key)
    }
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.check_identity()?;
        Ok(catalog)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        catalog.check_identity()?;
        Ok(catalog)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(CatalogError::UnsupportedFormat { path: path.display().to_string() }),
        }
    }

    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.id == id)
    }

    pub fn formation_keys(&self) -> impl Iterator<Item = &str> {
        self.formations.keys().map(String::as_str)
    }

    /// Concept ids are identities; a repeated id would defeat the planner's
    /// uniqueness guarantee.
    fn check_identity(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for concept in &self.concepts {
            if !seen.insert(concept.id.as_str()) {
                return Err(CatalogError::DuplicateConcept { id: concept.id.clone() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL_CATALOG: &str = r#"{
        "formations": {
            "ace": {"name": "Ace", "players": [
                {"role": "QB", "x": 0.5, "y": -0.1},
                {"role": "RB", "label": "RB", "x": 0.5, "y": -0.25}
            ]}
        },
        "concepts": [
            {"id": "run_iz", "name": "Inside Zone", "conceptType": "run", "category": "inside_zone"}
        ]
    }"#;

    #[test]
    fn test_catalog_from_json() {
        let catalog = Catalog::from_json_str(SMALL_CATALOG).unwrap();
        assert!(catalog.formation("ace").is_some());
        assert!(catalog.formation("nope").is_none());
        assert_eq!(catalog.concept("run_iz").unwrap().name, "Inside Zone");
    }

    #[test]
    fn test_duplicate_concept_id_rejected() {
        let json = r#"{"concepts": [
            {"id": "a", "name": "A", "conceptType": "pass"},
            {"id": "a", "name": "A2", "conceptType": "run"}
        ]}"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateConcept { ref id } if id == "a"));
    }

    #[test]
    fn test_catalog_from_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("catalog.json");
        std::fs::File::create(&json_path).unwrap().write_all(SMALL_CATALOG.as_bytes()).unwrap();
        assert_eq!(Catalog::from_path(&json_path).unwrap().concepts.len(), 1);

        let txt_path = dir.path().join("catalog.txt");
        std::fs::write(&txt_path, SMALL_CATALOG).unwrap();
        assert!(matches!(
            Catalog::from_path(&txt_path),
            Err(CatalogError::UnsupportedFormat { .. })
        ));
    }
}
