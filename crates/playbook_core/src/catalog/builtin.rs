//! Embedded default catalog
//!
//! `include_str!` bakes the YAML into the binary; it is parsed once per
//! process on first use.

use super::Catalog;
use crate::error::CatalogError;
use once_cell::sync::OnceCell;

/// Built-in formations and concepts (~20KB YAML)
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../../data/catalog.yaml");

static BUILTIN: OnceCell<Catalog> = OnceCell::new();

/// Process-wide built-in catalog
pub fn builtin_catalog() -> Result<&'static Catalog, CatalogError> {
    BUILTIN.get_or_try_init(|| Catalog::from_yaml_str(BUILTIN_CATALOG_YAML))
}
