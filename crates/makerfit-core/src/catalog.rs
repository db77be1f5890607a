use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_active() -> bool {
    true
}

/// A curated software product the scorer can recommend.
///
/// Owned by catalog management; the scorer only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareCatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub target_roles: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pricing_model: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl SoftwareCatalogItem {
    /// Whether any tag equals `tag`, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub items: Vec<SoftwareCatalogItem>,
}

/// Load and validate a software catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CatalogFileParse)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for item in &catalog.items {
        if item.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog item id must be non-empty".to_string(),
            ));
        }

        if item.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "catalog item '{}' must have a non-empty name",
                item.id
            )));
        }

        if !seen_ids.insert(item.id.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate catalog id: '{}'",
                item.id
            )));
        }

        if !seen_names.insert(item.name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate catalog name: '{}'",
                item.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> SoftwareCatalogItem {
        SoftwareCatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            category: "crm".to_string(),
            target_roles: vec![],
            tags: vec![],
            description: String::new(),
            pricing_model: None,
            website_url: None,
            key_features: vec![],
            pros: vec![],
            cons: vec![],
            active: true,
        }
    }

    #[test]
    fn yaml_defaults_optional_fields() {
        let yaml = "items:\n  - id: sw-1\n    name: Ledger Lite\n";
        let catalog: CatalogFile = serde_yaml::from_str(yaml).unwrap();
        let entry = &catalog.items[0];
        assert!(entry.active);
        assert!(entry.tags.is_empty());
        assert!(entry.pricing_model.is_none());
        assert_eq!(entry.category, "");
    }

    #[test]
    fn has_tag_ignores_case() {
        let mut entry = item("sw-1", "Board");
        entry.tags = vec!["Kanban".to_string()];
        assert!(entry.has_tag("kanban"));
        assert!(!entry.has_tag("scheduling"));
    }

    #[test]
    fn validate_rejects_empty_id() {
        let catalog = CatalogFile {
            items: vec![item("  ", "Ledger Lite")],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("id must be non-empty"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let catalog = CatalogFile {
            items: vec![item("sw-1", " ")],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("non-empty name"));
    }

    #[test]
    fn validate_rejects_duplicate_id() {
        let catalog = CatalogFile {
            items: vec![item("sw-1", "Ledger Lite"), item("SW-1", "Ledger Pro")],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate catalog id"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let catalog = CatalogFile {
            items: vec![item("sw-1", "Ledger Lite"), item("sw-2", "ledger lite")],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate catalog name"));
    }

    #[test]
    fn validate_accepts_valid_catalog() {
        let catalog = CatalogFile {
            items: vec![item("sw-1", "Ledger Lite"), item("sw-2", "Shift Board")],
        };
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn load_catalog_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("catalog.yaml");
        assert!(
            path.exists(),
            "catalog.yaml missing at {path:?}, required for this test"
        );
        let result = load_catalog(&path);
        assert!(result.is_ok(), "failed to load catalog.yaml: {result:?}");
        assert!(!result.unwrap().items.is_empty());
    }
}
