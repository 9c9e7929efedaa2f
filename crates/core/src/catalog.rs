use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::permit::{PermitDefinition, PermitId, PermitSummary};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read permit rules `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse permit rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid permit rules: {0}")]
    Invariant(String),
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    permits: Vec<PermitDefinition>,
}

/// Permit definitions loaded once at startup, in source order.
#[derive(Clone, Debug, Default)]
pub struct RuleCatalog {
    permits: Vec<PermitDefinition>,
}

impl RuleCatalog {
    pub fn new(permits: Vec<PermitDefinition>) -> Result<Self, CatalogError> {
        validate_permits(&permits)?;
        Ok(Self { permits })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let catalog = Self::from_json_str(&raw)?;

        info!(
            event_name = "permit.catalog.loaded",
            path = %path.display(),
            permit_count = catalog.len(),
            "permit rules loaded"
        );
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: RuleDocument = serde_json::from_str(raw)?;
        Self::new(document.permits)
    }

    pub fn get(&self, permit_id: &str) -> Option<&PermitDefinition> {
        self.permits.iter().find(|permit| permit.id.as_str() == permit_id)
    }

    pub fn list(&self) -> Vec<PermitSummary> {
        self.permits.iter().map(PermitDefinition::summary).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PermitDefinition> {
        self.permits.iter()
    }

    pub fn len(&self) -> usize {
        self.permits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permits.is_empty()
    }
}

fn validate_permits(permits: &[PermitDefinition]) -> Result<(), CatalogError> {
    let mut seen_ids: HashSet<&PermitId> = HashSet::new();

    for (index, permit) in permits.iter().enumerate() {
        if permit.id.as_str().trim().is_empty() {
            return Err(CatalogError::Invariant(format!("permit #{index} has an empty id")));
        }
        if !seen_ids.insert(&permit.id) {
            return Err(CatalogError::Invariant(format!("duplicate permit id `{}`", permit.id)));
        }
        if permit.template.trim().is_empty() {
            return Err(CatalogError::Invariant(format!(
                "permit `{}` has an empty template reference",
                permit.id
            )));
        }
        if permit.triggers.iter().any(|trigger| trigger.is_empty()) {
            return Err(CatalogError::Invariant(format!(
                "permit `{}` has an empty trigger, which would match every project",
                permit.id
            )));
        }

        let mut seen_fields = HashSet::new();
        if let Some(field) = permit.required_fields.iter().find(|field| !seen_fields.insert(*field))
        {
            return Err(CatalogError::Invariant(format!(
                "permit `{}` lists required field `{field}` more than once",
                permit.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{CatalogError, RuleCatalog};

    const RULES: &str = r#"{
        "permits": [
            {
                "id": "building",
                "name": "Building Permit",
                "triggers": ["construction", "addition"],
                "requiredFields": ["projectAddress", "ownerName"],
                "template": "building_permit.html.tera"
            },
            {
                "id": "electrical",
                "name": "Electrical Permit",
                "triggers": ["electrical work", "wiring"],
                "requiredFields": ["ownerName", "electricianLicense"],
                "template": "electrical_permit.html.tera"
            }
        ]
    }"#;

    #[test]
    fn loads_rules_in_source_order() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("permit_rules.json");
        fs::write(&path, RULES).expect("write rules");

        let catalog = RuleCatalog::load(&path).expect("catalog loads");
        let ids: Vec<_> = catalog.list().into_iter().map(|summary| summary.id.0).collect();
        assert_eq!(ids, vec!["building", "electrical"]);
        assert_eq!(
            catalog.get("electrical").map(|permit| permit.name.as_str()),
            Some("Electrical Permit")
        );
        assert!(catalog.get("roofing").is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let result = RuleCatalog::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CatalogError::ReadFile { .. })));
    }

    #[test]
    fn document_without_permit_list_is_rejected() {
        let wrong_key = RuleCatalog::from_json_str(r#"{"rules": []}"#);
        assert!(matches!(wrong_key, Err(CatalogError::Parse(_))));
        assert!(matches!(RuleCatalog::from_json_str("not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn empty_trigger_is_rejected_at_load_time() {
        let raw = r#"{"permits": [{"id": "any", "name": "Any", "triggers": [""],
            "requiredFields": [], "template": "any.html.tera"}]}"#;
        let error = RuleCatalog::from_json_str(raw).expect_err("empty trigger must fail");
        assert!(error.to_string().contains("empty trigger"));
    }

    #[test]
    fn duplicate_ids_and_fields_are_rejected() {
        let duplicate_ids = r#"{"permits": [
            {"id": "a", "name": "A", "triggers": ["x"], "requiredFields": [], "template": "a"},
            {"id": "a", "name": "A2", "triggers": ["y"], "requiredFields": [], "template": "a"}
        ]}"#;
        assert!(matches!(
            RuleCatalog::from_json_str(duplicate_ids),
            Err(CatalogError::Invariant(message)) if message.contains("duplicate permit id")
        ));

        let duplicate_fields = r#"{"permits": [
            {"id": "a", "name": "A", "triggers": ["x"],
             "requiredFields": ["f", "f"], "template": "a"}
        ]}"#;
        assert!(matches!(
            RuleCatalog::from_json_str(duplicate_fields),
            Err(CatalogError::Invariant(message)) if message.contains("more than once")
        ));
    }

    #[test]
    fn blank_id_is_rejected() {
        let raw = r#"{"permits": [{"id": " ", "name": "Blank", "triggers": ["x"],
            "requiredFields": [], "template": "a"}]}"#;
        assert!(matches!(RuleCatalog::from_json_str(raw), Err(CatalogError::Invariant(_))));
    }
}
