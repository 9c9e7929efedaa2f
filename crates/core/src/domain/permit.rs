use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermitId(pub String);

impl PermitId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A regulatory form type: what triggers it, what it needs, and which template renders it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitDefinition {
    pub id: PermitId,
    pub name: String,
    pub triggers: Vec<String>,
    pub required_fields: Vec<String>,
    pub template: String,
}

impl PermitDefinition {
    /// True when any trigger occurs in `search_text`, which must already be lower-cased.
    pub fn matches(&self, search_text: &str) -> bool {
        self.triggers.iter().any(|trigger| search_text.contains(&trigger.to_lowercase()))
    }

    pub fn summary(&self) -> PermitSummary {
        PermitSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            triggers: self.triggers.clone(),
        }
    }

    pub fn requirement(&self) -> PermitRequirement {
        PermitRequirement {
            id: self.id.clone(),
            name: self.name.clone(),
            template: self.template.clone(),
            required_fields: self.required_fields.clone(),
        }
    }
}

/// Catalog listing entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSummary {
    pub id: PermitId,
    pub name: String,
    pub triggers: Vec<String>,
}

/// Identification entry: what a caller needs to gather before filling the permit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitRequirement {
    pub id: PermitId,
    pub name: String,
    pub template: String,
    pub required_fields: Vec<String>,
}
