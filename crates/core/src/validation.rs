use serde::{Deserialize, Serialize};

use crate::domain::project::ProjectData;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub missing_fields: Vec<String>,
}

/// Reports the required fields that `data` leaves absent or blank, in `required` order.
pub fn validate_required_fields<S: AsRef<str>>(
    data: &ProjectData,
    required: &[S],
) -> ValidationResult {
    let missing_fields: Vec<String> = required
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| !data.is_provided(field))
        .map(str::to_string)
        .collect();

    ValidationResult { valid: missing_fields.is_empty(), missing_fields }
}
