use serde::Serialize;
use serde_json::Value;

use crate::domain::permit::{PermitId, PermitRequirement, PermitSummary};
use crate::submission::SubmissionReceipt;

pub const MISSING_FIELDS_ERROR: &str = "Missing required fields";
pub const NO_PERMITS_TO_FILL: &str = "No permits required for this project";
pub const ALL_PERMITS_PROCESSED: &str = "All required permits have been processed";

/// What a tool call hands back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolOutput {
    Json(Value),
    Text(String),
    /// Per-call failure, already phrased for the caller (`Error: ...`).
    Error(String),
}

impl ToolOutput {
    pub fn json<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self::Json(value),
            Err(error) => Self::Error(format!("Error: could not serialize result: {error}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) | Self::Error(text) => text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResponse {
    pub required_permits: Vec<PermitRequirement>,
    pub count: usize,
    pub message: String,
}

impl IdentifyResponse {
    pub fn new(required_permits: Vec<PermitRequirement>) -> Self {
        let count = required_permits.len();
        let message = if count == 0 {
            "No permits required based on description".to_string()
        } else {
            format!("Found {count} required permit(s)")
        };
        Self { required_permits, count, message }
    }
}

/// Result of one fill attempt that did not produce a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillFailure {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_id: Option<PermitId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_name: Option<String>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl FillFailure {
    pub fn missing_fields(
        permit_id: Option<PermitId>,
        permit_name: &str,
        missing_fields: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            permit_id,
            permit_name: Some(permit_name.to_string()),
            error: MISSING_FIELDS_ERROR.to_string(),
            missing_fields: Some(missing_fields),
        }
    }

    pub fn error(permit_id: PermitId, permit_name: &str, error: impl ToString) -> Self {
        Self {
            success: false,
            permit_id: Some(permit_id),
            permit_name: Some(permit_name.to_string()),
            error: error.to_string(),
            missing_fields: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FillOutcome {
    Saved(SubmissionReceipt),
    Failed(FillFailure),
}

impl FillOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillAllResponse {
    pub total_permits: usize,
    pub results: Vec<FillOutcome>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListResponse {
    pub permits: Vec<PermitSummary>,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub permit_id: PermitId,
    pub permit_name: String,
    pub valid: bool,
    pub missing_fields: Vec<String>,
    pub required_fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FillFailure, IdentifyResponse, ToolOutput};
    use crate::domain::permit::PermitId;

    #[test]
    fn identify_message_reflects_count() {
        assert_eq!(
            IdentifyResponse::new(Vec::new()).message,
            "No permits required based on description"
        );
    }

    #[test]
    fn single_fill_failure_omits_permit_id() {
        let failure =
            FillFailure::missing_fields(None, "Electrical Permit", vec!["ownerName".into()]);
        assert_eq!(
            serde_json::to_value(failure).expect("serializable"),
            json!({
                "success": false,
                "permitName": "Electrical Permit",
                "error": "Missing required fields",
                "missingFields": ["ownerName"]
            })
        );
    }

    #[test]
    fn render_failure_has_no_missing_fields_key() {
        let failure =
            FillFailure::error(PermitId::from("plumbing"), "Plumbing Permit", "disk full");
        let value = serde_json::to_value(failure).expect("serializable");
        assert_eq!(value["permitId"], "plumbing");
        assert!(value.get("missingFields").is_none());
    }

    #[test]
    fn json_output_is_pretty_printed() {
        let output = ToolOutput::json(&json!({"count": 0}));
        assert!(!output.is_error());
        assert_eq!(output.into_text(), "{\n  \"count\": 0\n}");
    }
}
