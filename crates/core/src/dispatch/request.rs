use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::project::ProjectData;
use crate::errors::DispatchError;

pub const IDENTIFY_REQUIRED_PERMITS: &str = "identify_required_permits";
pub const PREVIEW_PERMIT: &str = "preview_permit";
pub const PREVIEW_ALL_PERMITS: &str = "preview_all_permits";
pub const FILL_PERMIT_FORM: &str = "fill_permit_form";
pub const FILL_ALL_REQUIRED_PERMITS: &str = "fill_all_required_permits";
pub const LIST_AVAILABLE_PERMITS: &str = "list_available_permits";
pub const VALIDATE_PERMIT_DATA: &str = "validate_permit_data";

pub const TOOL_NAMES: [&str; 7] = [
    IDENTIFY_REQUIRED_PERMITS,
    PREVIEW_PERMIT,
    PREVIEW_ALL_PERMITS,
    FILL_PERMIT_FORM,
    FILL_ALL_REQUIRED_PERMITS,
    LIST_AVAILABLE_PERMITS,
    VALIDATE_PERMIT_DATA,
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdentifyPermitsArgs {
    /// Description of the project work to be done
    pub project_description: String,
    /// Work types, e.g. ["construction", "electrical work"]
    #[serde(default)]
    pub work_types: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PermitArgs {
    /// ID of the permit, e.g. "building" or "electrical"
    pub permit_id: String,
    /// Project information keyed by field name, e.g. {"ownerName": "Jane Doe"}
    pub project_data: ProjectData,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectArgs {
    /// Description of the project
    pub project_description: String,
    /// Optional work types that also select permits
    #[serde(default)]
    pub work_types: Vec<String>,
    /// Complete project information keyed by field name
    pub project_data: ProjectData,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

/// A schema-checked tool invocation. Argument bags that do not fit the tool's shape are
/// rejected here, before any permit logic runs.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolRequest {
    IdentifyRequiredPermits(IdentifyPermitsArgs),
    PreviewPermit(PermitArgs),
    PreviewAllPermits(ProjectArgs),
    FillPermitForm(PermitArgs),
    FillAllRequiredPermits(ProjectArgs),
    ListAvailablePermits,
    ValidatePermitData(PermitArgs),
}

impl ToolRequest {
    pub fn parse(tool_name: &str, arguments: Option<Value>) -> Result<Self, DispatchError> {
        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(value) => value,
        };

        let request = match tool_name {
            IDENTIFY_REQUIRED_PERMITS => {
                Self::IdentifyRequiredPermits(parse_args(tool_name, arguments)?)
            }
            PREVIEW_PERMIT => Self::PreviewPermit(parse_args(tool_name, arguments)?),
            PREVIEW_ALL_PERMITS => Self::PreviewAllPermits(parse_args(tool_name, arguments)?),
            FILL_PERMIT_FORM => Self::FillPermitForm(parse_args(tool_name, arguments)?),
            FILL_ALL_REQUIRED_PERMITS => {
                Self::FillAllRequiredPermits(parse_args(tool_name, arguments)?)
            }
            LIST_AVAILABLE_PERMITS => {
                let NoArgs {} = parse_args(tool_name, arguments)?;
                Self::ListAvailablePermits
            }
            VALIDATE_PERMIT_DATA => Self::ValidatePermitData(parse_args(tool_name, arguments)?),
            other => return Err(DispatchError::UnknownTool(other.to_string())),
        };
        Ok(request)
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::IdentifyRequiredPermits(_) => IDENTIFY_REQUIRED_PERMITS,
            Self::PreviewPermit(_) => PREVIEW_PERMIT,
            Self::PreviewAllPermits(_) => PREVIEW_ALL_PERMITS,
            Self::FillPermitForm(_) => FILL_PERMIT_FORM,
            Self::FillAllRequiredPermits(_) => FILL_ALL_REQUIRED_PERMITS,
            Self::ListAvailablePermits => LIST_AVAILABLE_PERMITS,
            Self::ValidatePermitData(_) => VALIDATE_PERMIT_DATA,
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool_name: &str, arguments: Value) -> Result<T, DispatchError> {
    serde_json::from_value(arguments).map_err(|error| DispatchError::InvalidArguments {
        tool: tool_name.to_string(),
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ToolRequest, TOOL_NAMES};
    use crate::errors::DispatchError;

    #[test]
    fn every_tool_name_parses_into_its_request() {
        for name in TOOL_NAMES {
            let arguments = match name {
                "identify_required_permits" => json!({"projectDescription": "new wiring"}),
                "list_available_permits" => json!({}),
                "preview_permit" | "fill_permit_form" | "validate_permit_data" => {
                    json!({"permitId": "electrical", "projectData": {}})
                }
                _ => json!({"projectDescription": "new wiring", "projectData": {}}),
            };
            let request = ToolRequest::parse(name, Some(arguments)).expect("arguments fit schema");
            assert_eq!(request.tool_name(), name);
        }
    }

    #[test]
    fn work_types_default_to_empty() {
        let arguments = json!({"projectDescription": "x"});
        let request =
            ToolRequest::parse("identify_required_permits", Some(arguments)).expect("valid");
        match request {
            ToolRequest::IdentifyRequiredPermits(args) => assert!(args.work_types.is_empty()),
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn missing_arguments_are_treated_as_empty_object() {
        assert_eq!(
            ToolRequest::parse("list_available_permits", None).expect("no args needed"),
            ToolRequest::ListAvailablePermits
        );
    }

    #[test]
    fn unrecognized_shapes_are_rejected() {
        let unknown_key = ToolRequest::parse(
            "validate_permit_data",
            Some(json!({"permitId": "a", "projectData": {}, "extra": 1})),
        );
        assert!(matches!(unknown_key, Err(DispatchError::InvalidArguments { .. })));

        let wrong_type =
            ToolRequest::parse("preview_permit", Some(json!({"permitId": 7, "projectData": {}})));
        assert!(matches!(wrong_type, Err(DispatchError::InvalidArguments { .. })));

        let missing_data = ToolRequest::parse("fill_permit_form", Some(json!({"permitId": "a"})));
        assert!(matches!(missing_data, Err(DispatchError::InvalidArguments { .. })));
    }

    #[test]
    fn unknown_tool_is_rejected() {
        assert!(matches!(
            ToolRequest::parse("approve_everything", None),
            Err(DispatchError::UnknownTool(name)) if name == "approve_everything"
        ));
    }
}
