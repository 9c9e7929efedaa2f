//! MCP tools grouped by what they do to a project:
//! - Discovery: which permits exist and which a project needs
//! - Preview: show what would be written, without saving
//! - Filing: render and save completed forms

use permit_core::dispatch::request::{
    FILL_ALL_REQUIRED_PERMITS, FILL_PERMIT_FORM, IDENTIFY_REQUIRED_PERMITS,
    LIST_AVAILABLE_PERMITS, PREVIEW_ALL_PERMITS, PREVIEW_PERMIT, VALIDATE_PERMIT_DATA,
};

/// Discovery tools category
pub struct DiscoveryTools;

/// Preview tools category
pub struct PreviewTools;

/// Filing tools category
pub struct FilingTools;

/// Tool category trait
pub trait ToolCategory {
    /// Category name
    fn category_name() -> &'static str
    where
        Self: Sized;
    /// List of tool names in this category
    fn tool_names() -> &'static [&'static str]
    where
        Self: Sized;
}

impl ToolCategory for DiscoveryTools {
    fn category_name() -> &'static str {
        "discovery"
    }
    fn tool_names() -> &'static [&'static str] {
        &[IDENTIFY_REQUIRED_PERMITS, LIST_AVAILABLE_PERMITS, VALIDATE_PERMIT_DATA]
    }
}

impl ToolCategory for PreviewTools {
    fn category_name() -> &'static str {
        "preview"
    }
    fn tool_names() -> &'static [&'static str] {
        &[PREVIEW_PERMIT, PREVIEW_ALL_PERMITS]
    }
}

impl ToolCategory for FilingTools {
    fn category_name() -> &'static str {
        "filing"
    }
    fn tool_names() -> &'static [&'static str] {
        &[FILL_PERMIT_FORM, FILL_ALL_REQUIRED_PERMITS]
    }
}

/// Category owning `tool_name`, if it is one of ours.
pub fn category_of(tool_name: &str) -> Option<&'static str> {
    [
        (DiscoveryTools::category_name(), DiscoveryTools::tool_names()),
        (PreviewTools::category_name(), PreviewTools::tool_names()),
        (FilingTools::category_name(), FilingTools::tool_names()),
    ]
    .into_iter()
    .find(|(_, names)| names.contains(&tool_name))
    .map(|(category, _)| category)
}

/// All tool names
pub const ALL_TOOL_NAMES: &[&str] = &permit_core::dispatch::TOOL_NAMES;

/// Total number of tools
pub const TOTAL_TOOLS: usize = ALL_TOOL_NAMES.len();
