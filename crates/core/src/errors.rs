use thiserror::Error;

use crate::submission::SubmissionError;

/// Per-call failures raised while serving one tool invocation. None of them is fatal to the
/// process: the dispatcher converts each into an error reply.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for `{tool}`: {message}")]
    InvalidArguments { tool: String, message: String },
    #[error("Permit not found: {0}")]
    PermitNotFound(String),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl DispatchError {
    /// Stable class name for logs and machine-readable CLI output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::PermitNotFound(_) => "not_found",
            Self::Submission(_) => "render",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::DispatchError;
    use crate::render::RenderError;
    use crate::submission::SubmissionError;

    #[test]
    fn not_found_message_names_the_permit() {
        let error = DispatchError::PermitNotFound("roofing".to_string());
        assert_eq!(error.to_string(), "Permit not found: roofing");
        assert_eq!(error.error_class(), "not_found");
    }

    #[test]
    fn render_failures_keep_the_underlying_message() {
        let error = DispatchError::from(SubmissionError::Render(RenderError::TemplateNotFound {
            path: PathBuf::from("templates/roofing.html.tera"),
        }));
        assert_eq!(error.error_class(), "render");
        assert_eq!(error.to_string(), "Template not found: templates/roofing.html.tera");
    }

    #[test]
    fn unknown_tool_is_reported_verbatim() {
        let error = DispatchError::UnknownTool("delete_everything".to_string());
        assert_eq!(error.to_string(), "Unknown tool: delete_everything");
        assert_eq!(error.error_class(), "unknown_tool");
    }
}
