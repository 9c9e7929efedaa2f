use permit_core::config::LoadOptions;
use permit_mcp::bootstrap::{bootstrap, BootstrapError};
use serde_json::Value;

use super::{exit, CommandResult};

const COMMAND: &str = "call";

/// Runs `tool` once against the configured catalog, printing exactly what an MCP client
/// would receive as the tool's text content.
pub fn run(tool: &str, raw_args: Option<&str>) -> CommandResult {
    let arguments = match raw_args.map(|raw| serde_json::from_str::<Value>(raw)).transpose() {
        Ok(arguments) => arguments,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "invalid_arguments",
                format!("--args is not valid JSON: {error}"),
                exit::TOOL,
            )
        }
    };

    let app = match bootstrap(LoadOptions::default()) {
        Ok(app) => app,
        Err(error) => {
            let (error_class, exit_code) = match error {
                BootstrapError::Config(_) => ("config_validation", exit::CONFIG),
                _ => ("bootstrap", exit::CATALOG),
            };
            return CommandResult::failure(COMMAND, error_class, error.to_string(), exit_code);
        }
    };

    let output = app.dispatcher.call(tool, arguments);
    let exit_code = if output.is_error() { exit::TOOL } else { 0 };
    CommandResult { exit_code, output: output.into_text() }
}
