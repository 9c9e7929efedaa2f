use permit_core::config::{AppConfig, LoadOptions};
use permit_core::RuleCatalog;

use super::{exit, CommandResult};

const COMMAND: &str = "permits";

/// One line per permit: id, name, and the phrases that trigger it.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "config_validation",
                error.to_string(),
                exit::CONFIG,
            )
        }
    };

    let catalog = match RuleCatalog::load(&config.paths.rules_file) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(COMMAND, "rule_catalog", error.to_string(), exit::CATALOG)
        }
    };

    let mut lines = vec![format!("{} permit type(s):", catalog.len())];
    for permit in catalog.iter() {
        lines.push(format!(
            "  - {} ({}): triggers {}",
            permit.id,
            permit.name,
            permit.triggers.join(", ")
        ));
    }

    CommandResult::success(COMMAND, lines.join("\n"))
}
