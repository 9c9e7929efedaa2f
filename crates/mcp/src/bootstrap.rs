use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use permit_core::config::{AppConfig, ConfigError, LoadOptions};
use permit_core::{CatalogError, RuleCatalog, SystemClock, TeraDocumentRenderer, ToolDispatcher};
use thiserror::Error;
use tracing::{info, warn};

pub struct Application {
    pub config: AppConfig,
    pub dispatcher: Arc<ToolDispatcher>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("permit rules file not found: `{0}`")]
    MissingRulesFile(PathBuf),
    #[error("permit rules could not be loaded: {0}")]
    Catalog(#[from] CatalogError),
    #[error("could not create directory `{path}`: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Loads the rule catalog and prepares template and output directories for `config`.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        rules_file = %config.paths.rules_file.display(),
        "starting permit server bootstrap"
    );

    let rules_file = &config.paths.rules_file;
    if !rules_file.is_file() {
        return Err(BootstrapError::MissingRulesFile(rules_file.clone()));
    }
    let catalog = Arc::new(RuleCatalog::load(rules_file)?);

    let templates_dir = &config.paths.templates_dir;
    if !templates_dir.is_dir() {
        warn!(
            event_name = "system.bootstrap.templates_missing",
            templates_dir = %templates_dir.display(),
            "templates directory not found, creating it; fills fail until templates are added"
        );
        create_dir(templates_dir)?;
    }
    create_dir(&config.paths.output_dir)?;

    let dispatcher = ToolDispatcher::new(
        Arc::clone(&catalog),
        Arc::new(TeraDocumentRenderer::new(templates_dir.clone())),
        Arc::new(SystemClock),
        config.paths.output_dir.clone(),
    );
    info!(
        event_name = "system.bootstrap.ready",
        permits = catalog.len(),
        output_dir = %config.paths.output_dir.display(),
        "permit server ready"
    );

    Ok(Application { config, dispatcher: Arc::new(dispatcher) })
}

fn create_dir(path: &std::path::Path) -> Result<(), BootstrapError> {
    fs::create_dir_all(path)
        .map_err(|source| BootstrapError::CreateDir { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use permit_core::config::AppConfig;
    use tempfile::TempDir;

    use super::{bootstrap_with_config, BootstrapError};

    const RULES: &str = r#"{"permits": [{
        "id": "fence",
        "name": "Fence Permit",
        "triggers": ["fence"],
        "requiredFields": ["ownerName"],
        "template": "fence.html.tera"
    }]}"#;

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.paths.rules_file = dir.path().join("rules.json");
        config.paths.templates_dir = dir.path().join("templates");
        config.paths.output_dir = dir.path().join("out/filled");
        config
    }

    #[test]
    fn missing_rules_file_is_fatal() {
        let dir = TempDir::new().expect("tempdir");
        let result = bootstrap_with_config(config_in(&dir));
        assert!(matches!(result, Err(BootstrapError::MissingRulesFile(_))));
    }

    #[test]
    fn malformed_rules_file_is_fatal() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("rules.json"), "{not json").expect("write rules");
        let result = bootstrap_with_config(config_in(&dir));
        assert!(matches!(result, Err(BootstrapError::Catalog(_))));
    }

    #[test]
    fn bootstrap_creates_missing_directories() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("rules.json"), RULES).expect("write rules");

        let app = bootstrap_with_config(config_in(&dir)).expect("bootstrap succeeds");

        assert_eq!(app.dispatcher.catalog().len(), 1);
        assert!(dir.path().join("templates").is_dir());
        assert!(dir.path().join("out/filled").is_dir());
    }
}
