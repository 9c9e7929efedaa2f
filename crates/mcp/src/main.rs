//! Permit Form Filler MCP Server Binary
//!
//! ## Usage
//!
//! ```bash
//! # Run with defaults (./data/permit_rules.json, ./templates/permits, ./output)
//! permit-mcp
//!
//! # Point at another rule catalog and output directory
//! PERMIT_RULES_FILE=/srv/permits/rules.json PERMIT_OUTPUT_DIR=/srv/filled permit-mcp
//! ```
//!
//! Stdout carries the MCP stream, so logs go to stderr and, when `logging.file` is set, are
//! appended to that file as well. `RUST_LOG` takes precedence over `logging.level`.

use std::fs::{self, OpenOptions};
use std::sync::Arc;

use anyhow::{Context, Result};
use permit_core::config::{AppConfig, LoadOptions};
use permit_mcp::{bootstrap, PermitMcpServer};
use tracing::{error, info};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

fn log_writer(config: &AppConfig) -> Result<BoxMakeWriter> {
    let Some(path) = &config.logging.file else {
        return Ok(BoxMakeWriter::new(std::io::stderr));
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not create log directory `{}`", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file `{}`", path.display()))?;

    Ok(BoxMakeWriter::new(std::io::stderr.and(Arc::new(file))))
}

fn init_logging(config: &AppConfig) -> Result<()> {
    use permit_core::config::LogFormat::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_writer(log_writer(config)?)
        .with_ansi(config.logging.file.is_none())
        .with_target(false)
        .with_env_filter(filter);

    match config.logging.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config)?;

    let app = match bootstrap::bootstrap_with_config(config) {
        Ok(app) => app,
        Err(err) => {
            error!(event_name = "system.bootstrap.failed", error = %err, "bootstrap failed");
            return Err(err.into());
        }
    };

    let server = PermitMcpServer::new(app.dispatcher, app.config.server.name.clone());
    tokio::select! {
        result = server.run_stdio() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!(event_name = "system.mcp.interrupted", "received interrupt, shutting down");
        }
    }

    Ok(())
}
