//! Permit Form Filler MCP (Model Context Protocol) Server
//!
//! Exposes permit identification, preview and form filling to AI agents as seven MCP tools
//! over a stdio transport.
//!
//! ## Architecture
//!
//! - `bootstrap`: loads configuration and the rule catalog, prepares directories
//! - `PermitMcpServer`: tool router delegating every call to the core dispatcher
//! - `tools`: tool names grouped by category
//!
//! ## Example Usage
//!
//! ```no_run
//! use permit_core::config::LoadOptions;
//! use permit_mcp::{bootstrap, PermitMcpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = bootstrap::bootstrap(LoadOptions::default())?;
//!     PermitMcpServer::new(app.dispatcher, &app.config.server.name).run_stdio().await
//! }
//! ```

pub mod bootstrap;
mod server;
mod tools;

pub use bootstrap::{Application, BootstrapError};
pub use server::PermitMcpServer;
pub use tools::*;
