//! MCP Server Implementation
//!
//! The tool router only advertises the seven tools and their argument schemas. Every
//! `tools/call` goes through [`ToolDispatcher::call`], so unknown tools and malformed
//! arguments come back as `Error: ...` tool results rather than protocol errors, and the
//! session stays up.

use std::sync::Arc;

use permit_core::dispatch::{IdentifyPermitsArgs, PermitArgs, ProjectArgs};
use permit_core::{ToolDispatcher, ToolOutput, ToolRequest};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool,
    },
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::tools::category_of;

/// Main MCP server for permit identification and form filling
#[derive(Clone)]
pub struct PermitMcpServer {
    dispatcher: Arc<ToolDispatcher>,
    name: String,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PermitMcpServer {
    pub fn new(dispatcher: Arc<ToolDispatcher>, name: impl Into<String>) -> Self {
        Self { dispatcher, name: name.into(), tool_router: Self::tool_router() }
    }

    /// Tools advertised to clients, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Run the server with stdio transport
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        info!(
            event_name = "system.mcp.starting",
            server_name = %self.name,
            "starting MCP server with stdio transport"
        );

        let service = self.serve(rmcp::transport::stdio()).await?;
        let quit_reason = service.waiting().await?;

        info!(
            event_name = "system.mcp.stopped",
            reason = ?quit_reason,
            "MCP server shutdown complete"
        );
        Ok(())
    }

    /// Runs a raw `tools/call` request: the tool name and argument object exactly as the
    /// client sent them.
    pub fn call(&self, tool_name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        log_dispatch(tool_name);
        into_result(self.dispatcher.call(tool_name, arguments.map(Value::Object)))
    }

    fn respond(&self, request: ToolRequest) -> Result<CallToolResult, McpError> {
        log_dispatch(request.tool_name());
        Ok(into_result(self.dispatcher.handle(request)))
    }

    #[tool(description = "Identifies which permits are needed based on project requirements")]
    pub async fn identify_required_permits(
        &self,
        Parameters(args): Parameters<IdentifyPermitsArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(ToolRequest::IdentifyRequiredPermits(args))
    }

    #[tool(
        description = "Preview what data will be filled in a permit before saving. \
                       Shows all fields and their values."
    )]
    pub async fn preview_permit(
        &self,
        Parameters(args): Parameters<PermitArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(ToolRequest::PreviewPermit(args))
    }

    #[tool(
        description = "Preview all required permits for a project at once. \
                       Shows what data will be in each permit."
    )]
    pub async fn preview_all_permits(
        &self,
        Parameters(args): Parameters<ProjectArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(ToolRequest::PreviewAllPermits(args))
    }

    #[tool(
        description = "Fills out and saves a specific permit form with project data. \
                       Use after previewing."
    )]
    pub async fn fill_permit_form(
        &self,
        Parameters(args): Parameters<PermitArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(ToolRequest::FillPermitForm(args))
    }

    #[tool(
        description = "Identifies and fills all required permits for a project in one go. \
                       Consider using preview_all_permits first."
    )]
    pub async fn fill_all_required_permits(
        &self,
        Parameters(args): Parameters<ProjectArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(ToolRequest::FillAllRequiredPermits(args))
    }

    #[tool(description = "Lists all available permit types")]
    pub async fn list_available_permits(&self) -> Result<CallToolResult, McpError> {
        self.respond(ToolRequest::ListAvailablePermits)
    }

    #[tool(
        description = "Validates if project data contains all required fields \
                       for a specific permit"
    )]
    pub async fn validate_permit_data(
        &self,
        Parameters(args): Parameters<PermitArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(ToolRequest::ValidatePermitData(args))
    }
}

fn log_dispatch(tool_name: &str) {
    debug!(
        event_name = "permit.mcp.tool_call",
        tool = tool_name,
        category = category_of(tool_name).unwrap_or("unknown"),
        "dispatching tool call"
    );
}

fn into_result(output: ToolOutput) -> CallToolResult {
    let is_error = output.is_error();
    let content = vec![Content::text(output.into_text())];
    if is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl ServerHandler for PermitMcpServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.call(&request.name, request.arguments))
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Permit form filler. Identify the permits a project needs, preview the \
                 filled forms, then fill and save them."
                    .to_string(),
            ),
        }
    }
}
