//! Tool-call boundary: `call(tool name, argument bag) -> output`.
//!
//! The dispatcher owns the process-wide context (catalog, renderer, clock, output directory)
//! and runs resolve → validate → assemble for each call. Every per-call failure is turned into
//! [`ToolOutput::Error`] here; nothing escapes to the transport.

pub mod request;
pub mod response;

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::RuleCatalog;
use crate::clock::{form_date, Clock};
use crate::domain::permit::{PermitDefinition, PermitRequirement};
use crate::domain::project::ProjectData;
use crate::errors::DispatchError;
use crate::preview::{render_all_permits_preview, render_permit_preview, NO_PERMITS_PREVIEW};
use crate::render::DocumentRenderer;
use crate::resolver::PermitResolver;
use crate::submission::SubmissionAssembler;
use crate::validation::validate_required_fields;

pub use request::{IdentifyPermitsArgs, NoArgs, PermitArgs, ProjectArgs, ToolRequest, TOOL_NAMES};
pub use response::{
    FillAllResponse, FillFailure, FillOutcome, IdentifyResponse, ListResponse, ToolOutput,
    ValidateResponse, ALL_PERMITS_PROCESSED, NO_PERMITS_TO_FILL,
};

pub struct ToolDispatcher {
    catalog: Arc<RuleCatalog>,
    resolver: PermitResolver,
    assembler: SubmissionAssembler,
    clock: Arc<dyn Clock>,
}

impl ToolDispatcher {
    pub fn new(
        catalog: Arc<RuleCatalog>,
        renderer: Arc<dyn DocumentRenderer>,
        clock: Arc<dyn Clock>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver: PermitResolver::new(Arc::clone(&catalog)),
            assembler: SubmissionAssembler::new(renderer, Arc::clone(&clock), output_dir),
            catalog,
            clock,
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Parses an untyped argument bag for `tool_name` and runs it.
    pub fn call(&self, tool_name: &str, arguments: Option<Value>) -> ToolOutput {
        match ToolRequest::parse(tool_name, arguments) {
            Ok(request) => self.handle(request),
            Err(error) => failure(tool_name, error),
        }
    }

    pub fn handle(&self, request: ToolRequest) -> ToolOutput {
        let tool_name = request.tool_name();
        info!(event_name = "permit.tool.called", tool = tool_name, "tool call received");

        match self.execute(request) {
            Ok(output) => output,
            Err(error) => failure(tool_name, error),
        }
    }

    fn execute(&self, request: ToolRequest) -> Result<ToolOutput, DispatchError> {
        let output = match request {
            ToolRequest::IdentifyRequiredPermits(args) => ToolOutput::json(&self.identify(&args)),
            ToolRequest::PreviewPermit(args) => ToolOutput::Text(self.preview_permit(&args)?),
            ToolRequest::PreviewAllPermits(args) => ToolOutput::Text(self.preview_all(&args)),
            ToolRequest::FillPermitForm(args) => self.fill_permit(&args)?,
            ToolRequest::FillAllRequiredPermits(args) => match self.fill_all(&args) {
                Some(response) => ToolOutput::json(&response),
                None => ToolOutput::Text(NO_PERMITS_TO_FILL.to_string()),
            },
            ToolRequest::ListAvailablePermits => ToolOutput::json(&self.list()),
            ToolRequest::ValidatePermitData(args) => ToolOutput::json(&self.validate(&args)?),
        };
        Ok(output)
    }

    pub fn identify(&self, args: &IdentifyPermitsArgs) -> IdentifyResponse {
        let required = self
            .resolver
            .resolve(&args.project_description, &args.work_types)
            .into_iter()
            .map(PermitDefinition::requirement)
            .collect::<Vec<PermitRequirement>>();
        IdentifyResponse::new(required)
    }

    pub fn preview_permit(&self, args: &PermitArgs) -> Result<String, DispatchError> {
        let permit = self.permit(&args.permit_id)?;
        let validation = validate_required_fields(&args.project_data, &permit.required_fields);
        let today = form_date(self.clock.now());
        Ok(render_permit_preview(permit, &args.project_data, &validation, &today))
    }

    pub fn preview_all(&self, args: &ProjectArgs) -> String {
        let permits = self.resolver.resolve(&args.project_description, &args.work_types);
        if permits.is_empty() {
            return NO_PERMITS_PREVIEW.to_string();
        }

        let entries: Vec<_> = permits
            .into_iter()
            .map(|permit| {
                (permit, validate_required_fields(&args.project_data, &permit.required_fields))
            })
            .collect();
        render_all_permits_preview(&entries, &args.project_data)
    }

    /// Validates then submits one permit. Missing fields are a normal JSON reply, not an error.
    pub fn fill_permit(&self, args: &PermitArgs) -> Result<ToolOutput, DispatchError> {
        let permit = self.permit(&args.permit_id)?;
        let validation = validate_required_fields(&args.project_data, &permit.required_fields);
        if !validation.valid {
            let failure =
                FillFailure::missing_fields(None, &permit.name, validation.missing_fields);
            return Ok(ToolOutput::json(&failure));
        }

        let receipt = self.assembler.submit(permit, &args.project_data)?;
        Ok(ToolOutput::json(&receipt))
    }

    /// Fills every resolved permit independently; `None` when the project needs no permit.
    pub fn fill_all(&self, args: &ProjectArgs) -> Option<FillAllResponse> {
        let permits = self.resolver.resolve(&args.project_description, &args.work_types);
        if permits.is_empty() {
            return None;
        }

        let results: Vec<FillOutcome> =
            permits.into_iter().map(|permit| self.fill_one(permit, &args.project_data)).collect();
        let saved = results.iter().filter(|outcome| outcome.is_saved()).count();
        info!(
            event_name = "permit.fill_all.completed",
            total = results.len(),
            saved,
            "processed all required permits"
        );

        Some(FillAllResponse {
            total_permits: results.len(),
            results,
            message: ALL_PERMITS_PROCESSED.to_string(),
        })
    }

    fn fill_one(&self, permit: &PermitDefinition, data: &ProjectData) -> FillOutcome {
        let validation = validate_required_fields(data, &permit.required_fields);
        if !validation.valid {
            return FillOutcome::Failed(FillFailure::missing_fields(
                Some(permit.id.clone()),
                &permit.name,
                validation.missing_fields,
            ));
        }

        match self.assembler.submit(permit, data) {
            Ok(receipt) => FillOutcome::Saved(receipt),
            Err(error) => {
                warn!(
                    event_name = "permit.fill_all.item_failed",
                    permit_id = %permit.id,
                    error = %error,
                    "permit could not be filled"
                );
                FillOutcome::Failed(FillFailure::error(permit.id.clone(), &permit.name, error))
            }
        }
    }

    pub fn list(&self) -> ListResponse {
        let permits = self.catalog.list();
        ListResponse { count: permits.len(), permits }
    }

    pub fn validate(&self, args: &PermitArgs) -> Result<ValidateResponse, DispatchError> {
        let permit = self.permit(&args.permit_id)?;
        let validation = validate_required_fields(&args.project_data, &permit.required_fields);
        Ok(ValidateResponse {
            permit_id: permit.id.clone(),
            permit_name: permit.name.clone(),
            valid: validation.valid,
            missing_fields: validation.missing_fields,
            required_fields: permit.required_fields.clone(),
        })
    }

    fn permit(&self, permit_id: &str) -> Result<&PermitDefinition, DispatchError> {
        self.catalog
            .get(permit_id)
            .ok_or_else(|| DispatchError::PermitNotFound(permit_id.to_string()))
    }
}

fn failure(tool_name: &str, error: DispatchError) -> ToolOutput {
    warn!(
        event_name = "permit.tool.failed",
        tool = tool_name,
        error_class = error.error_class(),
        error = %error,
        "tool call failed"
    );
    ToolOutput::Error(format!("Error: {error}"))
}
