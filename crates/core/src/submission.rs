//! Turns a validated permit request into a saved document.
//!
//! Output files are named `{permit id}-permit-{YYYYMMDD-HHMMSS}.{ext}`. The stamp has one-second
//! resolution: a second submission of the same permit within the same second overwrites the
//! first file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

use crate::clock::{file_timestamp, form_date, Clock};
use crate::domain::permit::{PermitDefinition, PermitId};
use crate::domain::project::ProjectData;
use crate::render::{DocumentRenderer, RenderError};

/// Date fields filled from the invocation time. They replace caller values of the same name.
pub const AUTO_DATE_FIELDS: [&str; 3] = ["permitDate", "applicationDate", "currentDate"];
pub const AUTO_YEAR_FIELD: &str = "year";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    pub permit_id: PermitId,
    pub permit_name: String,
    pub output_file_name: String,
    pub output_path: String,
    pub message: String,
}

pub struct SubmissionAssembler {
    renderer: Arc<dyn DocumentRenderer>,
    clock: Arc<dyn Clock>,
    output_dir: PathBuf,
}

impl SubmissionAssembler {
    pub fn new(
        renderer: Arc<dyn DocumentRenderer>,
        clock: Arc<dyn Clock>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self { renderer, clock, output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders and saves `permit` with `data`. Callers validate required fields beforehand.
    pub fn submit(
        &self,
        permit: &PermitDefinition,
        data: &ProjectData,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let at = self.clock.now();
        let payload = render_payload(data, at);

        let document = self.renderer.render(&permit.template, &payload)?;
        let output_file_name = output_file_name(&permit.id, at, &document.extension);
        let output_path = self.output_dir.join(&output_file_name);
        self.renderer.save(&document, &output_path)?;

        let output_path = fs::canonicalize(&output_path).unwrap_or(output_path);
        info!(
            event_name = "permit.submission.saved",
            permit_id = %permit.id,
            output_path = %output_path.display(),
            "permit document saved"
        );

        Ok(SubmissionReceipt {
            success: true,
            permit_id: permit.id.clone(),
            permit_name: permit.name.clone(),
            output_file_name,
            output_path: output_path.display().to_string(),
            message: format!("{} has been filled and saved", permit.name),
        })
    }
}

/// Caller data plus the auto-filled date and year fields.
pub fn render_payload(data: &ProjectData, at: NaiveDateTime) -> Map<String, Value> {
    let mut payload = data.clone().into_inner();
    let date = form_date(at);
    for field in AUTO_DATE_FIELDS {
        payload.insert(field.to_string(), Value::String(date.clone()));
    }
    payload.insert(AUTO_YEAR_FIELD.to_string(), Value::from(at.year()));
    payload
}

pub fn output_file_name(permit_id: &PermitId, at: NaiveDateTime, extension: &str) -> String {
    format!("{permit_id}-permit-{}.{extension}", file_timestamp(at))
}
