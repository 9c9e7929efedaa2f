use crate::domain::permit::PermitDefinition;
use crate::domain::project::ProjectData;
use crate::labels::field_label;
use crate::validation::ValidationResult;

const RULE_WIDTH: usize = 70;
const LABEL_WIDTH: usize = 40;
const NOT_PROVIDED: &str = "[NOT PROVIDED]";

pub const NO_PERMITS_PREVIEW: &str = "No permits required for this project description.";

/// Single-permit report: validation status, every required field, and the auto-filled dates.
pub fn render_permit_preview(
    permit: &PermitDefinition,
    data: &ProjectData,
    validation: &ValidationResult,
    today: &str,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut lines = vec![heavy.clone(), format!("PERMIT PREVIEW: {}", permit.name), heavy.clone()];
    lines.push(String::new());

    if validation.valid {
        lines.push("✓ All required fields present".to_string());
    } else {
        lines.push("⚠️  WARNING: Missing Required Fields".to_string());
        lines.push(format!("   Missing: {}", missing_labels(validation)));
    }
    lines.push(String::new());

    lines.push("FIELD VALUES:".to_string());
    lines.push(light.clone());
    lines.extend(field_lines(permit, data));
    lines.push(light);
    lines.push(String::new());

    lines.push("AUTO-FILLED FIELDS:".to_string());
    lines.push(format!("  {:.<32} {today}", "Application Date"));
    lines.push(format!("  {:.<32} {today}", "Permit Date"));
    lines.push(String::new());
    lines.push(heavy);
    lines.push(String::new());

    if validation.valid {
        lines.push("✓ This permit is ready to be saved.".to_string());
        lines.push(
            "  Use 'fill_permit_form' to save it, or provide updated data if needed.".to_string(),
        );
    } else {
        lines.push("⚠️  This permit is missing required fields.".to_string());
        lines.push("  Please provide the missing data before saving.".to_string());
    }

    lines.join("\n")
}

/// Multi-permit report for every permit a project resolved to.
pub fn render_all_permits_preview(
    entries: &[(&PermitDefinition, ValidationResult)],
    data: &ProjectData,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let hashes = "#".repeat(RULE_WIDTH);
    let mut lines = vec![heavy.clone(), "PREVIEW: ALL REQUIRED PERMITS".to_string(), heavy.clone()];
    lines.push(String::new());
    lines.push(format!("Total Permits Required: {}", entries.len()));
    lines.push(String::new());

    for (index, (permit, validation)) in entries.iter().enumerate() {
        lines.push(format!("\n{hashes}"));
        lines.push(format!("PERMIT {}: {}", index + 1, permit.name));
        lines.push(format!("{hashes}\n"));

        if validation.valid {
            lines.push("✓ Status: READY TO SAVE".to_string());
        } else {
            lines.push("⚠️  Status: MISSING FIELDS".to_string());
            lines.push(format!("   Missing: {}", missing_labels(validation)));
        }

        lines.push(String::new());
        lines.push("Required Fields:".to_string());
        lines.extend(field_lines(permit, data));
    }

    lines.push(format!("\n{heavy}"));
    lines.push("\nNEXT STEPS:".to_string());
    lines.push("  1. Review the data above".to_string());
    lines.push("  2. Provide any missing information".to_string());
    lines.push("  3. Use 'fill_all_required_permits' to save all permits".to_string());
    lines.push("     OR use 'fill_permit_form' to save individual permits".to_string());

    lines.join("\n")
}

fn missing_labels(validation: &ValidationResult) -> String {
    validation.missing_fields.iter().map(|field| field_label(field)).collect::<Vec<_>>().join(", ")
}

fn field_lines(permit: &PermitDefinition, data: &ProjectData) -> Vec<String> {
    permit
        .required_fields
        .iter()
        .map(|field| {
            let label = field_label(field);
            match data.display_value(field) {
                Some(value) => format!("  ✓  {label:.<width$} {value}", width = LABEL_WIDTH),
                None => format!("  ⚠️  {label:.<width$} {NOT_PROVIDED}", width = LABEL_WIDTH),
            }
        })
        .collect()
}
