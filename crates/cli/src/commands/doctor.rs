use std::fs;
use std::path::Path;

use permit_core::config::{AppConfig, LoadOptions};
use permit_core::RuleCatalog;
use serde::Serialize;

use super::{exit, CommandResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

impl DoctorCheck {
    fn pass(name: &'static str, details: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Pass, details: details.into() }
    }

    fn fail(name: &'static str, details: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Fail, details: details.into() }
    }

    fn skipped(name: &'static str, reason: &str) -> Self {
        Self { name, status: CheckStatus::Skipped, details: format!("skipped because {reason}") }
    }
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { exit::DOCTOR };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck::pass(
                "config_validation",
                "configuration loaded and validated",
            ));
            match RuleCatalog::load(&config.paths.rules_file) {
                Ok(catalog) => {
                    checks.push(DoctorCheck::pass(
                        "rule_catalog",
                        format!(
                            "{} permit(s) loaded from `{}`",
                            catalog.len(),
                            config.paths.rules_file.display()
                        ),
                    ));
                    checks.push(check_templates(&catalog, &config.paths.templates_dir));
                }
                Err(error) => {
                    checks.push(DoctorCheck::fail("rule_catalog", error.to_string()));
                    checks.push(DoctorCheck::skipped(
                        "permit_templates",
                        "the rule catalog did not load",
                    ));
                }
            }
            checks.push(check_output_dir(&config.paths.output_dir));
        }
        Err(error) => {
            let reason = "configuration did not load";
            checks.push(DoctorCheck::fail("config_validation", error.to_string()));
            checks.push(DoctorCheck::skipped("rule_catalog", reason));
            checks.push(DoctorCheck::skipped("permit_templates", reason));
            checks.push(DoctorCheck::skipped("output_directory", reason));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_templates(catalog: &RuleCatalog, templates_dir: &Path) -> DoctorCheck {
    let missing: Vec<&str> = catalog
        .iter()
        .map(|permit| permit.template.as_str())
        .filter(|template| !templates_dir.join(template).is_file())
        .collect();

    if missing.is_empty() {
        DoctorCheck::pass(
            "permit_templates",
            format!("all {} template(s) present in `{}`", catalog.len(), templates_dir.display()),
        )
    } else {
        DoctorCheck::fail(
            "permit_templates",
            format!("missing in `{}`: {}", templates_dir.display(), missing.join(", ")),
        )
    }
}

fn check_output_dir(output_dir: &Path) -> DoctorCheck {
    let marker = output_dir.join(".permit-doctor-write-check");
    let result = fs::create_dir_all(output_dir)
        .and_then(|()| fs::write(&marker, b"ok"))
        .and_then(|()| fs::remove_file(&marker));

    match result {
        Ok(()) => DoctorCheck::pass(
            "output_directory",
            format!("`{}` is writable", output_dir.display()),
        ),
        Err(error) => DoctorCheck::fail(
            "output_directory",
            format!("`{}` is not writable: {error}", output_dir.display()),
        ),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
