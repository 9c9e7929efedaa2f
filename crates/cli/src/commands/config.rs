use std::env;
use std::fs;
use std::path::Path;

use permit_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(stderr only)".to_string());

    let fields: [(&str, String, &[&str]); 7] = [
        ("paths.rules_file", config.paths.rules_file.display().to_string(), &["PERMIT_RULES_FILE"]),
        (
            "paths.templates_dir",
            config.paths.templates_dir.display().to_string(),
            &["PERMIT_TEMPLATES_DIR"],
        ),
        ("paths.output_dir", config.paths.output_dir.display().to_string(), &["PERMIT_OUTPUT_DIR"]),
        ("server.name", config.server.name.clone(), &["PERMIT_SERVER_NAME"]),
        (
            "logging.level",
            config.logging.level.clone(),
            &["PERMIT_LOGGING_LEVEL", "PERMIT_LOG_LEVEL"],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["PERMIT_LOGGING_FORMAT", "PERMIT_LOG_FORMAT"],
        ),
        ("logging.file", log_file, &["PERMIT_LOGGING_FILE", "PERMIT_LOG_FILE"]),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key_path, value, env_keys) in fields {
        let source =
            field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(render_line(key_path, &value, source));
    }

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let set_env_key = env_keys
        .iter()
        .find(|env_key| env::var(env_key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = set_env_key {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use super::contains_path;

    #[test]
    fn nested_keys_are_found_in_config_document() {
        let doc: toml::Value = "[paths]\noutput_dir = \"filled\"\n".parse().expect("valid toml");
        assert!(contains_path(&doc, "paths.output_dir"));
        assert!(!contains_path(&doc, "paths.rules_file"));
        assert!(!contains_path(&doc, "logging.level"));
    }
}
