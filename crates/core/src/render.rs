//! Template rendering for permit documents.
//!
//! Permit templates are Tera files (Jinja-style `{{ ownerName }}` placeholders) stored under the
//! configured templates directory. The core only depends on [`DocumentRenderer`]; the Tera
//! implementation is one capability behind it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

/// Extension used when a template name carries none.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "html";

const TEMPLATE_SUFFIX: &str = ".tera";

/// Template names whose output is markup; caller values are escaped when rendering them.
const MARKUP_SUFFIXES: [&str; 6] =
    [".html", ".htm", ".xml", ".html.tera", ".htm.tera", ".xml.tera"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },
    #[error("template error in `{template}`: {message}")]
    Template { template: String, message: String },
    #[error("could not write `{}`: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub extension: String,
}

pub trait DocumentRenderer: Send + Sync {
    fn render(
        &self,
        template: &str,
        payload: &Map<String, Value>,
    ) -> Result<RenderedDocument, RenderError>;

    fn save(&self, document: &RenderedDocument, path: &Path) -> Result<(), RenderError>;
}

/// Register custom Tera filters used by permit templates.
///
/// - `checkbox`: `[X]` for yes-like values, `[ ]` otherwise, e.g. `{{ panelUpgrade | checkbox }}`
pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("checkbox", tera_checkbox_filter);
}

fn tera_checkbox_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let checked = match value {
        tera::Value::Bool(flag) => *flag,
        tera::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        tera::Value::String(text) => {
            matches!(text.trim().to_ascii_lowercase().as_str(), "yes" | "y" | "true" | "x" | "1")
        }
        _ => false,
    };
    Ok(tera::Value::String(if checked { "[X]" } else { "[ ]" }.to_string()))
}

/// Extension of the document a template produces: `building.html.tera` renders `html`.
pub fn document_extension(template: &str) -> String {
    let stripped = template.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(template);
    Path::new(stripped)
        .extension()
        .and_then(|extension| extension.to_str())
        .filter(|extension| !extension.is_empty())
        .unwrap_or(DEFAULT_DOCUMENT_EXTENSION)
        .to_string()
}

/// Renders templates read from disk on every call, so edited templates apply without restart.
#[derive(Clone, Debug)]
pub struct TeraDocumentRenderer {
    templates_dir: PathBuf,
}

impl TeraDocumentRenderer {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self { templates_dir: templates_dir.into() }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn template_path(&self, template: &str) -> PathBuf {
        self.templates_dir.join(template)
    }
}

impl DocumentRenderer for TeraDocumentRenderer {
    fn render(
        &self,
        template: &str,
        payload: &Map<String, Value>,
    ) -> Result<RenderedDocument, RenderError> {
        let path = self.template_path(template);
        if !path.is_file() {
            return Err(RenderError::TemplateNotFound { path });
        }

        let source = fs::read_to_string(&path)
            .map_err(|source| RenderError::Io { path: path.clone(), source })?;
        let template_error = |error: tera::Error| RenderError::Template {
            template: template.to_string(),
            message: describe(&error),
        };

        let mut tera = Tera::default();
        tera.autoescape_on(MARKUP_SUFFIXES.to_vec());
        tera.set_escape_fn(escape_markup);
        register_template_filters(&mut tera);
        tera.add_raw_template(template, &source).map_err(template_error)?;

        let context = Context::from_serialize(payload).map_err(template_error)?;
        let rendered = tera.render(template, &context).map_err(template_error)?;

        debug!(template = %template, bytes = rendered.len(), "permit template rendered");
        Ok(RenderedDocument {
            bytes: rendered.into_bytes(),
            extension: document_extension(template),
        })
    }

    fn save(&self, document: &RenderedDocument, path: &Path) -> Result<(), RenderError> {
        fs::write(path, &document.bytes)
            .map_err(|source| RenderError::Io { path: path.to_path_buf(), source })
    }
}

/// HTML escaping that leaves `/` alone, so dates like `03/07/2024` stay readable in the source.
fn escape_markup(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Tera nests the useful message (e.g. the undefined variable) in the error source chain.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
