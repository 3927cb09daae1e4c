//! Handlebars template registry for receipts.

use std::borrow::Cow;
use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::config::schema::PresentationConfig;
use crate::render::{RenderError, RenderResult};

/// Registry name of the PDF receipt template.
pub const PDF_TEMPLATE: &str = "receipt_pdf";
/// Registry name of the email body template.
pub const EMAIL_TEMPLATE: &str = "receipt_email";

const BUILTIN_PDF_TEMPLATE: &str = include_str!("templates/receipt.hbs");
const BUILTIN_EMAIL_TEMPLATE: &str = include_str!("templates/mail.hbs");

/// Compiled templates keyed by name.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self {
            registry: Handlebars::new(),
        }
    }

    /// Engine with both receipt templates compiled.
    ///
    /// Override paths are read here, once; the built-in templates are used
    /// for anything not overridden.
    pub fn for_receipts(presentation: &PresentationConfig) -> RenderResult<Self> {
        let mut engine = Self::new();
        let pdf = load_source(presentation.pdf_template_path.as_deref(), BUILTIN_PDF_TEMPLATE)?;
        let email = load_source(
            presentation.email_template_path.as_deref(),
            BUILTIN_EMAIL_TEMPLATE,
        )?;
        engine.compile(PDF_TEMPLATE, &pdf)?;
        engine.compile(EMAIL_TEMPLATE, &email)?;
        Ok(engine)
    }

    /// Compile `source` and register it under `name`.
    pub fn compile(&mut self, name: &str, source: &str) -> RenderResult<()> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| RenderError::TemplateSyntax {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Render a registered template with `data`.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> RenderResult<String> {
        self.registry
            .render(name, data)
            .map_err(|e| RenderError::Template(e.to_string()))
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn load_source(path: Option<&Path>, builtin: &'static str) -> RenderResult<Cow<'static, str>> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|source| RenderError::TemplateLoad {
                path: path.display().to_string(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "Loaded template override");
            Ok(Cow::Owned(source))
        }
        None => Ok(Cow::Borrowed(builtin)),
    }
}
