//! Receipt rendering subsystem.
//!
//! # Data Flow
//! ```text
//! TransferReceipt + TransferRequest + PresentationConfig
//!     → context.rs (PdfReceiptContext / EmailReceiptContext with defaults)
//!     → template.rs (handlebars, templates compiled once at construction)
//!     → pdf.rs (headless Chromium, HTML → PDF bytes)
//! ```

pub mod context;
pub mod pdf;
pub mod template;

use std::sync::Arc;

use thiserror::Error;

pub use context::{format_utc, EmailReceiptContext, PdfReceiptContext, ReceiptFacts};
pub use pdf::{ChromePdfRenderer, PdfRenderer};
pub use template::TemplateEngine;

use crate::config::schema::PresentationConfig;

/// Errors raised while producing receipt documents.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot read template {path}: {source}")]
    TemplateLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template '{name}': {reason}")]
    TemplateSyntax { name: String, reason: String },

    #[error("Template rendering failed: {0}")]
    Template(String),

    #[error("PDF renderer failed: {0}")]
    Browser(String),

    #[error("Render task failed: {0}")]
    Join(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Produces both receipt documents for a transfer.
pub struct ReceiptRenderer {
    templates: TemplateEngine,
    pdf: Arc<dyn PdfRenderer>,
}

impl ReceiptRenderer {
    /// Compile the receipt templates selected by `presentation`.
    pub fn new(presentation: &PresentationConfig, pdf: Arc<dyn PdfRenderer>) -> RenderResult<Self> {
        Ok(Self {
            templates: TemplateEngine::for_receipts(presentation)?,
            pdf,
        })
    }

    /// Fill the PDF template and convert it.
    pub async fn render_pdf(&self, context: &PdfReceiptContext) -> RenderResult<Vec<u8>> {
        let html = self.templates.render(template::PDF_TEMPLATE, context)?;
        self.pdf.render(&html).await
    }

    /// Fill the email body template.
    pub fn render_email(&self, context: &EmailReceiptContext) -> RenderResult<String> {
        self.templates.render(template::EMAIL_TEMPLATE, context)
    }
}
