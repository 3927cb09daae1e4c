//! HTML to PDF conversion.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use crate::render::{RenderError, RenderResult};

/// A4 in inches.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

/// Turns a finished HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> RenderResult<Vec<u8>>;
}

/// Renders through a headless Chromium launched per document.
#[derive(Debug, Clone, Default)]
pub struct ChromePdfRenderer;

impl ChromePdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_blocking(html: String) -> RenderResult<Vec<u8>> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .build()
            .map_err(browser_err)?;
        let browser = Browser::new(options).map_err(browser_err)?;
        let tab = browser.new_tab().map_err(browser_err)?;

        let url = format!("data:text/html;charset=utf-8;base64,{}", STANDARD.encode(html));
        tab.navigate_to(&url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(browser_err)?;

        let pdf = tab
            .print_to_pdf(Some(PrintToPdfOptions {
                print_background: Some(true),
                paper_width: Some(A4_WIDTH_IN),
                paper_height: Some(A4_HEIGHT_IN),
                ..PrintToPdfOptions::default()
            }))
            .map_err(browser_err)?;

        if let Err(e) = tab.close(true) {
            tracing::debug!(error = %e, "Failed to close render tab");
        }
        Ok(pdf)
    }
}

fn browser_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Browser(e.to_string())
}

#[async_trait]
impl PdfRenderer for ChromePdfRenderer {
    async fn render(&self, html: &str) -> RenderResult<Vec<u8>> {
        let html = html.to_string();
        let pdf = tokio::task::spawn_blocking(move || Self::render_blocking(html))
            .await
            .map_err(|e| RenderError::Join(e.to_string()))??;
        tracing::debug!(bytes = pdf.len(), "PDF rendered");
        Ok(pdf)
    }
}
