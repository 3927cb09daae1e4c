//! Data handed to the receipt templates.
//!
//! Contexts are derived per request from the transfer facts plus the
//! presentation overrides and dropped once the receipt is sent.

use alloy::primitives::{Address, TxHash};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::config::schema::PresentationConfig;

pub const DEFAULT_RECEIPT_TITLE: &str = "Payment Receipt";
pub const DEFAULT_FOOTER_TEXT: &str = "Powered by PayHash";
pub const DEFAULT_PDF_PRIMARY_COLOR: &str = "#000";
pub const DEFAULT_EMAIL_PRIMARY_COLOR: &str = "#b5a8b0ff";
pub const DEFAULT_PDF_TITLE_FONT_SIZE: u32 = 24;
pub const DEFAULT_EMAIL_TITLE_FONT_SIZE: u32 = 20;
pub const DEFAULT_BODY_FONT_SIZE: u32 = 14;
pub const DEFAULT_FOOTER_FONT_SIZE: u32 = 12;
pub const DEFAULT_SECONDARY_COLOR: &str = "#6b7280";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#111827";

/// Facts about one completed transfer.
#[derive(Debug, Clone)]
pub struct ReceiptFacts<'a> {
    pub org_name: &'a str,
    pub beneficiary: Address,
    pub amount: &'a str,
    pub token_symbol: &'a str,
    pub tx_hash: TxHash,
    pub payer: Address,
    pub confirmed_at: DateTime<Utc>,
    pub additional_info: Option<&'a str>,
}

/// Format a timestamp the way HTTP dates read (`Fri, 16 Oct 2026 09:30:00 GMT`).
pub fn format_utc(at: &DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Styling shared by both documents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedStyle {
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub footer_font_size: u32,
    pub layout_padding: u32,
    pub align: &'static str,
    pub show_tx_hash: bool,
    pub show_timestamp: bool,
    pub beneficiary: String,
    pub additional_info: Option<String>,
}

impl SharedStyle {
    fn new(facts: &ReceiptFacts<'_>, presentation: &PresentationConfig) -> Self {
        Self {
            secondary_color: or_default(&presentation.secondary_color, DEFAULT_SECONDARY_COLOR),
            background_color: or_default(&presentation.background_color, DEFAULT_BACKGROUND_COLOR),
            text_color: or_default(&presentation.text_color, DEFAULT_TEXT_COLOR),
            footer_font_size: presentation.footer_font_size.unwrap_or(DEFAULT_FOOTER_FONT_SIZE),
            layout_padding: presentation.layout.unwrap_or_default().padding_px(),
            align: presentation.align.unwrap_or_default().as_css(),
            show_tx_hash: presentation.show_tx_hash.unwrap_or(true),
            show_timestamp: presentation.show_timestamp.unwrap_or(true),
            beneficiary: facts.beneficiary.to_string(),
            additional_info: facts.additional_info.map(str::to_string),
        }
    }
}

/// Data for the PDF receipt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfReceiptContext {
    pub brand_name: String,
    pub logo_url: String,
    pub primary_color: String,
    pub receipt_title: String,
    pub amount: String,
    pub token: String,
    pub tx_hash: String,
    pub payer: String,
    /// When the receipt was generated.
    pub date: String,
    pub footer_text: String,
    pub font_family: &'static str,
    pub title_font_size: u32,
    pub body_font_size: u32,
    #[serde(flatten)]
    pub style: SharedStyle,
}

impl PdfReceiptContext {
    pub fn new(
        facts: &ReceiptFacts<'_>,
        presentation: &PresentationConfig,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            brand_name: or_default(&presentation.brand_name, facts.org_name),
            logo_url: or_default(&presentation.logo_url, ""),
            primary_color: or_default(&presentation.primary_color, DEFAULT_PDF_PRIMARY_COLOR),
            receipt_title: or_default(&presentation.receipt_title, DEFAULT_RECEIPT_TITLE),
            amount: facts.amount.to_string(),
            token: facts.token_symbol.to_string(),
            tx_hash: facts.tx_hash.to_string(),
            payer: facts.payer.to_string(),
            date: format_utc(&generated_at),
            footer_text: or_default(&presentation.footer_text, DEFAULT_FOOTER_TEXT),
            font_family: presentation.font_family.unwrap_or_default().css_name(),
            title_font_size: presentation
                .title_font_size
                .unwrap_or(DEFAULT_PDF_TITLE_FONT_SIZE),
            body_font_size: presentation.body_font_size.unwrap_or(DEFAULT_BODY_FONT_SIZE),
            style: SharedStyle::new(facts, presentation),
        }
    }
}

/// Data for the HTML email body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReceiptContext {
    pub brand_name: String,
    pub logo_url: String,
    pub primary_color: String,
    pub title_font_size: u32,
    pub body_font_size: u32,
    pub receipt_title: String,
    pub footer_text: String,
    pub font_family: &'static str,
    pub tx_hash: String,
    pub payer: String,
    /// Confirmation time taken from the chain receipt.
    pub timestamp: String,
    pub year: String,
    pub amount: String,
    pub token: String,
    #[serde(flatten)]
    pub style: SharedStyle,
}

impl EmailReceiptContext {
    pub fn new(
        facts: &ReceiptFacts<'_>,
        presentation: &PresentationConfig,
        now: DateTime<Utc>,
    ) -> Self {
        // The mail heading mirrors the subject line.
        let receipt_title = or_default(&presentation.subject, DEFAULT_RECEIPT_TITLE);

        Self {
            brand_name: or_default(&presentation.brand_name, facts.org_name),
            logo_url: or_default(&presentation.logo_url, ""),
            primary_color: or_default(&presentation.primary_color, DEFAULT_EMAIL_PRIMARY_COLOR),
            title_font_size: presentation
                .title_font_size
                .unwrap_or(DEFAULT_EMAIL_TITLE_FONT_SIZE),
            body_font_size: presentation.body_font_size.unwrap_or(DEFAULT_BODY_FONT_SIZE),
            receipt_title,
            footer_text: or_default(&presentation.footer_text, DEFAULT_FOOTER_TEXT),
            font_family: presentation.font_family.unwrap_or_default().css_name(),
            tx_hash: facts.tx_hash.to_string(),
            payer: facts.payer.to_string(),
            timestamp: format_utc(&facts.confirmed_at),
            year: now.year().to_string(),
            amount: facts.amount.to_string(),
            token: facts.token_symbol.to_string(),
            style: SharedStyle::new(facts, presentation),
        }
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}
