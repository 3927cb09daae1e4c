//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the SDK.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::blockchain::types::TEMPO_TESTNET_CHAIN_ID;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PayHashConfig {
    /// Chain connection settings.
    pub blockchain: BlockchainConfig,

    /// Outgoing mail server.
    pub smtp: SmtpConfig,

    /// Receipt styling and content overrides.
    pub presentation: PresentationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID transfers are allowed on.
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum wait for a transfer receipt in seconds.
    pub receipt_timeout_secs: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://rpc.testnet.tempo.xyz".to_string(),
            failover_urls: Vec::new(),
            chain_id: TEMPO_TESTNET_CHAIN_ID,
            rpc_timeout_secs: 10,
            receipt_timeout_secs: 60,
        }
    }
}

/// SMTP connection settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,

    pub port: u16,

    /// Implicit TLS. Defaults to `true` on port 465 only.
    pub secure: Option<bool>,

    pub user: String,

    pub pass: String,

    /// Connection and command timeout in seconds.
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Whether the connection starts with TLS rather than upgrading.
    pub fn is_secure(&self) -> bool {
        self.secure.unwrap_or(self.port == 465)
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            secure: None,
            user: String::new(),
            pass: String::new(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.is_secure())
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Typeface used in receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Inter,
    Roboto,
    Poppins,
}

impl FontFamily {
    /// CSS family name.
    pub fn css_name(&self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::Roboto => "Roboto",
            FontFamily::Poppins => "Poppins",
        }
    }
}

/// Whitespace density of the receipt layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Compact,
    #[default]
    Standard,
    Spacious,
}

impl Layout {
    /// Outer padding in px.
    pub fn padding_px(&self) -> u32 {
        match self {
            Layout::Compact => 16,
            Layout::Standard => 32,
            Layout::Spacious => 48,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
}

impl Align {
    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
        }
    }
}

/// Receipt styling and content overrides.
///
/// Every field is optional; unset fields fall back to the defaults applied when
/// the receipt is rendered. Never mutated after construction.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Attachment file name.
    pub pdf_file_name: Option<String>,
    /// Handlebars template for the PDF body.
    pub pdf_template_path: Option<PathBuf>,
    /// Handlebars template for the email body.
    pub email_template_path: Option<PathBuf>,
    pub subject: Option<String>,
    /// Falls back to the sending organisation's name.
    pub brand_name: Option<String>,
    pub logo_url: Option<String>,

    // Colors
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,

    // Typography
    pub font_family: Option<FontFamily>,
    /// px
    pub title_font_size: Option<u32>,
    /// px
    pub body_font_size: Option<u32>,
    /// px
    pub footer_font_size: Option<u32>,

    // Layout
    pub layout: Option<Layout>,
    pub align: Option<Align>,

    // Content
    pub receipt_title: Option<String>,
    pub footer_text: Option<String>,
    pub show_tx_hash: Option<bool>,
    pub show_timestamp: Option<bool>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
