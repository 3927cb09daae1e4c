//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check that template overrides exist and colors parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PayHashConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::PayHashConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} '{value}' is not a valid URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("smtp.host must not be empty")]
    EmptySmtpHost,

    #[error("{field} does not point to a file: {path}")]
    MissingTemplate { field: &'static str, path: String },

    #[error("{field} '{value}' is not a CSS color")]
    InvalidColor { field: &'static str, value: String },
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &PayHashConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let chain = &config.blockchain;
    if chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "blockchain.rpc_url",
            value: chain.rpc_url.clone(),
        });
    }
    for failover in &chain.failover_urls {
        if failover.parse::<url::Url>().is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "blockchain.failover_urls",
                value: failover.clone(),
            });
        }
    }
    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero("blockchain.rpc_timeout_secs"));
    }
    if chain.receipt_timeout_secs == 0 {
        errors.push(ValidationError::Zero("blockchain.receipt_timeout_secs"));
    }

    let smtp = &config.smtp;
    if smtp.host.trim().is_empty() {
        errors.push(ValidationError::EmptySmtpHost);
    }
    if smtp.port == 0 {
        errors.push(ValidationError::Zero("smtp.port"));
    }
    if smtp.timeout_secs == 0 {
        errors.push(ValidationError::Zero("smtp.timeout_secs"));
    }

    let presentation = &config.presentation;
    let templates = [
        ("presentation.pdf_template_path", &presentation.pdf_template_path),
        ("presentation.email_template_path", &presentation.email_template_path),
    ];
    for (field, path) in templates {
        if let Some(path) = path {
            if !path.is_file() {
                errors.push(ValidationError::MissingTemplate {
                    field,
                    path: path.display().to_string(),
                });
            }
        }
    }

    let colors = [
        ("presentation.primary_color", &presentation.primary_color),
        ("presentation.secondary_color", &presentation.secondary_color),
        ("presentation.background_color", &presentation.background_color),
        ("presentation.text_color", &presentation.text_color),
    ];
    for (field, color) in colors {
        if let Some(value) = color {
            if !is_css_color(value) {
                errors.push(ValidationError::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Color functions accepted in addition to hex and named colors.
const COLOR_FUNCTIONS: &[&str] = &[
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color",
];

/// Hex colors (#rgb, #rgba, #rrggbb, #rrggbbaa), named colors, or functional
/// notation such as `rgb(0, 0, 0)`. Function arguments are not checked.
fn is_css_color(value: &str) -> bool {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some((name, rest)) = value.split_once('(') {
        let name = name.trim().to_ascii_lowercase();
        return COLOR_FUNCTIONS.contains(&name.as_str())
            && rest
                .strip_suffix(')')
                .is_some_and(|args| !args.trim().is_empty() && !args.contains(['(', ')']));
    }
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}
