//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::PayHashConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `smtp.pass`.
pub const SMTP_PASS_ENV_VAR: &str = "PAYHASH_SMTP_PASS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
///
/// Secrets set in the environment win over the file.
pub fn load_config(path: &Path) -> Result<PayHashConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config = parse_config(&content)?;

    apply_secret_overrides(&mut config, std::env::var(SMTP_PASS_ENV_VAR).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parse TOML into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<PayHashConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

fn apply_secret_overrides(config: &mut PayHashConfig, smtp_pass: Option<String>) {
    if let Some(pass) = smtp_pass.filter(|p| !p.is_empty()) {
        config.smtp.pass = pass;
    }
}
