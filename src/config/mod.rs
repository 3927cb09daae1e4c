//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! payhash.toml
//!     → loader.rs (parse & deserialize, env secret overrides)
//!     → validation.rs (semantic checks)
//!     → PayHashConfig (validated, immutable)
//!     → sections handed to the chain client, mailer and orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    Align, BlockchainConfig, FontFamily, Layout, ObservabilityConfig, PayHashConfig,
    PresentationConfig, SmtpConfig,
};
