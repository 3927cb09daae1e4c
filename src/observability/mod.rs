//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! payments, blockchain, mail:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (payment/batch/email counters, payment latency)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → whatever metrics recorder the embedding binary installs
//! ```
//!
//! # Design Decisions
//! - Without an installed recorder metric updates are no-ops
//! - Batch runs carry their batch id as a span field

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
