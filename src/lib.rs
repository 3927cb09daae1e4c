//! PayHash: token payments with emailed receipts.
//!
//! A payment is a token transfer on an EVM chain followed by a receipt: a PDF
//! rendered from an HTML template plus an HTML email body, mailed to the payer
//! and the receiving organisation with the PDF attached.

// Core subsystems
pub mod blockchain;
pub mod config;
pub mod payments;

// Receipt production
pub mod mail;
pub mod render;

// Cross-cutting concerns
pub mod error;
pub mod observability;

pub use config::schema::PayHashConfig;
pub use error::{PayError, PayResult};
pub use payments::{
    BatchAck, BatchItemOutcome, BatchResult, ItemStatus, PaymentOrchestrator, TransferRequest,
    TransferResult,
};
