//! # Fakturo Domain
//!
//! Business domain types and models for Fakturo.
//!
//! This crate contains:
//! - Domain data types (InvoiceDraft, LineItem, SubmissionOutcome, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Fakturo crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::{ApiConfig, BatchConfig, Config, StorageConfig};
pub use errors::{FakturoError, GatewayError, Result};
pub use types::{
    BatchSummary, Contact, CreatedInvoice, InvoiceDraft, LineItem, SubmissionOutcome,
};
