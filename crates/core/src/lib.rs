//! # Fakturo Core
//!
//! Business logic for bulk invoice creation.
//!
//! This crate contains:
//! - The invoice record builder (form and CSV sources)
//! - The persisted batch queue and its storage port
//! - The batch submitter state machine and its gateway port
//! - The outcome reporter
//!
//! ## Architecture
//! - Defines ports (traits) implemented by `fakturo-infra`
//! - Depends only on `fakturo-domain`
//! - No I/O beyond what flows through the ports

pub mod builder;
pub mod queue;
pub mod report;
pub mod submit;

// Re-export commonly used items
pub use builder::{CsvRow, FormSnapshot, LineItemInput, ValidationError};
pub use queue::{BatchQueue, QueueStore};
pub use report::summarize;
pub use submit::{BatchRunReport, BatchSubmitter, InvoiceGateway, SubmitError};
