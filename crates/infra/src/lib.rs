//! # Fakturo Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The sevDesk HTTP gateway (reqwest)
//! - JSON file persistence for the batch queue
//! - CSV import
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `fakturo-core`
//! - Contains all "impure" code (network, filesystem)

pub mod config;
pub mod gateway;
pub mod import;
pub mod persistence;

// Re-export commonly used items
pub use gateway::{CredentialProvider, RequestGate, SevdeskGateway, StaticApiKey};
pub use import::{read_csv_drafts, ImportReport};
pub use persistence::JsonFileQueueStore;
