//! Bulk import adapters

pub mod csv;

pub use self::csv::{read_csv_drafts, read_csv_drafts_from, ImportReport};
