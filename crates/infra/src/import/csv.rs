//! CSV invoice import
//!
//! Reads a headered CSV file into invoice drafts, one draft per row.
//! Rows that cannot be decoded at all are skipped with a warning;
//! decodable rows with missing values go through the builder's
//! defaulting rules instead of failing.
//!
//! Expected headers: `contact_name`, `invoice_date`, `due_date`,
//! `description`, `quantity`, `price`, `tax_rate`. Unknown columns are
//! ignored, missing ones read as empty.

use std::io::Read;
use std::path::Path;

use fakturo_core::builder::{build_from_csv_row, CsvRow};
use fakturo_domain::{FakturoError, InvoiceDraft, Result};
use tracing::{info, warn};

/// Result of one import: the drafts built plus how many rows were
/// dropped as undecodable.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub drafts: Vec<InvoiceDraft>,
    pub skipped_rows: usize,
}

/// Import drafts from a CSV file on disk.
pub fn read_csv_drafts(path: impl AsRef<Path>) -> Result<ImportReport> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        FakturoError::InvalidInput(format!("Failed to open CSV file {}: {e}", path.display()))
    })?;
    let report = read_csv_drafts_from(file)?;
    info!(
        path = %path.display(),
        imported = report.drafts.len(),
        skipped = report.skipped_rows,
        "CSV import finished"
    );
    Ok(report)
}

/// Import drafts from any CSV byte stream.
pub fn read_csv_drafts_from(reader: impl Read) -> Result<ImportReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut report = ImportReport::default();
    for (index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        match record {
            Ok(row) => match build_from_csv_row(&row) {
                Ok(draft) => report.drafts.push(draft),
                Err(err) => {
                    warn!(row = index + 1, error = %err, "skipping unbuildable CSV row");
                    report.skipped_rows += 1;
                }
            },
            Err(err) => {
                warn!(row = index + 1, error = %err, "skipping undecodable CSV row");
                report.skipped_rows += 1;
            }
        }
    }
    Ok(report)
}
