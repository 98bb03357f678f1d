//! Invoice record builder
//!
//! Converts a form snapshot or a CSV row into a canonical
//! [`InvoiceDraft`]. Pure transformation: no side effects, no I/O.
//!
//! Form snapshots are validated strictly on the invoice level
//! (contact, date) but tolerantly on the item level: line items that
//! fail validation are dropped rather than rejecting the whole draft.
//! A draft only fails to build when no valid item survives. CSV rows
//! are even more forgiving and substitute documented defaults for
//! missing fields, because imported files are routinely incomplete.

use chrono::{Local, NaiveDate};
use fakturo_domain::constants::{
    DEFAULT_ITEM_DESCRIPTION, DEFAULT_QUANTITY, DEFAULT_TAX_RATE, UNKNOWN_CONTACT_LABEL,
};
use fakturo_domain::{InvoiceDraft, LineItem};
use serde::Deserialize;
use thiserror::Error;

/// Errors caught at build time; these never reach the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no valid line items")]
    NoLineItems,

    #[error("a contact must be selected")]
    MissingContact,

    #[error("invalid {field} date: {value}")]
    InvalidDate { field: &'static str, value: String },
}

/// Raw line item values as entered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub tax_rate_percent: f64,
}

/// State of the manual entry form at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub contact_id: Option<i64>,
    pub contact_label: String,
    /// ISO 8601 date string as entered.
    pub invoice_date: String,
    pub due_date: Option<String>,
    pub invoice_number: Option<String>,
    pub items: Vec<LineItemInput>,
}

/// One record of an imported CSV file, keyed by header name.
///
/// All fields are optional strings; the builder applies defaults for
/// anything missing or unparseable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CsvRow {
    pub contact_name: Option<String>,
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub tax_rate: Option<String>,
}

/// Build a draft from the manual entry form.
///
/// Line items with an empty description, non-positive quantity or
/// negative price are silently dropped. The draft fails only when the
/// filtered item list ends up empty.
pub fn build_from_form(snapshot: &FormSnapshot) -> Result<InvoiceDraft, ValidationError> {
    let contact_id = snapshot.contact_id.ok_or(ValidationError::MissingContact)?;

    let invoice_date = parse_iso_date(&snapshot.invoice_date)
        .ok_or_else(|| ValidationError::InvalidDate {
            field: "invoice",
            value: snapshot.invoice_date.clone(),
        })?;

    let due_date = match snapshot.due_date.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_iso_date(raw).ok_or_else(|| ValidationError::InvalidDate {
            field: "due",
            value: raw.to_string(),
        })?),
    };

    let line_items: Vec<LineItem> = snapshot
        .items
        .iter()
        .filter(|item| {
            !item.description.trim().is_empty() && item.quantity > 0.0 && item.unit_price >= 0.0
        })
        .map(|item| LineItem {
            description: item.description.trim().to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            tax_rate_percent: item.tax_rate_percent,
        })
        .collect();

    if line_items.is_empty() {
        return Err(ValidationError::NoLineItems);
    }

    Ok(InvoiceDraft {
        contact_id: Some(contact_id),
        contact_label: snapshot.contact_label.clone(),
        invoice_date,
        due_date,
        invoice_number: snapshot.invoice_number.clone().filter(|n| !n.is_empty()),
        line_items,
    })
}

/// Build a draft from one CSV record.
///
/// Missing or unparseable fields fall back to documented defaults:
/// quantity 1, price 0, tax rate 19, contact "Unknown", dates today.
/// The contact id is always unresolved after import.
pub fn build_from_csv_row(row: &CsvRow) -> Result<InvoiceDraft, ValidationError> {
    let today = Local::now().date_naive();

    let quantity = match parse_decimal(row.quantity.as_deref()) {
        Some(q) if q > 0.0 => q,
        _ => DEFAULT_QUANTITY,
    };
    let unit_price = match parse_decimal(row.price.as_deref()) {
        Some(p) if p >= 0.0 => p,
        _ => 0.0,
    };
    let tax_rate_percent = match parse_decimal(row.tax_rate.as_deref()) {
        Some(t) if t >= 0.0 => t,
        _ => DEFAULT_TAX_RATE,
    };

    let description = row
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_ITEM_DESCRIPTION)
        .to_string();

    let contact_label = row
        .contact_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_CONTACT_LABEL)
        .to_string();

    let invoice_date = row.invoice_date.as_deref().and_then(parse_iso_date).unwrap_or(today);
    let due_date = row.due_date.as_deref().and_then(parse_iso_date);

    Ok(InvoiceDraft {
        // Resolved against the contact list later; never known at import time.
        contact_id: None,
        contact_label,
        invoice_date,
        due_date,
        invoice_number: None,
        line_items: vec![LineItem { description, quantity, unit_price, tax_rate_percent }],
    })
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_decimal(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_item() -> LineItemInput {
        LineItemInput {
            description: "Consulting".to_string(),
            quantity: 2.0,
            unit_price: 50.0,
            tax_rate_percent: 19.0,
        }
    }

    fn form() -> FormSnapshot {
        FormSnapshot {
            contact_id: Some(42),
            contact_label: "Acme GmbH".to_string(),
            invoice_date: "2024-01-15".to_string(),
            due_date: Some("2024-02-14".to_string()),
            invoice_number: None,
            items: vec![valid_item()],
        }
    }

    #[test]
    fn builds_draft_from_valid_form() {
        let draft = build_from_form(&form()).unwrap();
        assert_eq!(draft.contact_id, Some(42));
        assert_eq!(draft.line_items.len(), 1);
        assert!((draft.computed_total() - 119.0).abs() < 1e-9);
    }

    #[test]
    fn form_without_contact_is_rejected() {
        let mut snapshot = form();
        snapshot.contact_id = None;
        assert_eq!(build_from_form(&snapshot), Err(ValidationError::MissingContact));
    }

    #[test]
    fn form_with_bad_date_is_rejected() {
        let mut snapshot = form();
        snapshot.invoice_date = "15.01.2024".to_string();
        assert!(matches!(
            build_from_form(&snapshot),
            Err(ValidationError::InvalidDate { field: "invoice", .. })
        ));
    }

    #[test]
    fn invalid_items_are_dropped_not_rejected() {
        let mut snapshot = form();
        snapshot.items.push(LineItemInput {
            description: "".to_string(),
            quantity: 1.0,
            unit_price: 10.0,
            tax_rate_percent: 19.0,
        });
        snapshot.items.push(LineItemInput {
            description: "Negative".to_string(),
            quantity: 1.0,
            unit_price: -5.0,
            tax_rate_percent: 19.0,
        });
        let draft = build_from_form(&snapshot).unwrap();
        assert_eq!(draft.line_items.len(), 1);
    }

    #[test]
    fn all_items_invalid_fails_with_no_line_items() {
        let mut snapshot = form();
        snapshot.items = vec![LineItemInput {
            description: "   ".to_string(),
            quantity: 0.0,
            unit_price: 10.0,
            tax_rate_percent: 19.0,
        }];
        assert_eq!(build_from_form(&snapshot), Err(ValidationError::NoLineItems));
    }

    #[test]
    fn zero_price_item_is_valid() {
        let mut snapshot = form();
        snapshot.items = vec![LineItemInput {
            description: "Free sample".to_string(),
            quantity: 1.0,
            unit_price: 0.0,
            tax_rate_percent: 19.0,
        }];
        let draft = build_from_form(&snapshot).unwrap();
        assert!((draft.computed_total() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn csv_row_builds_single_item_draft() {
        let row = CsvRow {
            contact_name: Some("Acme".to_string()),
            invoice_date: Some("2024-01-01".to_string()),
            due_date: None,
            description: Some("Widget".to_string()),
            quantity: Some("2".to_string()),
            price: Some("9.99".to_string()),
            tax_rate: Some("7".to_string()),
        };
        let draft = build_from_csv_row(&row).unwrap();
        assert_eq!(draft.contact_id, None);
        assert_eq!(draft.contact_label, "Acme");
        assert_eq!(draft.line_items.len(), 1);
        assert!((draft.computed_total() - 21.3786).abs() < 1e-9);
    }

    #[test]
    fn csv_defaults_cover_missing_fields() {
        let draft = build_from_csv_row(&CsvRow::default()).unwrap();
        assert_eq!(draft.contact_label, "Unknown");
        let item = &draft.line_items[0];
        assert_eq!(item.description, "Imported item");
        assert!((item.quantity - 1.0).abs() < 1e-9);
        assert!((item.unit_price - 0.0).abs() < 1e-9);
        assert!((item.tax_rate_percent - 19.0).abs() < 1e-9);
    }

    #[test]
    fn csv_explicit_zero_tax_is_kept() {
        let row = CsvRow { tax_rate: Some("0".to_string()), ..CsvRow::default() };
        let draft = build_from_csv_row(&row).unwrap();
        assert!((draft.line_items[0].tax_rate_percent - 0.0).abs() < 1e-9);
    }

    #[test]
    fn form_and_csv_totals_agree() {
        let mut snapshot = form();
        snapshot.items = vec![LineItemInput {
            description: "Widget".to_string(),
            quantity: 2.0,
            unit_price: 9.99,
            tax_rate_percent: 7.0,
        }];
        let from_form = build_from_form(&snapshot).unwrap();

        let row = CsvRow {
            description: Some("Widget".to_string()),
            quantity: Some("2".to_string()),
            price: Some("9.99".to_string()),
            tax_rate: Some("7".to_string()),
            ..CsvRow::default()
        };
        let from_csv = build_from_csv_row(&row).unwrap();

        assert!((from_form.computed_total() - from_csv.computed_total()).abs() < 1e-9);
    }
}
