//! Invoice draft and line item types
//!
//! An [`InvoiceDraft`] is a locally-held, not-yet-submitted invoice
//! record. Drafts are what the batch queue persists and what the
//! submitter converts into wire requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One position on an invoice.
///
/// The tax rate is a free non-negative percentage. The UI offers the
/// German fixed set {0, 7, 19} as a convenience, but the data model
/// accepts any value the remote API would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub tax_rate_percent: f64,
}

impl LineItem {
    /// Gross total of this position: quantity x price, plus tax.
    pub fn gross_total(&self) -> f64 {
        let net = self.quantity * self.unit_price;
        net * (1.0 + self.tax_rate_percent / 100.0)
    }
}

/// A locally queued invoice awaiting submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Remote contact id; `None` for CSV imports pending resolution.
    pub contact_id: Option<i64>,
    /// Display label for the contact (shown in queue listings).
    pub contact_label: String,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    /// Server auto-assigns a number when absent.
    pub invoice_number: Option<String>,
    /// At least one item; enforced at build time, not here.
    pub line_items: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Gross total across all line items.
    ///
    /// Derived on every call rather than stored, so the value can
    /// never go stale after a mutation. Rounding to two decimals is a
    /// presentation concern and must not happen here.
    pub fn computed_total(&self) -> f64 {
        self.line_items.iter().map(LineItem::gross_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, unit_price: f64, tax: f64) -> LineItem {
        LineItem {
            description: "Widget".to_string(),
            quantity,
            unit_price,
            tax_rate_percent: tax,
        }
    }

    fn draft(items: Vec<LineItem>) -> InvoiceDraft {
        InvoiceDraft {
            contact_id: Some(1),
            contact_label: "Acme".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: None,
            invoice_number: None,
            line_items: items,
        }
    }

    #[test]
    fn total_applies_tax_per_item() {
        let d = draft(vec![item(100.0, 1.0, 19.0)]);
        assert!((d.computed_total() - 119.0).abs() < 1e-9);
    }

    #[test]
    fn total_sums_mixed_rates() {
        let d = draft(vec![item(2.0, 9.99, 7.0), item(1.0, 10.0, 0.0)]);
        assert!((d.computed_total() - (21.3786 + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn total_is_not_rounded() {
        let d = draft(vec![item(2.0, 9.99, 7.0)]);
        assert!((d.computed_total() - 21.3786).abs() < 1e-9);
    }

    #[test]
    fn draft_round_trips_through_json() {
        let d = draft(vec![item(1.0, 5.0, 19.0)]);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("contactId"));
        assert!(json.contains("lineItems"));
        let back: InvoiceDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
