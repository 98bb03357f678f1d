//! Wire format for the sevDesk invoice API
//!
//! Request and response shapes are reproduced exactly as the remote
//! endpoint expects them; field names and fixed values here are
//! compatibility constraints, not style choices.

use fakturo_domain::{Contact, CreatedInvoice, GatewayError, InvoiceDraft};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /Invoice/Factory/saveInvoice`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveInvoiceRequest {
    pub invoice: WireInvoice,
    pub invoice_pos_save: Vec<WireInvoicePos>,
    pub invoice_pos_delete: Option<()>,
    pub discount_save: Option<()>,
    pub discount_delete: Option<()>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInvoice {
    pub invoice_type: &'static str,
    pub contact: WireObjectRef,
    /// ISO 8601 date string.
    pub invoice_date: String,
    pub status: u32,
    pub header: &'static str,
    pub head_text: Option<()>,
    pub foot_text: Option<()>,
    pub address_name: Option<()>,
    pub currency: &'static str,
    pub show_net: u8,
    pub send_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireObjectRef {
    pub id: i64,
    pub object_name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInvoicePos {
    pub object_name: &'static str,
    pub map_all: bool,
    pub quantity: f64,
    pub price: f64,
    pub name: String,
    pub unity: WireObjectRef,
    pub tax_rate: f64,
    pub temporary: bool,
}

impl SaveInvoiceRequest {
    /// Convert a draft into the wire request.
    ///
    /// Fails when the draft has no resolved contact (CSV imports keep
    /// `contact_id` unresolved). The submitter turns this into that
    /// item's failure outcome.
    pub fn from_draft(draft: &InvoiceDraft) -> Result<Self, GatewayError> {
        let contact_id = draft.contact_id.ok_or_else(|| {
            GatewayError::InvalidDraft(format!(
                "contact '{}' is not resolved to a contact id",
                draft.contact_label
            ))
        })?;

        let positions = draft
            .line_items
            .iter()
            .map(|item| WireInvoicePos {
                object_name: "InvoicePos",
                map_all: true,
                quantity: item.quantity,
                price: item.unit_price,
                name: item.description.clone(),
                unity: WireObjectRef { id: 1, object_name: "Unity" },
                tax_rate: item.tax_rate_percent,
                temporary: false,
            })
            .collect();

        Ok(Self {
            invoice: WireInvoice {
                invoice_type: "RE",
                contact: WireObjectRef { id: contact_id, object_name: "Contact" },
                invoice_date: draft.invoice_date.format("%Y-%m-%d").to_string(),
                status: 100,
                header: "Invoice",
                head_text: None,
                foot_text: None,
                address_name: None,
                currency: "EUR",
                show_net: 1,
                send_type: "VPR",
            },
            invoice_pos_save: positions,
            invoice_pos_delete: None,
            discount_save: None,
            discount_delete: None,
        })
    }
}

/// Successful `saveInvoice` envelope: `{ success: true, objects: { id,
/// invoiceNumber, ... } }`.
#[derive(Debug, Deserialize)]
pub struct SaveInvoiceResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    pub objects: SaveInvoiceObjects,
}

#[derive(Debug, Deserialize)]
pub struct SaveInvoiceObjects {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: i64,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: Option<String>,
}

impl SaveInvoiceResponse {
    pub fn into_created(self) -> Result<CreatedInvoice, GatewayError> {
        if !self.success {
            return Err(GatewayError::MalformedResponse);
        }
        Ok(CreatedInvoice { id: self.objects.id, invoice_number: self.objects.invoice_number })
    }
}

/// Error envelope: `{ success: false, error: { message } }`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
}

/// Contact list envelope: `{ objects: [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct ContactListResponse {
    pub objects: Vec<WireContact>,
}

#[derive(Debug, Deserialize)]
pub struct WireContact {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: i64,
    /// Organisation name; persons carry family/sure name instead.
    pub name: Option<String>,
    pub familyname: Option<String>,
    pub surename: Option<String>,
}

impl From<WireContact> for Contact {
    fn from(wire: WireContact) -> Self {
        let label = match wire.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => name,
            None => {
                let person = format!(
                    "{} {}",
                    wire.familyname.unwrap_or_default(),
                    wire.surename.unwrap_or_default()
                );
                person.trim().to_string()
            }
        };
        Self { id: wire.id, label }
    }
}

fn default_true() -> bool {
    true
}

/// The API is inconsistent about numeric ids: list endpoints return
/// them as JSON strings, the factory endpoint as numbers.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(i64),
        Text(String),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(n) => Ok(n),
        IdRepr::Text(s) => s.parse::<i64>().map_err(serde::de::Error::custom),
    }
}
