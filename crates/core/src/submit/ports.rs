//! Port interfaces for invoice submission

use async_trait::async_trait;
use fakturo_domain::{Contact, CreatedInvoice, GatewayError, InvoiceDraft};

/// Trait for the remote accounting API boundary.
///
/// Implementations own wire conversion, authentication and their own
/// request pacing. They must not retry: retries, if any, are the
/// submitter's responsibility (and the submitter paces instead).
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
    /// Create one invoice from a draft.
    ///
    /// A draft that cannot be converted to the wire format (e.g. an
    /// unresolved contact) fails here with a [`GatewayError`], which
    /// the submitter records as that item's failure.
    async fn create_invoice(
        &self,
        draft: &InvoiceDraft,
    ) -> std::result::Result<CreatedInvoice, GatewayError>;

    /// List the contacts available for invoice creation.
    async fn list_contacts(&self) -> std::result::Result<Vec<Contact>, GatewayError>;
}
