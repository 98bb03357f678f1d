//! sevDesk HTTP gateway client
//!
//! Implements the core [`InvoiceGateway`] port over reqwest. Every
//! request passes the shared [`RequestGate`] and carries the API key
//! verbatim in the `Authorization` header. Failures are classified
//! into the gateway taxonomy. There is no retry logic; the submitter
//! records the failure and moves on.

use std::sync::Arc;

use async_trait::async_trait;
use fakturo_core::submit::InvoiceGateway;
use fakturo_domain::{
    ApiConfig, Contact, CreatedInvoice, FakturoError, GatewayError, InvoiceDraft,
};
use reqwest::{Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::credentials::CredentialProvider;
use super::gate::RequestGate;
use super::wire::{ApiErrorBody, ContactListResponse, SaveInvoiceRequest, SaveInvoiceResponse};

/// HTTP gateway to the sevDesk API.
pub struct SevdeskGateway {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
    gate: RequestGate,
}

impl SevdeskGateway {
    /// Create a gateway from configuration and a credential provider.
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, FakturoError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FakturoError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            gate: RequestGate::new(config.min_request_interval()),
        })
    }

    async fn send_post(
        &self,
        path: &str,
        body: &SaveInvoiceRequest,
    ) -> Result<Response, GatewayError> {
        self.gate.pace().await;
        let key = self.credentials.api_key().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST request");

        self.http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, key)
            .json(body)
            .send()
            .await
            .map_err(transport_error)
    }

    async fn send_get(&self, path: &str) -> Result<Response, GatewayError> {
        self.gate.pace().await;
        let key = self.credentials.api_key().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET request");

        self.http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, key)
            .send()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl InvoiceGateway for SevdeskGateway {
    #[instrument(skip(self, draft), fields(contact = %draft.contact_label))]
    async fn create_invoice(
        &self,
        draft: &InvoiceDraft,
    ) -> Result<CreatedInvoice, GatewayError> {
        let request = SaveInvoiceRequest::from_draft(draft)?;
        let response = self.send_post("/Invoice/Factory/saveInvoice", &request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_http_failure(status, response).await);
        }

        let parsed: SaveInvoiceResponse = response.json().await.map_err(|err| {
            warn!(error = %err, "invoice response did not match the expected shape");
            GatewayError::MalformedResponse
        })?;
        parsed.into_created()
    }

    #[instrument(skip(self))]
    async fn list_contacts(&self) -> Result<Vec<Contact>, GatewayError> {
        let response = self.send_get("/Contact").await?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_http_failure(status, response).await);
        }

        let parsed: ContactListResponse = response.json().await.map_err(|err| {
            warn!(error = %err, "contact list did not match the expected shape");
            GatewayError::MalformedResponse
        })?;
        Ok(parsed.objects.into_iter().map(Contact::from).collect())
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Network { message: err.to_string() }
}

/// Derive the failure message for a non-2xx response: a structured
/// error body wins, the status line is the fallback.
async fn classify_http_failure(status: StatusCode, response: Response) -> GatewayError {
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.error)
        .and_then(|detail| detail.message)
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("API request failed: {} {}", status.as_u16(), reason),
            None => format!("API request failed: {}", status.as_u16()),
        });

    GatewayError::Http { status: status.as_u16(), message }
}
