//! Remote ticket API client.
//!
//! Every endpoint of the catalogue API answers with the same pagination
//! envelope, so the client trait has a single method: fetch a URL, decode
//! the envelope. The generated mock is exported behind the
//! `test-export-mocks` feature so integration tests can drive the crawl
//! without network access.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::HarvestError;

/// Success marker expected in every envelope `status` field.
pub const STATUS_OK: &str = "OK";

/// Response envelope shared by all catalogue endpoints.
///
/// `results` stays untyped: the listing endpoints return an array of raw
/// records, the single-ticket endpoint returns one object.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEnvelope {
    pub status: String,
    #[serde(rename = "cPages", default)]
    pub pages: u32,
    #[serde(rename = "cTotal", default)]
    pub total: u64,
    #[serde(default)]
    pub results: Value,
}

impl PageEnvelope {
    /// The result records of a listing response. A detail response (object
    /// `results`) yields an empty list.
    pub fn records(&self) -> Vec<Value> {
        self.results.as_array().cloned().unwrap_or_default()
    }
}

/// Fetches one URL of the catalogue API.
///
/// Implementations report transport and body-decoding problems; the
/// envelope `status` marker is checked uniformly by [`fetch_checked`].
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait TicketApi: Send + Sync {
    async fn fetch_envelope(&self, url: &str) -> Result<PageEnvelope, HarvestError>;
}

/// Fetches a URL and enforces the `status == "OK"` contract.
///
/// Any other status value aborts the crawl of the resource at the point of
/// detection, carrying the unexpected value and the URL.
pub async fn fetch_checked<C>(client: &C, url: &str) -> Result<PageEnvelope, HarvestError>
where
    C: TicketApi + ?Sized,
{
    let envelope = client.fetch_envelope(url).await?;
    if envelope.status != STATUS_OK {
        return Err(HarvestError::RemoteStatus {
            status: envelope.status,
            url: url.to_string(),
        });
    }
    Ok(envelope)
}

/// reqwest-backed [`TicketApi`] used by the CLI.
pub struct HttpTicketApi {
    client: reqwest::Client,
}

impl HttpTicketApi {
    /// Builds a client with a request timeout. The crawl itself never
    /// retries; a timed-out request surfaces as a transport error.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TicketApi for HttpTicketApi {
    async fn fetch_envelope(&self, url: &str) -> Result<PageEnvelope, HarvestError> {
        debug!(url = %url, "Fetching catalogue API");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HarvestError::transport(url, source))?
            .error_for_status()
            .map_err(|source| HarvestError::transport(url, source))?;
        response
            .json::<PageEnvelope>()
            .await
            .map_err(|source| HarvestError::transport(url, source))
    }
}
