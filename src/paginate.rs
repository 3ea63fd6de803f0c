//! Page walking for the catalogue's paginated endpoints.

use serde_json::Value;
use tracing::debug;

use crate::api::{fetch_checked, PageEnvelope, TicketApi};
use crate::error::HarvestError;

/// Walks all pages of one paginated endpoint, in ascending page order.
///
/// The first fetch of the bare URL only establishes `cPages` and `cTotal`;
/// its results are discarded and pages are then requested explicitly,
/// starting at 1. A non-`"OK"` status on any page aborts the whole walk.
/// Retries are the caller's concern; none happen here.
pub struct PagedResource<'a, C: ?Sized> {
    client: &'a C,
    base_url: String,
}

impl<'a, C> PagedResource<'a, C>
where
    C: TicketApi + ?Sized,
{
    pub fn new(client: &'a C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn page_url(&self, page: u32) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}page={}", self.base_url, separator, page)
    }

    /// Fetches the bare URL to learn the page and total counts without
    /// walking any page.
    pub async fn probe(&self) -> Result<PageEnvelope, HarvestError> {
        fetch_checked(self.client, &self.base_url).await
    }

    /// All result records across all pages.
    pub async fn records(&self) -> Result<Vec<Value>, HarvestError> {
        let probe = self.probe().await?;
        self.records_after(&probe).await
    }

    /// Continues a walk whose probe response is already known. A zero
    /// total means no pages are fetched at all.
    pub async fn records_after(&self, probe: &PageEnvelope) -> Result<Vec<Value>, HarvestError> {
        let mut records = Vec::new();
        if probe.total == 0 {
            return Ok(records);
        }
        for page in 1..=probe.pages {
            let url = self.page_url(page);
            let envelope = fetch_checked(self.client, &url).await?;
            let page_records = envelope.records();
            debug!(url = %url, records = page_records.len(), "Fetched catalogue page");
            records.extend(page_records);
        }
        Ok(records)
    }
}
