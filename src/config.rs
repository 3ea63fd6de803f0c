use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Crawl configuration.
///
/// Every field has a compiled default, so a config file is only needed to
/// point the crawl at a different endpoint or category set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Base URL of the catalogue API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Category drilled on the kit listing endpoint.
    #[serde(default = "default_kit_category")]
    pub kit_category: String,
    /// Listing records carrying this category are skipped entirely.
    #[serde(default = "default_excluded_category")]
    pub excluded_category: String,
    /// Timeout applied to every single HTTP request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://ft-datenbank.de".to_string()
}

fn default_kit_category() -> String {
    "653".to_string()
}

fn default_excluded_category() -> String {
    "661".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            kit_category: default_kit_category(),
            excluded_category: default_excluded_category(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl HarvestConfig {
    fn base(&self) -> &str {
        // avoid "//" when the configured base carries a trailing slash
        self.base_url.trim_end_matches('/')
    }

    /// Paginated kit listing, drilled to the configured category.
    pub fn listing_url(&self) -> String {
        format!(
            "{}/api/tickets?drill_ft_cat_all={}",
            self.base(),
            self.kit_category
        )
    }

    /// Detail endpoint for a single ticket.
    pub fn ticket_url(&self, id: u64) -> String {
        format!("{}/api/ticket/{}", self.base(), id)
    }

    /// Paginated parts-of-kit endpoint.
    pub fn partslist_url(&self, id: u64) -> String {
        format!("{}/api/ft-partslist/{}", self.base(), id)
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            kit_category = %self.kit_category,
            excluded_category = %self.excluded_category,
            request_timeout_secs = self.request_timeout_secs,
            "Loaded HarvestConfig"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}
