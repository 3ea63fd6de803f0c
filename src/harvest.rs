//! Top-level orchestration: list kits, resolve each, fill in all parts.
//!
//! The crawl is strictly sequential: one request at a time, awaited in
//! order. Parts are resolved only after every kit exists, so the shared
//! parts registry accumulates without forward references; kits are walked
//! in ascending id order to keep last-write-wins on rediscovered parts
//! reproducible.

use serde_json::Value;
use tracing::{error, info};

use crate::api::TicketApi;
use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::normalize::ticket_id;
use crate::paginate::PagedResource;
use crate::resolve::{resolve_kit, resolve_parts};
use crate::snapshot::Snapshot;

/// Summary of one crawl for logging and the CLI report.
#[derive(Debug, Default)]
pub struct HarvestReport {
    pub kits: usize,
    pub parts: usize,
    /// Kits whose parts walk failed with a non-fatal error; their parts
    /// mapping may be incomplete.
    pub failed_kits: Vec<u64>,
}

/// Crawls the whole catalogue and assembles the snapshot document.
///
/// Listing and kit-detail failures are fatal, as is a non-`"OK"` API
/// status anywhere. A transport or decoding failure inside one kit's
/// parts walk is scoped to that kit: it is logged, recorded in the
/// report, and the crawl moves on.
pub async fn harvest<C>(
    client: &C,
    config: &HarvestConfig,
) -> Result<(Snapshot, HarvestReport), HarvestError>
where
    C: TicketApi + ?Sized,
{
    let listing_url = config.listing_url();
    info!(url = %listing_url, "Listing construction kits");
    let listing = PagedResource::new(client, listing_url).records().await?;
    let ids = kit_ids(&listing, &config.excluded_category)?;
    info!(
        kits = ids.len(),
        excluded_category = %config.excluded_category,
        "Kit listing complete"
    );

    let mut snapshot = Snapshot::default();
    for id in ids {
        // A ticket id can show up on more than one listing page; each kit
        // is fetched once per run.
        if snapshot.kits.contains_key(&id) {
            continue;
        }
        let kit = resolve_kit(client, config, id).await?;
        snapshot.kits.insert(id, kit);
    }

    let mut report = HarvestReport::default();
    let resolved: Vec<u64> = snapshot.kits.keys().copied().collect();
    for id in resolved {
        let Some(kit) = snapshot.kits.get_mut(&id) else {
            continue;
        };
        match resolve_parts(client, config, kit, &mut snapshot.parts).await {
            Ok(()) => {}
            Err(err) if err.is_fatal_status() => return Err(err),
            Err(err) => {
                error!(kit = id, error = %err, "Parts walk failed, continuing with next kit");
                report.failed_kits.push(id);
            }
        }
    }

    report.kits = snapshot.kits.len();
    report.parts = snapshot.parts.len();
    info!(
        kits = report.kits,
        parts = report.parts,
        failed_kits = report.failed_kits.len(),
        "Harvest complete"
    );
    Ok((snapshot, report))
}

/// Ticket ids from the listing records, skipping every record carrying the
/// excluded category.
fn kit_ids(records: &[Value], excluded_category: &str) -> Result<Vec<u64>, HarvestError> {
    records
        .iter()
        .filter(|raw| !in_category(raw, excluded_category))
        .map(ticket_id)
        .collect()
}

/// Whether a raw record's `ft_cat_all` mentions the given category. The
/// field arrives as an array of category ids, occasionally as a single
/// string.
fn in_category(raw: &Value, category: &str) -> bool {
    match raw.get("ft_cat_all") {
        Some(Value::Array(items)) => items.iter().any(|item| match item {
            Value::String(s) => s == category,
            Value::Number(n) => n.to_string() == category,
            _ => false,
        }),
        Some(Value::String(s)) => s.contains(category),
        _ => false,
    }
}
