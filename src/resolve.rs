//! Per-kit resolution: the detail fetch and the parts walk.

use std::collections::BTreeMap;

use tracing::debug;

use crate::api::{fetch_checked, TicketApi};
use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::normalize::{parse_common, parse_count, parse_weight};
use crate::paginate::PagedResource;
use crate::snapshot::{Kit, Part};

/// Fetches one kit's detail record and normalizes it.
///
/// The parts mapping starts empty; it is filled by [`resolve_parts`] in a
/// separate pass once every kit is known.
pub async fn resolve_kit<C>(
    client: &C,
    config: &HarvestConfig,
    id: u64,
) -> Result<Kit, HarvestError>
where
    C: TicketApi + ?Sized,
{
    let url = config.ticket_url(id);
    let envelope = fetch_checked(client, &url).await?;
    // The detail endpoint wraps a single object in `results`.
    let common = parse_common(&envelope.results, &config.base_url)?;
    debug!(ticket = id, title = %common.title, "Resolved construction kit");
    Ok(Kit {
        common,
        parts: BTreeMap::new(),
    })
}

/// Walks the paginated parts listing of one kit.
///
/// Each part records its kit-specific count on the kit and is upserted
/// into the shared registry, overwriting any earlier sighting. The count
/// stays out of the shared [`Part`] record by construction. A reported
/// total of zero leaves the kit's mapping empty without fetching any page.
pub async fn resolve_parts<C>(
    client: &C,
    config: &HarvestConfig,
    kit: &mut Kit,
    registry: &mut BTreeMap<u64, Part>,
) -> Result<(), HarvestError>
where
    C: TicketApi + ?Sized,
{
    let resource = PagedResource::new(client, config.partslist_url(kit.common.id));
    let probe = resource.probe().await?;
    if probe.total == 0 {
        debug!(ticket = kit.common.id, "Kit has no parts list");
        return Ok(());
    }
    for raw in resource.records_after(&probe).await? {
        let common = parse_common(&raw, &config.base_url)?;
        let part_id = common.id;
        let weight = parse_weight(raw.get("ft_weight"), part_id)?;
        let count = parse_count(raw.get("ft_count"), part_id)?;
        kit.parts.insert(part_id, count);
        registry.insert(part_id, Part { common, weight });
    }
    debug!(
        ticket = kit.common.id,
        parts = kit.parts.len(),
        "Resolved parts list"
    );
    Ok(())
}
