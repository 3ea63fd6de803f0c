//! Normalization of raw ticket records into canonical fields.
//!
//! The remote records are loosely shaped: timestamps use a space separator,
//! article numbers arrive as a second layer of JSON encoded into a string,
//! counts and weights may be numbers or numeric strings. Everything the
//! documented rules do not cover surfaces as a decoding error rather than
//! silently producing wrong data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HarvestError;

/// Canonical fields shared by construction kits and parts.
///
/// `thumbnail_url` is omitted from the serialized document entirely when
/// the record carries no icon; presence of the key is the signal for
/// downstream consumers to attempt an image fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonFields {
    pub id: u64,
    pub created: String,
    pub title: String,
    pub article_numbers: BTreeMap<String, Value>,
    pub uuid: Option<String>,
    pub url_api: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail_url: Option<String>,
}

/// Extracts the ticket id. The API serves it as a JSON number; a numeric
/// string is tolerated.
pub fn ticket_id(raw: &Value) -> Result<u64, HarvestError> {
    match raw.get("ticket_id") {
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| HarvestError::shape("ticket_id", "ticket record")),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| HarvestError::shape("ticket_id", "ticket record")),
        _ => Err(HarvestError::shape("ticket_id", "ticket record")),
    }
}

/// Maps one raw record to [`CommonFields`].
pub fn parse_common(raw: &Value, base_url: &str) -> Result<CommonFields, HarvestError> {
    let base = base_url.trim_end_matches('/');
    let id = ticket_id(raw)?;
    let created = str_field(raw, "createdUTC", id)?.replace(' ', "T");
    let title = str_field(raw, "title", id)?.to_string();
    let article_numbers = parse_article_numbers(raw.get("ft_article_nos"), id)?;
    let uuid = raw
        .get("ft_variant_uuid")
        .and_then(Value::as_str)
        .map(str::to_string);
    let url_api = format!("{base}/api/ticket/{id}");
    // The public page URL is the API URL minus its API path segment;
    // deriving it keeps the two in lock-step if the template changes.
    let url = url_api.replacen("/api", "", 1);
    let thumbnail_url = raw
        .get("ft_icon")
        .and_then(Value::as_str)
        .filter(|icon| !icon.is_empty())
        .map(|icon| format!("{base}/thumbnail/{icon}"));
    Ok(CommonFields {
        id,
        created,
        title,
        article_numbers,
        uuid,
        url_api,
        url,
        thumbnail_url,
    })
}

/// Decodes the `ft_article_nos` payload: a JSON string holding a sequence
/// of `(number, year)` pairs.
///
/// Missing, `null` and the literal `"[]"` all yield an empty mapping. A
/// `null` article number becomes the empty-string key, since JSON object
/// keys cannot express null; the entry is never dropped.
pub fn parse_article_numbers(
    field: Option<&Value>,
    id: u64,
) -> Result<BTreeMap<String, Value>, HarvestError> {
    let encoded = match field {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::String(s)) if s == "[]" => return Ok(BTreeMap::new()),
        Some(Value::String(s)) => s,
        Some(_) => return Err(HarvestError::shape("ft_article_nos", format!("ticket {id}"))),
    };
    let pairs: Vec<(Option<String>, Value)> = serde_json::from_str(encoded)
        .map_err(|source| HarvestError::decode(format!("ft_article_nos of ticket {id}"), source))?;
    Ok(pairs
        .into_iter()
        .map(|(number, year)| (number.unwrap_or_default(), year))
        .collect())
}

/// Kit-specific part quantity. Absent, `null`, numeric zero and the empty
/// string all mean "no usable count"; everything else must parse as an
/// integer.
pub fn parse_count(field: Option<&Value>, id: u64) -> Result<Option<i64>, HarvestError> {
    match field {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(None),
            Some(count) => Ok(Some(count)),
            None => Err(HarvestError::shape("ft_count", format!("ticket {id}"))),
        },
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| HarvestError::shape("ft_count", format!("ticket {id}"))),
        Some(_) => Err(HarvestError::shape("ft_count", format!("ticket {id}"))),
    }
}

/// Part weight, served either as a JSON number or a numeric string.
pub fn parse_weight(field: Option<&Value>, id: u64) -> Result<Option<f64>, HarvestError> {
    match field {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| HarvestError::shape("ft_weight", format!("ticket {id}"))),
        Some(_) => Err(HarvestError::shape("ft_weight", format!("ticket {id}"))),
    }
}

fn str_field<'a>(raw: &'a Value, field: &'static str, id: u64) -> Result<&'a str, HarvestError> {
    raw.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| HarvestError::shape(field, format!("ticket {id}")))
}
