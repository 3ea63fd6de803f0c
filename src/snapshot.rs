//! The assembled snapshot document and its canonical serialized form.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::normalize::CommonFields;

/// One construction kit. `parts` maps part id to the kit-specific count;
/// `None` when the API reports no usable count for that entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    #[serde(flatten)]
    pub common: CommonFields,
    pub parts: BTreeMap<u64, Option<i64>>,
}

/// One catalogue part, shared across kits.
///
/// There is deliberately no count field here: the same part appears in
/// multiple kits with different quantities, so counts live only in each
/// kit's `parts` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(flatten)]
    pub common: CommonFields,
    pub weight: Option<f64>,
}

/// The `{kits, parts}` document produced by one crawl.
///
/// Every part id referenced by any kit exists in `parts`; a part
/// rediscovered in a later kit overwrites its shared record (last write
/// wins) without ever carrying a count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kits: BTreeMap<u64, Kit>,
    pub parts: BTreeMap<u64, Part>,
}

impl Snapshot {
    /// Canonical serialized form: map keys sorted (the `BTreeMap` order)
    /// and stable two-space indentation. Re-parsing yields a structurally
    /// identical document.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Writes the document to `path`, staging through a temp file in the
    /// destination directory so an aborted run never leaves a truncated
    /// document behind.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let text = self
            .to_canonical_json()
            .context("Failed to serialize snapshot")?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to stage snapshot next to {}", path.display()))?;
        staged.write_all(text.as_bytes())?;
        staged.write_all(b"\n")?;
        staged
            .persist(path)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        Ok(())
    }
}
