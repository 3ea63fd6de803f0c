#![doc = "ftdb-harvest: crawls the ft-datenbank.de catalogue into one JSON snapshot."]

//! The crawl walks two levels of paginated endpoints: the construction-kit
//! listing, then each kit's parts listing. Records are normalized into a
//! canonical shape and merged into a single `{kits, parts}` document with
//! per-kit part counts kept separate from the shared part records.
//!
//! Image retrieval, thumbnail cropping and spreadsheet export are separate
//! consumers of the snapshot document and live elsewhere.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod harvest;
pub mod load_config;
pub mod normalize;
pub mod paginate;
pub mod resolve;
pub mod snapshot;

pub use api::{HttpTicketApi, PageEnvelope, TicketApi};
pub use config::HarvestConfig;
pub use error::HarvestError;
pub use harvest::{harvest, HarvestReport};
pub use snapshot::{Kit, Part, Snapshot};
