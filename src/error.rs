use std::fmt;

/// Errors surfaced while crawling and normalizing the remote catalogue.
///
/// The API signals its own failures through the envelope `status` field, so
/// a response can be well-formed HTTP and still be an error
/// ([`HarvestError::RemoteStatus`]). Transport problems keep the URL they
/// occurred on; decoding problems keep the record they occurred in.
#[derive(Debug)]
pub enum HarvestError {
    /// The envelope status field was not `"OK"`. Always fatal for the run.
    RemoteStatus { status: String, url: String },
    /// Network-level failure: timeout, reset, non-2xx, undecodable body.
    Transport { url: String, source: reqwest::Error },
    /// A JSON payload (outer response or an embedded encoded field) did not
    /// decode to the documented shape.
    Decode { context: String, source: serde_json::Error },
    /// A raw record was missing a field, or the field had a shape the
    /// normalization rules do not cover.
    UnexpectedShape { field: &'static str, context: String },
}

impl HarvestError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        HarvestError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        HarvestError::Decode {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn shape(field: &'static str, context: impl Into<String>) -> Self {
        HarvestError::UnexpectedShape {
            field,
            context: context.into(),
        }
    }

    /// True for the hard API-status error that aborts a whole run, as
    /// opposed to failures that can be scoped to a single kit.
    pub fn is_fatal_status(&self) -> bool {
        matches!(self, HarvestError::RemoteStatus { .. })
    }
}

impl fmt::Display for HarvestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarvestError::RemoteStatus { status, url } => {
                write!(f, "unexpected API status {status:?} from {url}")
            }
            HarvestError::Transport { url, source } => {
                write!(f, "request to {url} failed: {source}")
            }
            HarvestError::Decode { context, source } => {
                write!(f, "failed to decode {context}: {source}")
            }
            HarvestError::UnexpectedShape { field, context } => {
                write!(f, "field `{field}` is missing or has an unexpected shape in {context}")
            }
        }
    }
}

impl std::error::Error for HarvestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarvestError::Transport { source, .. } => Some(source),
            HarvestError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
