//! Loads the YAML config file into a [`HarvestConfig`].
//!
//! This is the only place untrusted YAML is parsed. All fields are
//! optional in the file; omitted keys fall back to the compiled defaults.
//! Errors use `anyhow` for context-rich diagnostics at the CLI boundary.

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{error, info};

use crate::config::HarvestConfig;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HarvestConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let config: HarvestConfig = match serde_yaml::from_str(&content) {
        Ok(config) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            config
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    config.trace_loaded();
    Ok(config)
}
