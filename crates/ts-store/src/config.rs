//! JSON config loading.

use std::fs;
use std::path::Path;

use ts_core::SimConfig;

use crate::{StoreError, StoreResult};

/// Read a [`SimConfig`] from a JSON file.  Absent fields take their
/// defaults, so `{}` is a valid config.
///
/// ```json
/// { "seed": 7, "multiplier": 60, "settings": { "stationStartNumber": 5 } }
/// ```
pub fn load_config(path: &Path) -> StoreResult<SimConfig> {
    let raw = fs::read_to_string(path)?;
    parse_config(&raw).map_err(|e| match e {
        StoreError::Json { source, .. } => StoreError::Json { key: path.display().to_string(), source },
        other => other,
    })
}

/// [`load_config`] from an in-memory string.
pub fn parse_config(raw: &str) -> StoreResult<SimConfig> {
    serde_json::from_str(raw).map_err(|source| StoreError::Json { key: "config".to_owned(), source })
}
