use std::path::PathBuf;

use anyhow::{Context, Result};

pub mod list;
pub mod profile;
pub mod query;
pub mod thin;
pub mod track;

/// Resolve the tile directory or fail with a usage hint.
fn require_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    data_dir.context(
        "TOPOTRACK_DATA_DIR environment variable not set. Use --data-dir or set TOPOTRACK_DATA_DIR",
    )
}
