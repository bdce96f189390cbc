//! JSON artifact pair writer.
//!
//! The items and metadata files are the downstream browser's only interface
//! to the pipeline, so the write path guards against partial output: both
//! documents serialize fully before anything touches disk, both land in
//! `.tmp` siblings, and each is moved into place with an atomic rename.
//! A reader can race a run and still never observe truncated JSON.

use std::error::Error;
use std::path::Path;

use tokio::fs;
use tracing::{info, instrument};

use crate::models::{NormalizedItem, RunMetadata};

/// File name of the items artifact.
pub const ITEMS_FILE: &str = "items.json";
/// File name of the metadata artifact.
pub const META_FILE: &str = "meta.json";

/// Write the artifact pair into `output_dir`, creating it if needed.
///
/// A serialization failure writes nothing, leaving any previous pair in
/// place.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_artifacts(
    items: &[NormalizedItem],
    metadata: &RunMetadata,
    output_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let items_json = serde_json::to_string_pretty(items)?;
    let meta_json = serde_json::to_string_pretty(metadata)?;

    fs::create_dir_all(output_dir).await?;

    let items_tmp = output_dir.join(format!("{ITEMS_FILE}.tmp"));
    let meta_tmp = output_dir.join(format!("{META_FILE}.tmp"));
    fs::write(&items_tmp, items_json).await?;
    fs::write(&meta_tmp, meta_json).await?;

    // Both tmp files are complete before either rename.
    fs::rename(&items_tmp, output_dir.join(ITEMS_FILE)).await?;
    fs::rename(&meta_tmp, output_dir.join(META_FILE)).await?;

    info!(items = items.len(), "Wrote artifact pair");
    Ok(())
}
