//! Small file-system helpers shared by the binary entry point.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;

use tokio::fs;
use tracing::{info, instrument};

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file. Catching a read-only
/// output location here means no feed is fetched for nothing.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync probe write; simpler error surface than async here.
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
