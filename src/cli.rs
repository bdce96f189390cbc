//! Command-line interface definitions for Feed Digest.
//!
//! All options can be provided via command-line flags or environment
//! variables; both paths have working-directory-relative defaults so a
//! bare `feed_digest` invocation works from a checkout.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the Feed Digest pipeline.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./feeds.yaml in, ./public/data out
/// feed_digest
///
/// # Explicit paths
/// feed_digest -c config/feeds.json -o /var/www/digest
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the feed configuration file (YAML or JSON)
    #[arg(short, long, env = "FEED_DIGEST_CONFIG", default_value = "feeds.yaml")]
    pub config: PathBuf,

    /// Output directory for the items.json / meta.json artifact pair
    #[arg(
        short,
        long,
        env = "FEED_DIGEST_OUTPUT_DIR",
        default_value = "public/data"
    )]
    pub output_dir: PathBuf,
}
