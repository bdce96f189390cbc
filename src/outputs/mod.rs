//! Output artifact generation.
//!
//! One submodule, [`json`], writes the artifact pair the downstream
//! browser reads:
//!
//! ```text
//! output_dir/
//! ├── items.json   # ranked, bounded NormalizedItem records
//! └── meta.json    # {generatedAt, feedCount, itemCount, errors}
//! ```

pub mod json;
