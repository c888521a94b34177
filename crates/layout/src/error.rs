//! Layout-level error types.
//!
//! The layout algorithms themselves never fail.  These errors come from the
//! boundary: loading documents and validating layout constants.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while preparing a layout run.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A layout constant is negative, NaN or infinite.
    #[error("invalid layout config: '{field}' must be a finite, non-negative number (got {value})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
    },

    /// A document could not be decoded.
    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A document could not be read from disk.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
