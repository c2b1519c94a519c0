//! Result persistence.
//!
//! Writes a `MetricsSnapshot` as pretty-printed JSON:
//!
//! ```text
//! {
//!   "timestamp": "2026-10-18T09:30:00.123Z",
//!   "results": {
//!     "Go": { "init_duration_ms": 72.4, "invocation_duration_ms": 1.9 }
//!   }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metrics::MetricsSnapshot;

/// Errors raised while persisting or loading results.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid results JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SinkError + '_ {
    move |source| SinkError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `snapshot` to `path`, creating parent directories as needed.
pub fn write_snapshot(snapshot: &MetricsSnapshot, path: impl AsRef<Path>) -> Result<(), SinkError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    fs::write(path, json).map_err(io_error(path))?;

    tracing::debug!(path = %path.display(), targets = snapshot.len(), "Results written");
    Ok(())
}

/// Read a snapshot previously written by `write_snapshot`.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<MetricsSnapshot, SinkError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    Ok(serde_json::from_str(&content)?)
}
