//! Filesystem helpers for ops and test tooling

use std::path::Path;
use tracing::{debug, warn};

/// Delete the file at `path` if it exists.
///
/// Missing files and permission failures are logged and swallowed, so an
/// environment reset can run unconditionally before or after a batch. This
/// is tooling around the pipeline, not part of it.
pub fn reset_environment<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();

    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed environment file");
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Environment file already absent");
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Could not remove environment file");
        },
    }
}
