//! Startup checks run once before the walk begins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, error, info};

use crate::error::SortError;

/// Confirms that `path` exists and is a directory.
///
/// Nothing is written anywhere when this fails, so a bad source never leaves an
/// output folder behind.
pub async fn ensure_source(path: &Path) -> Result<PathBuf, SortError> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!(source = %path.display(), "Source folder does not exist");
            return Err(SortError::SourceMissing(path.to_path_buf()));
        }
        Err(e) => {
            error!(source = %path.display(), error = %e, "Failed to inspect source folder");
            return Err(SortError::SourceInspect {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if !metadata.is_dir() {
        error!(source = %path.display(), "Source path is not a directory");
        return Err(SortError::SourceNotDirectory(path.to_path_buf()));
    }

    debug!(source = %path.display(), "Source folder validated");
    Ok(path.to_path_buf())
}

/// Creates the output root if it is missing.
///
/// Only the last path component is created; a missing parent is a fatal error.
pub async fn ensure_output(path: &Path) -> Result<PathBuf, SortError> {
    let result = match fs::create_dir(path).await {
        Ok(()) => {
            info!(output = %path.display(), "Created output folder");
            return Ok(path.to_path_buf());
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => match fs::metadata(path).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            // Something other than a directory sits at the output path.
            _ => Err(e),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            debug!(output = %path.display(), "Output folder already exists");
            Ok(path.to_path_buf())
        }
        Err(e) => {
            error!(output = %path.display(), error = %e, "Failed to create output folder");
            Err(SortError::OutputCreate {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }
}

/// Locates the output root inside the source tree, if it lives there.
///
/// Returns the output's path as the walk of `source` would spell it, so the walk can skip
/// it; otherwise it would find the files it has just copied. An output that is the source
/// folder itself cannot be separated from the files being sorted and is rejected.
pub async fn output_within_source(
    source: &Path,
    output: &Path,
) -> Result<Option<PathBuf>, SortError> {
    let real_source = fs::canonicalize(source)
        .await
        .map_err(|e| SortError::SourceInspect {
            path: source.to_path_buf(),
            source: e,
        })?;
    let real_output = fs::canonicalize(output)
        .await
        .map_err(|e| SortError::OutputInspect {
            path: output.to_path_buf(),
            source: e,
        })?;

    if real_output == real_source {
        error!(output = %output.display(), "Output folder is the source folder");
        return Err(SortError::OutputIsSource(output.to_path_buf()));
    }

    match real_output.strip_prefix(&real_source) {
        Ok(relative) => {
            let nested = source.join(relative);
            info!(output = %nested.display(), "Output folder is inside the source, it will not be scanned");
            Ok(Some(nested))
        }
        Err(_) => Ok(None),
    }
}
