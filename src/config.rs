//! Run configuration and the fixed constants of the sorting pipeline.

use std::path::PathBuf;
use tracing::{debug, info};

/// Bucket used for files whose name carries no extension.
pub const FALLBACK_BUCKET: &str = "no_extension";

/// Size of the buffer each copy streams through (1 MiB).
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Upper bound on copies holding file handles at the same time.
pub const DEFAULT_MAX_OPEN_FILES: usize = 64;

/// Everything a single sorting run needs.
///
/// `max_open_files` is private so it can only be set through
/// [`SortConfig::with_max_open_files`], which keeps it at one or more.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    max_open_files: usize,
}

impl SortConfig {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            max_open_files: DEFAULT_MAX_OPEN_FILES,
        }
    }

    pub fn with_max_open_files(mut self, max_open_files: usize) -> Self {
        // A zero-permit semaphore would never let a copy start.
        self.max_open_files = max_open_files.max(1);
        self
    }

    pub fn max_open_files(&self) -> usize {
        self.max_open_files
    }

    pub fn trace_loaded(&self) {
        info!(
            source = %self.source.display(),
            output = %self.output.display(),
            max_open_files = self.max_open_files,
            "Loaded SortConfig"
        );
        debug!(?self, "SortConfig loaded (full debug)");
    }
}
