//! Error types for the sorting pipeline.
//!
//! [`SortError`] covers the fatal startup conditions that abort a run before any file is
//! copied. [`CopyError`] covers a single file and never leaves the task that produced it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("source folder {} does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("source path {} is not a directory", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error("failed to inspect source folder {}: {source}", .path.display())]
    SourceInspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output folder {}: {source}", .path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to inspect output folder {}: {source}", .path.display())]
    OutputInspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output folder {} is the source folder", .0.display())]
    OutputIsSource(PathBuf),
}

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("file {} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("failed to create bucket {}: {source}", .path.display())]
    CreateBucket {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {}: {source}", .path.display())]
    OpenSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {}: {source}", .path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
