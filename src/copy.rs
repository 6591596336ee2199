//! Classifying copier: streams one file into its extension bucket.

use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{error, info};

use crate::classify::FileRecord;
use crate::config::CHUNK_SIZE;
use crate::error::CopyError;

/// A file that made it into its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    pub record: FileRecord,
    pub bytes: u64,
}

/// Copies `file` to `output_root/<bucket>/<file name>`.
///
/// The bucket directory is created on demand; an existing bucket is not an error, so
/// concurrent copies into the same new bucket both succeed. An existing destination is
/// truncated. A failure part way through leaves the partial destination in place.
pub async fn copy_file(file: &Path, output_root: &Path) -> Result<CopiedFile, CopyError> {
    let record = FileRecord::resolve(file, output_root)?;

    fs::create_dir_all(&record.bucket_dir)
        .await
        .map_err(|e| CopyError::CreateBucket {
            path: record.bucket_dir.clone(),
            source: e,
        })?;

    let mut src = File::open(&record.source)
        .await
        .map_err(|e| CopyError::OpenSource {
            path: record.source.clone(),
            source: e,
        })?;
    let mut dst = File::create(&record.destination)
        .await
        .map_err(|e| CopyError::CreateDestination {
            path: record.destination.clone(),
            source: e,
        })?;

    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut bytes = 0u64;
    loop {
        let read = src.read(&mut buffer).await.map_err(|e| CopyError::Read {
            path: record.source.clone(),
            source: e,
        })?;
        if read == 0 {
            break;
        }
        dst.write_all(&buffer[..read])
            .await
            .map_err(|e| CopyError::Write {
                path: record.destination.clone(),
                source: e,
            })?;
        bytes += read as u64;
    }
    // tokio's File hands the last write to a background thread; flush waits for it.
    dst.flush().await.map_err(|e| CopyError::Write {
        path: record.destination.clone(),
        source: e,
    })?;

    Ok(CopiedFile { record, bytes })
}

/// Runs [`copy_file`] and logs the outcome.
///
/// The error is handed back for bookkeeping only; callers must not let it affect other
/// copies.
pub async fn copy_into_bucket(file: &Path, output_root: &Path) -> Result<CopiedFile, CopyError> {
    match copy_file(file, output_root).await {
        Ok(copied) => {
            info!(
                source = %copied.record.source.display(),
                destination = %copied.record.destination.display(),
                bucket = %copied.record.bucket.to_string_lossy(),
                bytes = copied.bytes,
                "Copied file"
            );
            Ok(copied)
        }
        Err(e) => {
            error!(source = %file.display(), error = %e, "Failed to copy file");
            Err(e)
        }
    }
}
