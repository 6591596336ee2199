//! Maps a file to the bucket it belongs in.
//!
//! Classification looks only at the file name: the text after its final dot, lowercased.
//! Names without such a suffix (`Makefile`, `.bashrc`, `notes.`) land in
//! [`FALLBACK_BUCKET`].
//!
//! Bucket names are `OsString`s: an extension that is not valid UTF-8 keeps its bytes
//! (ASCII letters lowercased) rather than collapsing into a replacement character.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::FALLBACK_BUCKET;
use crate::error::CopyError;

/// Returns the bucket name for `path`.
pub fn bucket_name(path: &Path) -> OsString {
    match path.extension() {
        Some(ext) if !ext.is_empty() => match ext.to_str() {
            Some(ext) => ext.to_lowercase().into(),
            None => ext.to_ascii_lowercase(),
        },
        _ => OsString::from(FALLBACK_BUCKET),
    }
}

/// A discovered source file together with where it is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub source: PathBuf,
    pub bucket: OsString,
    pub bucket_dir: PathBuf,
    pub destination: PathBuf,
}

impl FileRecord {
    /// Resolves the bucket directory and destination path of `source` under `output_root`.
    pub fn resolve(source: &Path, output_root: &Path) -> Result<Self, CopyError> {
        let file_name = source
            .file_name()
            .ok_or_else(|| CopyError::NoFileName(source.to_path_buf()))?;
        let bucket = bucket_name(source);
        let bucket_dir = output_root.join(&bucket);
        let destination = bucket_dir.join(file_name);
        Ok(Self {
            source: source.to_path_buf(),
            bucket,
            bucket_dir,
            destination,
        })
    }
}
