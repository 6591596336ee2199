//! Lazy recursive enumeration of the regular files under a directory.
//!
//! The walk is a [`Stream`]: each directory is opened only when the consumer asks for the
//! next file, so copies dispatched for early files make progress while the rest of the tree
//! is still being read. Unreadable directories are logged and skipped.

use std::path::PathBuf;

use futures::stream::{self, Stream};
use tokio::fs::{self, ReadDir};
use tracing::{debug, error};

/// Yields every regular file reachable from `source`, in no particular order.
///
/// Symlinks are yielded when they resolve to a regular file. Symlinked directories are not
/// descended into.
pub fn walk(source: impl Into<PathBuf>) -> impl Stream<Item = PathBuf> {
    walk_excluding(source, None)
}

/// Like [`walk`], but never descends into `excluded`.
///
/// `excluded` is compared against paths as the walk builds them, i.e. `source` joined with
/// the relative path of the directory.
pub fn walk_excluding(
    source: impl Into<PathBuf>,
    excluded: Option<PathBuf>,
) -> impl Stream<Item = PathBuf> {
    let state = WalkState {
        pending: vec![source.into()],
        current: None,
        excluded,
    };
    stream::unfold(state, |mut state| async move {
        let file = state.next_file().await?;
        Some((file, state))
    })
}

struct WalkState {
    pending: Vec<PathBuf>,
    current: Option<(PathBuf, ReadDir)>,
    excluded: Option<PathBuf>,
}

impl WalkState {
    async fn next_file(&mut self) -> Option<PathBuf> {
        loop {
            if self.current.is_none() {
                let dir = self.pending.pop()?;
                match fs::read_dir(&dir).await {
                    Ok(entries) => self.current = Some((dir, entries)),
                    Err(e) => {
                        error!(dir = %dir.display(), error = %e, "Failed to read directory, skipping it");
                        continue;
                    }
                }
            }
            let Some((dir, entries)) = self.current.as_mut() else {
                continue;
            };

            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => {
                    self.current = None;
                    continue;
                }
                Err(e) => {
                    error!(dir = %dir.display(), error = %e, "Failed while listing directory, skipping the rest of it");
                    self.current = None;
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to read entry type, skipping it");
                    continue;
                }
            };

            if file_type.is_dir() {
                if self.excluded.as_ref() == Some(&path) {
                    debug!(dir = %path.display(), "Skipping output folder inside source");
                    continue;
                }
                self.pending.push(path);
            } else if file_type.is_file() {
                return Some(path);
            } else if file_type.is_symlink() {
                match fs::metadata(&path).await {
                    Ok(target) if target.is_file() => return Some(path),
                    Ok(_) => debug!(path = %path.display(), "Skipping symlink to a non-file"),
                    Err(e) => debug!(path = %path.display(), error = %e, "Skipping dangling symlink"),
                }
            } else {
                debug!(path = %path.display(), "Skipping special file");
            }
        }
    }
}
