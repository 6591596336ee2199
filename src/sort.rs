//! Pipeline: validate the inputs, walk the source and copy every file into its bucket.
//!
//! Each discovered file becomes its own task on the runtime. A semaphore caps how many
//! copies are in flight (and so how many file handles and chunk buffers exist at once);
//! the walk waits for a free permit before dispatching the next file. Every task is joined
//! before [`sort_files`] returns, and its source path travels with its join handle so a
//! panicking copy is still reported against the right file.
//!
//! An output folder nested inside the source is left out of the walk.
//!
//! A failed copy is recorded in the [`SortReport`] and does not stop the run. Only the
//! startup checks in [`crate::validate`] abort it.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::config::SortConfig;
use crate::copy::{copy_into_bucket, CopiedFile};
use crate::error::{CopyError, SortError};
use crate::validate::{ensure_output, ensure_source, output_within_source};
use crate::walk::walk_excluding;

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct SortReport {
    pub copied: usize,
    pub bytes: u64,
    pub failed: Vec<FailedFile>,
}

#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

impl SortReport {
    /// True when every discovered file was copied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, path: PathBuf, result: Result<CopiedFile, CopyError>) {
        match result {
            Ok(copied) => {
                self.copied += 1;
                self.bytes += copied.bytes;
            }
            Err(e) => self.failed.push(FailedFile {
                path,
                error: e.to_string(),
            }),
        }
    }
}

type CopyOutcome = Result<CopiedFile, CopyError>;

/// Copy tasks spawned on the runtime, each joined back together with the file it copies.
#[derive(Default)]
pub struct CopyTasks {
    pending: FuturesUnordered<BoxFuture<'static, (PathBuf, Result<CopyOutcome, JoinError>)>>,
}

impl CopyTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `copy` for `file`. The task starts running right away.
    pub fn spawn<F>(&mut self, file: PathBuf, copy: F)
    where
        F: Future<Output = CopyOutcome> + Send + 'static,
    {
        let handle = tokio::spawn(copy);
        self.pending.push(async move { (file, handle.await) }.boxed());
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Waits for every task and records its outcome in `report`.
    pub async fn join_into(mut self, report: &mut SortReport) {
        while let Some((path, joined)) = self.pending.next().await {
            match joined {
                Ok(result) => report.record(path, result),
                Err(e) => {
                    error!(source = %path.display(), error = %e, "Copy task did not finish");
                    report.failed.push(FailedFile {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }
    }
}

pub async fn sort_files(config: &SortConfig) -> Result<SortReport, SortError> {
    info!(
        source = %config.source.display(),
        output = %config.output.display(),
        "Starting sort"
    );

    let source = ensure_source(&config.source).await?;
    let output = ensure_output(&config.output).await?;
    let nested_output = output_within_source(&source, &output).await?;
    let output = Arc::new(output);

    let gate = Arc::new(Semaphore::new(config.max_open_files()));
    let mut tasks = CopyTasks::new();
    let mut report = SortReport::default();

    let files = walk_excluding(source, nested_output);
    futures::pin_mut!(files);
    while let Some(file) = files.next().await {
        let Ok(permit) = Arc::clone(&gate).acquire_owned().await else {
            error!("Copy gate closed, stopping dispatch");
            break;
        };
        let task_file = file.clone();
        let output = Arc::clone(&output);
        tasks.spawn(file, async move {
            let result = copy_into_bucket(&task_file, &output).await;
            drop(permit);
            result
        });
    }
    tasks.join_into(&mut report).await;

    if report.is_complete() {
        info!(copied = report.copied, bytes = report.bytes, "Sort complete");
    } else {
        warn!(
            copied = report.copied,
            failed = report.failed.len(),
            bytes = report.bytes,
            "Sort finished with failures"
        );
    }
    Ok(report)
}
