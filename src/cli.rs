//! Command-line surface: argument parsing and the async entrypoint shared by `main` and the
//! integration tests.
//!
//! The binary takes two positional paths, the folder to sort and the folder to sort into.
//! `--max-open-files` (or `EXT_SORTER_MAX_OPEN_FILES`) tunes how many copies run at once.
//!
//! All sorting logic lives in [`crate::sort`]; this module only maps arguments onto a
//! [`SortConfig`] and reports the outcome.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::config::{SortConfig, DEFAULT_MAX_OPEN_FILES};
use crate::sort::{sort_files, SortReport};

/// Exit status when the arguments are rejected or the run cannot start.
pub const EXIT_FATAL: u8 = 1;

/// Exit status when the run finished but some files were not copied.
pub const EXIT_PARTIAL: u8 = 2;

/// Sort a folder's files into per-extension subfolders.
#[derive(Debug, Parser)]
#[clap(
    name = "ext-sorter",
    version,
    about = "Copy every file under a folder into subfolders named after its extension"
)]
pub struct Cli {
    /// Folder to scan recursively
    pub source_folder: PathBuf,

    /// Folder that receives one subfolder per extension
    pub output_folder: PathBuf,

    /// Maximum number of files copied at the same time
    #[clap(
        long,
        env = "EXT_SORTER_MAX_OPEN_FILES",
        default_value_t = DEFAULT_MAX_OPEN_FILES
    )]
    pub max_open_files: usize,
}

impl Cli {
    pub fn into_config(self) -> SortConfig {
        SortConfig::new(self.source_folder, self.output_folder)
            .with_max_open_files(self.max_open_files)
    }
}

/// Parses `args` (program name first).
///
/// On rejection clap's message is printed and the exit status to use is returned: a usage
/// error maps to [`EXIT_FATAL`], `--help` and `--version` to success.
pub fn parse_args_from<I, T>(args: I) -> Result<Cli, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        if e.use_stderr() {
            ExitCode::from(EXIT_FATAL)
        } else {
            ExitCode::SUCCESS
        }
    })
}

/// Runs a full sort for the parsed arguments.
pub async fn run(cli: Cli) -> Result<SortReport> {
    tracing::info!("trace_initialised");

    let config = cli.into_config();
    config.trace_loaded();

    match sort_files(&config).await {
        Ok(report) => {
            tracing::info!(?report, "Sort report");
            Ok(report)
        }
        Err(e) => {
            tracing::error!(error = %e, "Sort aborted");
            Err(anyhow::Error::new(e))
        }
    }
}

/// Exit status for a finished run: success when every file was copied, [`EXIT_FATAL`] when
/// the run could not start, [`EXIT_PARTIAL`] when some files failed.
pub fn exit_code(result: &Result<SortReport>) -> ExitCode {
    match result {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_PARTIAL),
        Err(_) => ExitCode::from(EXIT_FATAL),
    }
}
