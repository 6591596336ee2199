//! ext-sorter: copies every file of a directory tree into an output directory, grouped
//! into subfolders named after each file's lowercased extension.

pub mod classify;
pub mod cli;
pub mod config;
pub mod copy;
pub mod error;
pub mod sort;
pub mod validate;
pub mod walk;

pub use cli::{run, Cli};
pub use config::SortConfig;
pub use error::{CopyError, SortError};
pub use sort::{sort_files, SortReport};
