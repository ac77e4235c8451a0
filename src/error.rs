//! Error types for `todo_list`.

use std::path::PathBuf;

/// Errors surfaced by the task store and the filtered view.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The task file exists but its contents do not parse as a task list.
    #[error("task file {path} is corrupt: {source}")]
    CorruptState {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the task file failed.
    #[error("could not persist tasks to {path}: {source}")]
    Persistence {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A view position with no corresponding task.
    #[error("no task at position {index} (list has {len} entries)")]
    SelectionOutOfRange {
        /// The requested view position.
        index: usize,
        /// The number of entries currently in the view.
        len: usize,
    },

    /// A task was submitted without a title.
    #[error("task title is required")]
    TitleRequired,
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
