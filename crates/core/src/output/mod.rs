//! On-disk output: directory layout, per-group pair files and the run manifest.
//!
//! - `OutputLayout`: computed paths for the output root and its subfolders.
//! - `writer`: recreates the output root and writes pair files and `run.json`.
//! - `reader`: reads written name files back for verification.
//! - `RunManifest`: serializable record of what a run produced.

pub mod layout;
pub mod manifest;
pub mod reader;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

pub use layout::*;
pub use manifest::*;
pub use reader::*;
pub use writer::*;

/// Error type for output filesystem operations.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize run manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// The output root would not be a dedicated folder inside the output directory.
    #[error("Refusing to recreate {root}: not a folder directly inside the output directory")]
    UnsafeRoot { root: PathBuf },

    /// A line in a pair file is not of the form `<giver> -> <receiver>`.
    #[error("Malformed line {line} in {path}: '{content}'")]
    MalformedLine { path: PathBuf, line: usize, content: String },
}

/// Convenience result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

pub(crate) fn io_error(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> OutputError {
    let path = path.into();
    move |source| OutputError::Io { path, source }
}
