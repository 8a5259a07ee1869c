//! The failure kinds a run can end with.
//!
//! Every one of these is fatal: the driver prints the chained message and exits
//! with a non-zero status. Code elsewhere propagates them through
//! [`anyhow::Result`] and adds context as it goes, so the typed kind is still
//! available to tests via `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input path is missing, isn't a directory, or a setting is unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The font file couldn't be found or parsed
    #[error("font not usable at {path}: {reason}")]
    MissingFont { path: PathBuf, reason: String },

    /// Reading, walking, or writing failed
    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing printable was found under the input directory
    #[error("no code files found under {0}")]
    EmptyResult(PathBuf),
}

impl Error {
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
