//! Errors raised while writing a call record.

use std::io;
use std::path::PathBuf;

/// A record could not be delivered to its sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to open log file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to append to log file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),

    #[error("failed to write to the log writer: {0}")]
    Writer(#[source] io::Error),
}
