//! Where call records go.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::SinkError;

/// The destination of call records. Chosen when a function is wrapped and never changed after.
#[derive(Clone, Default)]
pub enum Sink {
    /// One line per record on the process' standard output.
    #[default]
    Stdout,
    /// Appends one line per record to the file, creating it and its parent directories as needed.
    File(PathBuf),
    /// One line per record on an arbitrary writer.
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl Sink {
    /// Maps the optional `destination` of a wrapped function to a sink.
    /// `None` and the empty path both mean standard output.
    pub fn from_destination<P: AsRef<Path>>(destination: Option<P>) -> Self {
        match destination {
            Some(path) if !path.as_ref().as_os_str().is_empty() => Sink::file(path),
            _ => Sink::Stdout,
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Sink::File(path.as_ref().to_path_buf())
    }

    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Sink::Writer(Arc::new(Mutex::new(writer)))
    }

    /// The file records are appended to, if this is a file sink.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            Sink::File(path) => Some(path),
            _ => None,
        }
    }

    /// Writes `message` followed by a newline.
    pub fn dispatch(&self, message: &str) -> Result<(), SinkError> {
        match self {
            Sink::Stdout => {
                log::trace!("calltrace record to stdout: {message}");
                // `print!` would be captured by the test harness, but it panics instead of
                // returning the error; the handle is not captured.
                writeln!(io::stdout().lock(), "{message}").map_err(SinkError::Stdout)
            }
            Sink::File(path) => {
                log::trace!("calltrace record to {}: {message}", path.display());
                append_line(path, message)
            }
            Sink::Writer(writer) => {
                log::trace!("calltrace record to writer: {message}");
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writeln!(writer, "{message}")
                    .and_then(|()| writer.flush())
                    .map_err(SinkError::Writer)
            }
        }
    }
}

fn append_line(path: &Path, message: &str) -> Result<(), SinkError> {
    // a bare file name has an empty parent: the current directory, which exists
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.is_dir() {
            log::debug!("creating log directory {}", dir.display());
        }
        fs::create_dir_all(dir).map_err(|source| SinkError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    // one write per record, so the line lands in a single append
    let line = format!("{message}\n");
    file.write_all(line.as_bytes())
        .map_err(|source| SinkError::Write {
            path: path.to_path_buf(),
            source,
        })
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("Stdout"),
            Sink::File(path) => f.debug_tuple("File").field(path).finish(),
            Sink::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}
