//! This file contains the error type shared by the reader, the parser and the summation loop.
use std::fmt;
use std::io;
use std::path::PathBuf;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The input could not be opened, or a read from it failed part way through.
    Io { path: PathBuf, err: io::Error },
    /// Line `line` (1-based) did not produce a number in the targeted field.
    Parse { line: usize, msg: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, err: io::Error) -> Error {
        Error::Io {
            path: path.into(),
            err,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => write!(f, "{}: {}", path.display(), err),
            Error::Parse { line, msg } => write!(f, "line {}: {}", line, msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { err, .. } => Some(err),
            Error::Parse { .. } => None,
        }
    }
}

macro_rules! err {
    ($line:expr, $head:expr) => {
        Err($crate::common::Error::Parse {
            line: $line,
            msg: format!($head),
        })
    };
    ($line:expr, $head:expr, $($t:expr),+) => {
        Err($crate::common::Error::Parse {
            line: $line,
            msg: format!($head, $($t),*),
        })
    };
}
