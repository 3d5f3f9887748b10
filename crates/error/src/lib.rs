use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors surfaced to the caller of a simulation run. Recoverable conditions
/// (unknown policy names, malformed trace tokens) are handled inside the run
/// and never reach this type; what remains is caller contract violations and
/// I/O failures around the trace source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    /// Invalid simulation parameters, e.g. a zero TLB or frame capacity.
    Config(String),
    /// The caller supplied neither an inline address trace nor a trace file.
    MissingAddressSource,
    /// Failure reading the trace source.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::MissingAddressSource => {
                write!(f, "no address source provided (neither inline addresses nor a trace file)")
            }
            Error::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Constructs an `Err(Error::Config)` from a format string.
#[macro_export]
macro_rules! errconfig {
    ($($args:tt)*) => {
        Err($crate::Error::Config(format!($($args)*)))
    };
}
