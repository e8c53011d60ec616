//! Error types for fmtspec

use std::fmt;

/// Result type alias for fmtspec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for configuration and spec parsing
///
/// Cache lookups never produce these; only building a cache or
/// parsing a spec string can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache configuration rejected
    InvalidConfig(String),

    /// Spec string could not be parsed
    Parse(String),

    /// Family name not recognized
    UnknownFamily(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid cache config: {}", msg),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::UnknownFamily(name) => {
                write!(f, "Unknown format family: '{}' (expected fixed or percent)", name)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Error::Parse(format!("{:?}", err))
    }
}
