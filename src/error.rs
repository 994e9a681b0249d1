//! Crate error type

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// Reading a level or settings file failed
    Io { path: PathBuf, source: std::io::Error },
    /// A level line contained something other than a non-negative integer
    Parse { line: usize, token: String },
    /// A level row had a different number of tiles than the first row
    RaggedRow { line: usize, expected: usize, found: usize },
    /// Entity geometry that the simulation cannot work with
    InvalidGeometry { what: &'static str, value: f32 },
    /// Settings failed to deserialize or validate
    Settings(String),
    /// None of the configured levels has a destructible brick
    NoPlayableLevels,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse { line, token } => {
                write!(f, "line {line}: expected a tile code, found {token:?}")
            }
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} tiles, found {found}"),
            Self::InvalidGeometry { what, value } => write!(f, "invalid {what}: {value}"),
            Self::Settings(msg) => write!(f, "invalid settings: {msg}"),
            Self::NoPlayableLevels => write!(f, "no level contains a destructible brick"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Settings(err.to_string())
    }
}
