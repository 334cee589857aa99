use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A stored setting could not be parsed into the requested type.
    #[error("Setting '{name}' holds {value:?}, which is not a valid {expected}")]
    Format {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("Settings file {0} is not a flat string map")]
    InvalidSettingsFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn format(name: &str, value: &str, expected: &'static str) -> Self {
        Error::Format {
            name: name.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    /// Check if this error is a malformed stored value
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
