//! Error types for volume file-set operations

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for volume I/O and parameter handling
#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "Shape mismatch in {}: expected {expected} samples, found {found}",
        .path.display()
    )]
    ShapeMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid angle on line {line}: {value:?}")]
    InvalidAngle { line: usize, value: String },
}

impl VolumeError {
    /// Attach a path to an I/O error, splitting out missing files
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => VolumeError::FileNotFound(path),
            _ => VolumeError::Io { path, source },
        }
    }

    /// Attach a path to an I/O error raised while creating or writing a file
    pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
        VolumeError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Specialized Result type for volume operations
pub type Result<T> = std::result::Result<T, VolumeError>;

impl From<serde_yaml::Error> for VolumeError {
    fn from(err: serde_yaml::Error) -> Self {
        VolumeError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for VolumeError {
    fn from(err: serde_json::Error) -> Self {
        VolumeError::Serialization(err.to_string())
    }
}
