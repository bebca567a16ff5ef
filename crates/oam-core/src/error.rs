//! Error types for scaffolding operations

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while resolving, rendering or materializing templates
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Answers are invalid or incomplete (unknown variant, missing custom path, ...)
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The destination directory or file is already present
    #[error("target already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// Remote template retrieval failed
    #[error("failed to fetch template from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Copy, read or write failure
    #[error("filesystem error at {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write was attempted inside the tool's own installation directory
    #[error("refusing to write inside the tool's installation directory {}", .0.display())]
    GuardViolation(PathBuf),

    /// A YAML manifest or generator definition could not be parsed
    #[error("failed to parse {}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `package.json` is not a JSON object
    #[error("invalid package descriptor at {}", path.display())]
    PackageDescriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
