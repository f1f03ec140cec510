//! Error types for the promotion registry.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse promotion at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The registry was constructed with an empty directory path.
    #[error("promotion directory path must not be empty")]
    EmptyDirectory,

    /// An empty string was given where a promotion name is required.
    #[error("promotion name must not be empty")]
    EmptyName,

    /// Create or rename targeted a name that is already registered.
    #[error("promotion {name} already exists")]
    NameExists { name: String },

    /// Rename was asked to move a name that is not registered.
    #[error("promotion {name} not found")]
    PromotionNotFound { name: String },
}
