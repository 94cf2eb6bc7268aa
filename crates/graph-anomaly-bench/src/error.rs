//! Error types for dataset loading and benchmark configuration.

use std::path::PathBuf;

use graph_anomaly_core::AnomalyError;
use thiserror::Error;

/// Result type alias for dataset and configuration operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised by the registry, loaders and configuration layer.
#[derive(Error, Debug)]
pub enum DataError {
    // ========== Registry Errors ==========
    /// A name was registered twice in the same registry.
    #[error("{name} already registered in registry {registry}")]
    DuplicateKey { registry: String, name: String },

    /// Lookup of a name that was never registered.
    #[error("{name} not found in registry {registry}")]
    UnknownKey { registry: String, name: String },

    // ========== I/O Errors ==========
    /// Filesystem error on a specific path.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse or write error on a specific path.
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ========== Configuration Errors ==========
    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Loaded data violates a graph invariant.
    #[error("Invalid graph data: {0}")]
    InvalidGraph(String),

    // ========== Injection Errors ==========
    #[error(transparent)]
    Anomaly(#[from] AnomalyError),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DataError::Json {
            path: path.into(),
            source,
        }
    }
}
