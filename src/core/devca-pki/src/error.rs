//! PKI orchestration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating certificates.
///
/// Every variant is fatal for a generation run.
#[derive(Debug, Error)]
pub enum PkiError {
    /// Output directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Existence check failed for a reason other than "not found".
    #[error("failed file stat {}: {source}", .path.display())]
    Stat {
        /// File that was being checked.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Extension file could not be written.
    #[error("failed to create extension file {}: {source}", .path.display())]
    ExtensionFile {
        /// Extension file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Root key or certificate is not on disk.
    #[error("root authority missing: {} not found", .0.display())]
    RootMissing(PathBuf),

    /// Invalid certificate request.
    #[error("invalid certificate request: {0}")]
    InvalidRequest(String),

    /// External toolkit failure.
    #[error(transparent)]
    Exec(#[from] devca_exec::ExecError),
}
