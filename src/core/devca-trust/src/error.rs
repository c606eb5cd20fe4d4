//! Trust-store error types.

use thiserror::Error;

/// Errors that can occur while installing a root certificate.
///
/// These never abort a run; callers turn them into a manual-install reminder.
#[derive(Debug, Error)]
pub enum TrustError {
    /// Host information could not be determined.
    #[error("failed to get host info: {0}")]
    HostInfo(String),

    /// Root certificate to install does not exist.
    #[error("root certificate not found: {0}")]
    CertificateNotFound(String),

    /// A trust-store command failed.
    #[error("trust store command failed: {0}")]
    Exec(#[from] devca_exec::ExecError),
}
