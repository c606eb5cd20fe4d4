//! Trust-store installers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use devca_exec::{CommandRunner, Invocation};
use tracing::{info, warn};

use crate::{OsFamily, TrustError};

/// Trust anchor written by the Red Hat installer.
pub const REDHAT_ANCHOR_PATH: &str =
    "/etc/pki/ca-trust/source/anchors/certificate-generator-root.crt";

/// Result of attempting to install a root certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustOutcome {
    /// The certificate is now in the system trust store.
    Installed,
    /// No installer exists for this family.
    Unsupported {
        /// Family that was detected.
        family: OsFamily,
    },
    /// Installation was attempted and failed.
    Failed(String),
}

impl TrustOutcome {
    /// Returns true if the certificate was installed.
    pub fn is_trusted(&self) -> bool {
        matches!(self, TrustOutcome::Installed)
    }
}

/// Installs a root certificate into one family's trust store.
#[async_trait]
pub trait TrustInstaller: Send + Sync {
    /// Returns the name of this installer for logging.
    fn name(&self) -> &'static str;

    /// Returns true if this installer handles `family`.
    fn supports(&self, family: &OsFamily) -> bool;

    /// Installs `root_cert`, running any commands through `runner`.
    ///
    /// Failures are reported in the outcome, never as a panic or error.
    async fn install(
        &self,
        runner: &dyn CommandRunner,
        family: &OsFamily,
        root_cert: &Path,
    ) -> TrustOutcome;
}

/// Copies the certificate into the ca-trust anchors directory with `sudo`
/// and refreshes the trust store with `update-ca-trust`.
#[derive(Debug, Clone)]
pub struct RedHatInstaller {
    anchor: PathBuf,
}

impl RedHatInstaller {
    /// Creates an installer writing to [`REDHAT_ANCHOR_PATH`].
    pub fn new() -> Self {
        Self {
            anchor: PathBuf::from(REDHAT_ANCHOR_PATH),
        }
    }

    /// Overrides the anchor path.
    pub fn with_anchor(anchor: impl Into<PathBuf>) -> Self {
        Self {
            anchor: anchor.into(),
        }
    }

    async fn try_install(
        &self,
        runner: &dyn CommandRunner,
        root_cert: &Path,
    ) -> Result<(), TrustError> {
        if !root_cert.exists() {
            return Err(TrustError::CertificateNotFound(
                root_cert.display().to_string(),
            ));
        }

        runner
            .run(
                &Invocation::new("Copying root certificate", "sudo")
                    .arg("cp")
                    .arg(root_cert)
                    .arg(&self.anchor),
            )
            .await?;
        runner
            .run(&Invocation::new("Installing root certificate", "sudo").arg("update-ca-trust"))
            .await?;

        Ok(())
    }
}

impl Default for RedHatInstaller {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrustInstaller for RedHatInstaller {
    fn name(&self) -> &'static str {
        "redhat"
    }

    fn supports(&self, family: &OsFamily) -> bool {
        *family == OsFamily::RedHat
    }

    async fn install(
        &self,
        runner: &dyn CommandRunner,
        _family: &OsFamily,
        root_cert: &Path,
    ) -> TrustOutcome {
        match self.try_install(runner, root_cert).await {
            Ok(()) => {
                info!(anchor = %self.anchor.display(), "root certificate installed");
                TrustOutcome::Installed
            },
            Err(e) => {
                warn!(error = %e, "automatic trust installation failed");
                TrustOutcome::Failed(e.to_string())
            },
        }
    }
}

/// Fallback for families without an installer. Runs nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedInstaller;

#[async_trait]
impl TrustInstaller for UnsupportedInstaller {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn supports(&self, _family: &OsFamily) -> bool {
        true
    }

    async fn install(
        &self,
        _runner: &dyn CommandRunner,
        family: &OsFamily,
        _root_cert: &Path,
    ) -> TrustOutcome {
        TrustOutcome::Unsupported {
            family: family.clone(),
        }
    }
}
