//! Runtime installer lookup.

use std::path::Path;

use devca_exec::CommandRunner;
use tracing::debug;

use crate::{
    HostInfo, OsFamily, RedHatInstaller, TrustInstaller, TrustOutcome, UnsupportedInstaller,
};

/// Ordered set of installers, queried by OS family.
pub struct InstallerRegistry {
    installers: Vec<Box<dyn TrustInstaller>>,
    fallback: UnsupportedInstaller,
}

impl InstallerRegistry {
    /// Creates a registry with no installers; every family falls back to
    /// [`UnsupportedInstaller`].
    pub fn empty() -> Self {
        Self {
            installers: Vec::new(),
            fallback: UnsupportedInstaller,
        }
    }

    /// Adds an installer. Earlier registrations win.
    pub fn register(mut self, installer: impl TrustInstaller + 'static) -> Self {
        self.installers.push(Box::new(installer));
        self
    }

    /// Returns the installer for `family`.
    pub fn select(&self, family: &OsFamily) -> &dyn TrustInstaller {
        match self.installers.iter().find(|i| i.supports(family)) {
            Some(installer) => installer.as_ref(),
            None => &self.fallback,
        }
    }

    /// Installs `root_cert` with the installer selected for `host`.
    pub async fn install(
        &self,
        host: &HostInfo,
        runner: &dyn CommandRunner,
        root_cert: &Path,
    ) -> TrustOutcome {
        let installer = self.select(&host.family);
        debug!(
            distribution_id = %host.distribution_id,
            family = %host.family,
            installer = installer.name(),
            "selected trust installer"
        );
        installer.install(runner, &host.family, root_cert).await
    }
}

impl Default for InstallerRegistry {
    fn default() -> Self {
        Self::empty().register(RedHatInstaller::new())
    }
}
