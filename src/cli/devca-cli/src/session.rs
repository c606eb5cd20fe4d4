//! The interactive generation sequence.

use std::io::{BufRead, Write};

use anyhow::Result;
use devca_exec::CommandRunner;
use devca_pki::request::DEFAULT_LIFETIME_DAYS;
use devca_pki::{CertificateGenerator, CertificateRequest};
use devca_trust::{HostInfo, InstallerRegistry, TrustError, TrustOutcome};
use tracing::{info, warn};

use crate::prompt::Prompter;
use crate::report::Summary;

/// Host lookup used before automatic installation.
pub type HostDetector = fn() -> Result<HostInfo, TrustError>;

/// One run of the tool: prompts, root generation, installation, issuance.
pub struct Session<R, I, O> {
    generator: CertificateGenerator<R>,
    prompter: Prompter<I, O>,
    trust: Option<TrustSetup>,
}

/// Automatic trust installation settings.
pub struct TrustSetup {
    /// Installers to choose from.
    pub registry: InstallerRegistry,
    /// How the host family is determined.
    pub detect_host: HostDetector,
}

impl Default for TrustSetup {
    fn default() -> Self {
        Self {
            registry: InstallerRegistry::default(),
            detect_host: HostInfo::detect,
        }
    }
}

impl<R, I, O> Session<R, I, O>
where
    R: CommandRunner,
    I: BufRead,
    O: Write,
{
    /// Creates a session that never offers automatic installation.
    pub fn new(generator: CertificateGenerator<R>, prompter: Prompter<I, O>) -> Self {
        Self {
            generator,
            prompter,
            trust: None,
        }
    }

    /// Offers automatic installation whenever a new root is generated.
    pub fn with_trust(mut self, trust: TrustSetup) -> Self {
        self.trust = Some(trust);
        self
    }

    /// Runs the whole sequence and returns the summary to report.
    ///
    /// Any error is fatal for the run. Files already written stay on disk.
    pub async fn run(&mut self) -> Result<Summary> {
        self.generator.ensure_output_dir().await?;

        let domain = self.prompter.prompt_non_empty("Domain []")?;
        let lifetime = self
            .prompter
            .prompt_days("Lifetime (days) [1024]", DEFAULT_LIFETIME_DAYS)?;
        let wildcard = self.prompter.prompt_bool("Wildcard [true]", true)?;
        let request = CertificateRequest::new(domain, lifetime, wildcard)?;

        let regenerate = if self.generator.root_exists().await? {
            self.prompter
                .prompt_bool("Root certificate detected, regenerate? [false]", false)?
        } else {
            true
        };

        let mut installed = false;
        if regenerate {
            let install = match self.trust {
                Some(_) => self
                    .prompter
                    .prompt_bool("Try to install automatically? [true]", true)?,
                None => false,
            };

            self.generator.generate_root(lifetime).await?;

            if install {
                installed = self.install_root().await?;
            }
        } else {
            info!("reusing existing root authority");
        }

        let issued = self.generator.issue(&request).await?;

        Ok(Summary {
            common_name: issued.common_name,
            key_path: issued.key_path,
            cert_path: issued.cert_path,
            root_cert_path: self.generator.config().root_cert_path(),
            regenerated: regenerate,
            installed,
        })
    }

    /// Attempts installation. Only prompt I/O errors are returned; every
    /// installation problem becomes `Ok(false)`.
    async fn install_root(&mut self) -> Result<bool> {
        let Some(trust) = &self.trust else {
            return Ok(false);
        };

        let host = match (trust.detect_host)() {
            Ok(host) => host,
            Err(e) => {
                warn!(error = %e, "host detection failed");
                self.prompter.say("\nFailed to get host info")?;
                return Ok(false);
            },
        };

        let root_cert = self.generator.config().root_cert_path();
        let outcome = trust
            .registry
            .install(&host, self.generator.runner(), &root_cert)
            .await;

        match outcome {
            TrustOutcome::Installed => Ok(true),
            TrustOutcome::Unsupported { family } => {
                self.prompter
                    .say(format!("\nAutomatic install not supported on {family}"))?;
                self.prompter.wait_for_enter("Press enter to continue...")?;
                Ok(false)
            },
            TrustOutcome::Failed(reason) => {
                self.prompter
                    .say(format!("\nAutomatic install failed: {reason}"))?;
                Ok(false)
            },
        }
    }

    /// Consumes the session, returning the generator and the prompter.
    #[cfg(test)]
    pub fn into_parts(self) -> (CertificateGenerator<R>, Prompter<I, O>) {
        (self.generator, self.prompter)
    }
}
