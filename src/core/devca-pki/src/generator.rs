//! Root authority and domain certificate generation.

use std::path::{Path, PathBuf};

use devca_exec::CommandRunner;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::{openssl, render_extension, CertificateRequest, PkiConfig, PkiError};

/// Result of issuing a domain certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    /// Name written to the subject CN and the SAN entry.
    pub common_name: String,
    /// Domain private key.
    pub key_path: PathBuf,
    /// Signed domain certificate.
    pub cert_path: PathBuf,
}

/// Drives the toolkit through root and domain certificate generation.
///
/// Steps run one after another; the first failure aborts the operation and
/// leaves whatever was already written in place.
pub struct CertificateGenerator<R> {
    config: PkiConfig,
    runner: R,
}

impl<R: CommandRunner> CertificateGenerator<R> {
    /// Creates a generator for `config` running commands through `runner`.
    pub fn new(config: PkiConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Generation settings.
    pub fn config(&self) -> &PkiConfig {
        &self.config
    }

    /// The runner used for toolkit commands.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Consumes the generator, returning its runner.
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Creates the output directory if it is missing.
    ///
    /// On unix the directory is created with mode `0700`.
    pub async fn ensure_output_dir(&self) -> Result<(), PkiError> {
        let path = self.config.out_dir();

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);

        builder
            .create(path)
            .await
            .map_err(|source| PkiError::OutputDir {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), "output directory ready");
        Ok(())
    }

    /// Returns true if a root private key is already on disk.
    pub async fn root_exists(&self) -> Result<bool, PkiError> {
        exists(&self.config.root_key_path()).await
    }

    /// Generates the root private key and the self-signed root certificate.
    ///
    /// Existing root files are overwritten.
    pub async fn generate_root(&self, lifetime_days: u32) -> Result<(), PkiError> {
        self.runner
            .run(&openssl::generate_key(
                &self.config,
                "Generating root private key",
                &self.config.root_key_path(),
            ))
            .await?;
        self.runner
            .run(&openssl::self_signed_root(&self.config, lifetime_days))
            .await?;

        info!(cert = %self.config.root_cert_path().display(), lifetime_days, "root authority generated");
        Ok(())
    }

    /// Issues a domain certificate signed by the root authority.
    ///
    /// The request is removed once the key and request steps have succeeded,
    /// whether or not the extension file could be written or signing
    /// succeeded. The extension file is removed after signing has run.
    pub async fn issue(&self, request: &CertificateRequest) -> Result<IssuedCertificate, PkiError> {
        for root_file in [self.config.root_key_path(), self.config.root_cert_path()] {
            if !exists(&root_file).await? {
                return Err(PkiError::RootMissing(root_file));
            }
        }

        let domain = request.domain();
        let common_name = request.common_name();
        let key_path = self.config.client_key_path(domain);

        self.runner
            .run(&openssl::generate_key(
                &self.config,
                "Generating client private key",
                &key_path,
            ))
            .await?;
        self.runner
            .run(&openssl::signing_request(
                &self.config,
                domain,
                &common_name,
            ))
            .await?;

        let extension_path = self.config.extension_path();
        let signed = match write_private(&extension_path, render_extension(&common_name).as_bytes()).await {
            Ok(()) => {
                let signed = self
                    .runner
                    .run(&openssl::sign_request(
                        &self.config,
                        domain,
                        request.lifetime_days(),
                    ))
                    .await;
                remove_transient(&extension_path).await;
                signed.map_err(PkiError::from)
            },
            Err(source) => Err(PkiError::ExtensionFile {
                path: extension_path,
                source,
            }),
        };

        remove_transient(&self.config.request_path(domain)).await;
        signed?;

        let cert_path = self.config.client_cert_path(domain);
        info!(common_name = %common_name, cert = %cert_path.display(), "certificate issued");

        Ok(IssuedCertificate {
            common_name,
            key_path,
            cert_path,
        })
    }
}

async fn exists(path: &Path) -> Result<bool, PkiError> {
    fs::try_exists(path).await.map_err(|source| PkiError::Stat {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.flush().await
}

async fn remove_transient(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "failed to remove transient file");
    }
}
