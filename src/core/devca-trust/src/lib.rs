//! # devca Trust
//!
//! Installs a root certificate into the host trust store.
//!
//! Support is deliberately narrow: only the Red Hat family (RHEL, CentOS,
//! Fedora and derivatives) has an installer. Every other host gets the
//! no-op installer and the user adds the certificate by hand.
//!
//! Installers are looked up at runtime through [`InstallerRegistry`], so a
//! new family only needs a new [`TrustInstaller`] implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod host;
pub mod installer;
pub mod registry;

pub use error::TrustError;
pub use host::{HostInfo, OsFamily};
pub use installer::{RedHatInstaller, TrustInstaller, TrustOutcome, UnsupportedInstaller};
pub use registry::InstallerRegistry;
