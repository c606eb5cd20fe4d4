//! # devca PKI
//!
//! Orchestration of a local development certificate authority.
//!
//! ## Features
//!
//! - Root key and self-signed root certificate generation
//! - Domain certificate issuance, optionally as a wildcard
//! - Transient CSR and extension-file handling
//!
//! All cryptographic work is delegated to the external toolkit through a
//! [`devca_exec::CommandRunner`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extension;
pub mod generator;
pub mod openssl;
pub mod request;

pub use config::PkiConfig;
pub use error::PkiError;
pub use extension::render_extension;
pub use generator::{CertificateGenerator, IssuedCertificate};
pub use request::CertificateRequest;
