//! Toolkit invocations.
//!
//! The argument grammar here is an external contract: each builder produces
//! exactly the arguments the toolkit expects for one step.

use std::path::Path;

use devca_exec::Invocation;

use crate::PkiConfig;

/// Digest used for every signature.
pub const DIGEST: &str = "-sha256";

/// `ecparam -name <curve> -genkey -out <key>`
pub fn generate_key(config: &PkiConfig, description: &str, key: &Path) -> Invocation {
    Invocation::new(description, &config.openssl)
        .args(["ecparam", "-name", config.curve.as_str(), "-genkey", "-out"])
        .arg(key)
}

/// Self-signed root certificate from the root key.
pub fn self_signed_root(config: &PkiConfig, lifetime_days: u32) -> Invocation {
    Invocation::new("Generating root certificate", &config.openssl)
        .args(["req", "-x509", "-new", "-nodes", "-key"])
        .arg(config.root_key_path())
        .args([DIGEST, "-days"])
        .arg(lifetime_days.to_string())
        .args(["-subj", config.root_subject.as_str(), "-out"])
        .arg(config.root_cert_path())
}

/// Certificate signing request with subject `/CN=<common_name>`.
pub fn signing_request(config: &PkiConfig, domain: &str, common_name: &str) -> Invocation {
    Invocation::new("Generating client certificate request", &config.openssl)
        .args(["req", "-new", DIGEST, "-nodes", "-key"])
        .arg(config.client_key_path(domain))
        .arg("-subj")
        .arg(format!("/CN={common_name}"))
        .arg("-out")
        .arg(config.request_path(domain))
}

/// Signs the domain request with the root, creating a serial file if needed.
pub fn sign_request(config: &PkiConfig, domain: &str, lifetime_days: u32) -> Invocation {
    Invocation::new("Generating client certificate", &config.openssl)
        .args(["x509", "-req", "-in"])
        .arg(config.request_path(domain))
        .arg("-CA")
        .arg(config.root_cert_path())
        .arg("-CAkey")
        .arg(config.root_key_path())
        .arg("-CAcreateserial")
        .arg("-out")
        .arg(config.client_cert_path(domain))
        .arg("-days")
        .arg(lifetime_days.to_string())
        .arg(DIGEST)
        .arg("-extfile")
        .arg(config.extension_path())
}
