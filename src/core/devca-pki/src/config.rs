//! Generation settings and artifact path conventions.

use std::path::{Path, PathBuf};

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUT_DIR: &str = "out";

/// Default toolkit executable, looked up on the search path.
pub const DEFAULT_OPENSSL: &str = "openssl";

/// Subject of the self-signed root certificate.
pub const DEFAULT_ROOT_SUBJECT: &str = "/CN=local";

/// Named curve used for every private key.
pub const DEFAULT_CURVE: &str = "prime256v1";

/// Name of the transient extension file.
pub const EXTENSION_FILE: &str = "v3.ext";

/// Settings shared by every generation step.
///
/// All artifacts live directly in `out_dir`:
///
/// | File | Lifetime |
/// |------|----------|
/// | `root.key`, `root.crt` | kept across runs |
/// | `<domain>.key`, `<domain>.crt` | overwritten by each run |
/// | `<domain>.csr`, `v3.ext` | removed after signing |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkiConfig {
    /// Directory holding every artifact.
    pub out_dir: PathBuf,
    /// Toolkit executable.
    pub openssl: PathBuf,
    /// Root certificate subject, in the toolkit's `/K=V` form.
    pub root_subject: String,
    /// Curve name passed to EC key generation.
    pub curve: String,
}

impl Default for PkiConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            openssl: PathBuf::from(DEFAULT_OPENSSL),
            root_subject: DEFAULT_ROOT_SUBJECT.to_string(),
            curve: DEFAULT_CURVE.to_string(),
        }
    }
}

impl PkiConfig {
    /// Creates a config writing into `out_dir` with default toolkit settings.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }

    /// Overrides the toolkit executable.
    pub fn with_openssl(mut self, openssl: impl Into<PathBuf>) -> Self {
        self.openssl = openssl.into();
        self
    }

    /// Output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `root.key`
    pub fn root_key_path(&self) -> PathBuf {
        self.out_dir.join("root.key")
    }

    /// `root.crt`
    pub fn root_cert_path(&self) -> PathBuf {
        self.out_dir.join("root.crt")
    }

    /// `<domain>.key`
    pub fn client_key_path(&self, domain: &str) -> PathBuf {
        self.out_dir.join(format!("{domain}.key"))
    }

    /// `<domain>.csr`
    pub fn request_path(&self, domain: &str) -> PathBuf {
        self.out_dir.join(format!("{domain}.csr"))
    }

    /// `<domain>.crt`
    pub fn client_cert_path(&self, domain: &str) -> PathBuf {
        self.out_dir.join(format!("{domain}.crt"))
    }

    /// `v3.ext`
    pub fn extension_path(&self) -> PathBuf {
        self.out_dir.join(EXTENSION_FILE)
    }
}
