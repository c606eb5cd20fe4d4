//! Domain certificate requests.

use crate::PkiError;

/// Default certificate lifetime in days.
pub const DEFAULT_LIFETIME_DAYS: u32 = 1024;

/// Parameters for one domain certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    domain: String,
    lifetime_days: u32,
    wildcard: bool,
}

impl CertificateRequest {
    /// Creates a request for `domain`.
    ///
    /// The domain is used verbatim in file names, the subject and the SAN
    /// entry. Only the empty string is rejected.
    pub fn new(
        domain: impl Into<String>,
        lifetime_days: u32,
        wildcard: bool,
    ) -> Result<Self, PkiError> {
        let domain = domain.into();
        if domain.is_empty() {
            return Err(PkiError::InvalidRequest("domain must not be empty".into()));
        }
        if lifetime_days == 0 {
            return Err(PkiError::InvalidRequest(
                "lifetime must be at least one day".into(),
            ));
        }

        Ok(Self {
            domain,
            lifetime_days,
            wildcard,
        })
    }

    /// The domain as entered.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Lifetime in days.
    pub fn lifetime_days(&self) -> u32 {
        self.lifetime_days
    }

    /// Name used for both the subject CN and the SAN DNS entry.
    pub fn common_name(&self) -> String {
        if self.wildcard {
            format!("*.{}", self.domain)
        } else {
            self.domain.clone()
        }
    }
}
