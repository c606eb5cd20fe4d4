//! Host operating system detection.

use std::fmt;

use sysinfo::System;
use tracing::debug;

use crate::TrustError;

/// Operating system family, grouping distributions that share a trust store
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// RHEL, CentOS, Fedora, Rocky, Alma, Oracle, Amazon Linux.
    RedHat,
    /// Debian, Ubuntu and derivatives.
    Debian,
    /// openSUSE and SLES.
    Suse,
    /// Arch Linux and derivatives.
    Arch,
    /// macOS.
    Darwin,
    /// Windows.
    Windows,
    /// Anything else, carrying the raw identifier.
    Other(String),
}

impl OsFamily {
    /// Maps a distribution identifier (`ID` in os-release) to its family.
    pub fn from_distribution_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "rhel" | "redhat" | "centos" | "fedora" | "rocky" | "almalinux" | "ol" | "amzn"
            | "scientific" | "cloudlinux" => OsFamily::RedHat,
            "debian" | "ubuntu" | "linuxmint" | "pop" | "raspbian" | "kali" | "elementary" => {
                OsFamily::Debian
            },
            "opensuse" | "opensuse-leap" | "opensuse-tumbleweed" | "sles" | "suse" => {
                OsFamily::Suse
            },
            "arch" | "manjaro" | "endeavouros" => OsFamily::Arch,
            "macos" | "darwin" => OsFamily::Darwin,
            "windows" => OsFamily::Windows,
            other => OsFamily::Other(other.to_string()),
        }
    }

    /// Short lowercase family name.
    pub fn name(&self) -> &str {
        match self {
            OsFamily::RedHat => "redhat",
            OsFamily::Debian => "debian",
            OsFamily::Suse => "suse",
            OsFamily::Arch => "arch",
            OsFamily::Darwin => "darwin",
            OsFamily::Windows => "windows",
            OsFamily::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Information about the running host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Raw distribution identifier as reported by the OS.
    pub distribution_id: String,
    /// Family derived from the identifier.
    pub family: OsFamily,
}

impl HostInfo {
    /// Builds host info from a distribution identifier.
    pub fn from_distribution_id(id: impl Into<String>) -> Result<Self, TrustError> {
        let distribution_id = id.into();
        if distribution_id.trim().is_empty() {
            return Err(TrustError::HostInfo(
                "empty distribution identifier".into(),
            ));
        }

        let family = OsFamily::from_distribution_id(&distribution_id);
        Ok(Self {
            distribution_id,
            family,
        })
    }

    /// Queries the running host.
    pub fn detect() -> Result<Self, TrustError> {
        let id = System::distribution_id();
        debug!(distribution_id = %id, "detected host distribution");
        Self::from_distribution_id(id)
    }
}
