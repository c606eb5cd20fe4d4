//! Final run summary.

use std::path::{Path, PathBuf};

use serde::Serialize;

const RULE: &str = "======================================";

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Name in the certificate subject and SAN.
    pub common_name: String,
    /// Domain private key.
    pub key_path: PathBuf,
    /// Domain certificate.
    pub cert_path: PathBuf,
    /// Root certificate the domain certificate chains to.
    pub root_cert_path: PathBuf,
    /// Whether the root was generated in this run.
    pub regenerated: bool,
    /// Whether the root was installed into the system trust store in this run.
    pub installed: bool,
}

impl Summary {
    /// Whether the user still has to add the root to their trust store.
    pub fn needs_manual_trust(&self) -> bool {
        !(self.regenerated && self.installed)
    }

    /// Human-readable summary block.
    pub fn render_text(&self) -> String {
        let reminder = if self.needs_manual_trust() {
            format!(
                "\nAdd {} to your system trust centre",
                self.root_cert_path.display()
            )
        } else {
            String::new()
        };

        format!(
            "\n{RULE}\n\nCertificates generated!{reminder}\n\nKey:\t{}\nCert:\t{}\n\n{RULE}\n",
            self.key_path.display(),
            self.cert_path.display(),
        )
    }

    /// Writes the summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        #[derive(Serialize)]
        struct Document<'a> {
            #[serde(flatten)]
            summary: &'a Summary,
            manual_trust_required: bool,
        }

        let doc = Document {
            summary: self,
            manual_trust_required: self.needs_manual_trust(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }
}
