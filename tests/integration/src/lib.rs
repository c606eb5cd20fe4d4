//! Integration tests for devca.
//!
//! These tests drive the real process runner, and the `devca` binary itself,
//! against a stand-in toolkit script, so every command goes through an actual
//! child process.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{bail, Context, Result};
use tempfile::TempDir;

// ============================================================================
// Stand-in Toolkit
// ============================================================================

/// Shell script accepting the toolkit's argument grammar.
///
/// It appends each argument list to `calls.log`, copies any `-extfile` to
/// `last.ext`, and writes a placeholder to the `-out` path. If `fail-on`
/// holds the current subcommand name, it prints a diagnostic to stderr and
/// exits 1.
const TOOLKIT_SCRIPT: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
echo "$*" >> "$dir/calls.log"
if [ -f "$dir/fail-on" ] && [ "$1" = "$(cat "$dir/fail-on")" ]; then
    echo "simulated $1 failure" >&2
    exit 1
fi
out=""
ext=""
while [ $# -gt 0 ]; do
    case "$1" in
        -out) out="$2"; shift ;;
        -extfile) ext="$2"; shift ;;
    esac
    shift
done
if [ -n "$ext" ]; then
    cp "$ext" "$dir/last.ext"
fi
if [ -n "$out" ]; then
    echo "generated" > "$out"
fi
"#;

/// A temporary toolkit installation plus an output directory.
pub struct FakeToolkit {
    dir: TempDir,
}

impl FakeToolkit {
    /// Writes the script into a fresh temporary directory.
    pub fn install() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp dir")?;
        let script = dir.path().join("openssl");
        fs::write(&script, TOOLKIT_SCRIPT).context("Failed to write toolkit script")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
        }

        Ok(Self { dir })
    }

    /// Path to the executable script.
    pub fn executable(&self) -> PathBuf {
        self.dir.path().join("openssl")
    }

    /// Output directory for generated artifacts.
    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Working directory of the fake installation.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Makes every call of `subcommand` fail.
    pub fn fail_on(&self, subcommand: &str) -> Result<()> {
        fs::write(self.dir.path().join("fail-on"), subcommand)?;
        Ok(())
    }

    /// Argument lists seen so far, one entry per call.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Extension file passed to the most recent signing call.
    pub fn last_extension(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join("last.ext")).ok()
    }
}

// ============================================================================
// devca Binary
// ============================================================================

impl FakeToolkit {
    /// Runs `devca` against this toolkit with `--no-install`, feeding `input`
    /// to its prompts on stdin.
    pub fn run_devca(&self, input: &str) -> Result<Output> {
        let binary = find_devca_binary()?;

        let mut child = Command::new(&binary)
            .arg("--out-dir")
            .arg(self.out_dir())
            .arg("--openssl")
            .arg(self.executable())
            .arg("--no-install")
            .env_remove("DEVCA_OUT_DIR")
            .env_remove("DEVCA_OPENSSL")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start devca: {:?}", binary))?;

        // Dropping stdin closes it, so unanswered prompts hit end of input
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }

        child.wait_with_output().context("Failed to wait for devca")
    }
}

/// Find the devca binary in the target directory, building it if missing.
fn find_devca_binary() -> Result<PathBuf> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let target_dir = std::env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(&manifest_dir).join("../../target"));

    // Try debug build first, then release
    let candidates = [
        target_dir.join("debug/devca"),
        target_dir.join("debug/devca.exe"),
        target_dir.join("release/devca"),
        target_dir.join("release/devca.exe"),
    ];

    let found = |candidates: &[PathBuf]| candidates.iter().find(|c| c.exists()).cloned();
    if let Some(candidate) = found(&candidates[..]) {
        return Ok(candidate.canonicalize()?);
    }

    // Workspace tests do not build other packages' binaries
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let status = Command::new(cargo)
        .args(["build", "-p", "devca-cli", "--bin", "devca"])
        .current_dir(&manifest_dir)
        .status()
        .context("Failed to run cargo build")?;

    match found(&candidates[..]) {
        Some(candidate) if status.success() => Ok(candidate.canonicalize()?),
        _ => bail!(
            "Could not find devca binary. Run 'cargo build -p devca-cli' first. Searched in: {:?}",
            candidates
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use devca_exec::{ExecError, ProcessRunner};
    use devca_pki::{render_extension, CertificateGenerator, CertificateRequest, PkiConfig, PkiError};

    fn generator(toolkit: &FakeToolkit) -> CertificateGenerator<ProcessRunner> {
        let config = PkiConfig::new(toolkit.out_dir()).with_openssl(toolkit.executable());
        CertificateGenerator::new(config, ProcessRunner::quiet())
    }

    #[tokio::test]
    async fn test_first_run_generates_root_and_wildcard_certificate() {
        let toolkit = FakeToolkit::install().unwrap();
        let generator = generator(&toolkit);
        let out = toolkit.out_dir();

        generator.ensure_output_dir().await.unwrap();
        assert!(!generator.root_exists().await.unwrap());
        generator.generate_root(1024).await.unwrap();

        let request = CertificateRequest::new("example.com", 1024, true).unwrap();
        let issued = generator.issue(&request).await.unwrap();

        let o = out.display();
        assert_eq!(
            toolkit.calls(),
            vec![
                format!("ecparam -name prime256v1 -genkey -out {o}/root.key"),
                format!(
                    "req -x509 -new -nodes -key {o}/root.key -sha256 -days 1024 -subj /CN=local -out {o}/root.crt"
                ),
                format!("ecparam -name prime256v1 -genkey -out {o}/example.com.key"),
                format!(
                    "req -new -sha256 -nodes -key {o}/example.com.key -subj /CN=*.example.com -out {o}/example.com.csr"
                ),
                format!(
                    "x509 -req -in {o}/example.com.csr -CA {o}/root.crt -CAkey {o}/root.key -CAcreateserial -out {o}/example.com.crt -days 1024 -sha256 -extfile {o}/v3.ext"
                ),
            ]
        );

        assert_eq!(
            toolkit.last_extension().unwrap(),
            render_extension("*.example.com")
        );
        assert!(issued.key_path.exists());
        assert!(issued.cert_path.exists());
        assert!(out.join("root.key").exists());
        assert!(out.join("root.crt").exists());
        assert!(!out.join("v3.ext").exists());
        assert!(!out.join("example.com.csr").exists());
    }

    #[tokio::test]
    async fn test_second_run_reuses_root() {
        let toolkit = FakeToolkit::install().unwrap();
        let first = generator(&toolkit);
        first.ensure_output_dir().await.unwrap();
        first.generate_root(30).await.unwrap();

        let second = generator(&toolkit);
        assert!(second.root_exists().await.unwrap());
        let request = CertificateRequest::new("dev.test", 30, false).unwrap();
        second.issue(&request).await.unwrap();

        let calls = toolkit.calls();
        assert_eq!(calls.len(), 5);
        assert!(calls[2..].iter().all(|c| !c.contains("/CN=local")));
        assert!(calls[3].contains("-subj /CN=dev.test "));
        assert_eq!(toolkit.last_extension().unwrap(), render_extension("dev.test"));
    }

    #[tokio::test]
    async fn test_toolkit_failure_carries_output() {
        let toolkit = FakeToolkit::install().unwrap();
        let generator = generator(&toolkit);
        generator.ensure_output_dir().await.unwrap();
        generator.generate_root(30).await.unwrap();
        toolkit.fail_on("x509").unwrap();

        let request = CertificateRequest::new("example.com", 30, true).unwrap();
        let err = generator.issue(&request).await.unwrap_err();

        match err {
            PkiError::Exec(ExecError::Failed { status, output, .. }) => {
                assert_eq!(status.code(), Some(1));
                assert!(output.contains("simulated x509 failure"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!toolkit.out_dir().join("example.com.crt").exists());
        assert!(!toolkit.out_dir().join("v3.ext").exists());
    }

    #[tokio::test]
    async fn test_root_failure_stops_before_certificate() {
        let toolkit = FakeToolkit::install().unwrap();
        let generator = generator(&toolkit);
        generator.ensure_output_dir().await.unwrap();
        toolkit.fail_on("ecparam").unwrap();

        let result = generator.generate_root(30).await;

        assert!(matches!(result, Err(PkiError::Exec(_))));
        assert_eq!(toolkit.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_shell_metacharacters_are_not_interpreted() {
        let toolkit = FakeToolkit::install().unwrap();
        let generator = generator(&toolkit);
        generator.ensure_output_dir().await.unwrap();
        generator.generate_root(30).await.unwrap();

        let domain = "dev$(touch injected);x";
        let request = CertificateRequest::new(domain, 30, false).unwrap();
        generator.issue(&request).await.unwrap();

        assert!(!toolkit.root().join("injected").exists());
        assert!(!Path::new("injected").exists());
        assert!(toolkit.out_dir().join(format!("{domain}.crt")).exists());
    }

    #[test]
    fn test_devca_defaults_exit_zero_and_print_summary() {
        let toolkit = FakeToolkit::install().unwrap();

        let output = toolkit.run_devca("example.com\n\n\n").unwrap();

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let out = toolkit.out_dir();
        assert!(stdout.contains("Certificates generated!"));
        assert!(stdout.contains(&format!("Key:\t{}", out.join("example.com.key").display())));
        assert!(stdout.contains(&format!("Cert:\t{}", out.join("example.com.crt").display())));
        assert!(stdout.contains(&format!(
            "Add {} to your system trust centre",
            out.join("root.crt").display()
        )));
        // Announced commands precede the summary
        assert!(stdout.contains("# Generating root private key"));
        assert_eq!(toolkit.calls().len(), 5);
        assert!(toolkit.calls()[3].contains("-subj /CN=*.example.com "));
    }

    #[test]
    fn test_devca_closed_input_exits_one() {
        let toolkit = FakeToolkit::install().unwrap();

        let output = toolkit.run_devca("").unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Error: failed to read string from stdin"), "{stderr}");
        assert!(toolkit.calls().is_empty());
    }

    #[test]
    fn test_devca_toolkit_failure_exits_one() {
        let toolkit = FakeToolkit::install().unwrap();
        toolkit.fail_on("x509").unwrap();

        let output = toolkit.run_devca("example.com\n\n\n").unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("simulated x509 failure"), "{stderr}");
        assert_eq!(stderr.matches("x509 -req").count(), 1, "{stderr}");
        assert!(!toolkit.out_dir().join("example.com.crt").exists());
        assert!(!String::from_utf8_lossy(&output.stdout).contains("Certificates generated!"));
    }
}
