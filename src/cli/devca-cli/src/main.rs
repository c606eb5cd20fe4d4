//! devca CLI - Local development certificate authority.

mod prompt;
mod report;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use devca_exec::ProcessRunner;
use devca_pki::config::{DEFAULT_OPENSSL, DEFAULT_OUT_DIR};
use devca_pki::{CertificateGenerator, PkiConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::prompt::Prompter;
use crate::session::{Session, TrustSetup};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "devca")]
#[command(about = "Generate a local root CA and a domain certificate signed by it")]
#[command(version)]
struct Cli {
    /// Directory for keys and certificates
    #[arg(long, default_value = DEFAULT_OUT_DIR, env = "DEVCA_OUT_DIR")]
    out_dir: PathBuf,

    /// Toolkit executable used for every cryptographic operation
    #[arg(long, default_value = DEFAULT_OPENSSL, env = "DEVCA_OPENSSL")]
    openssl: PathBuf,

    /// Never offer to install the root into the system trust store
    #[arg(long, env = "DEVCA_NO_INSTALL")]
    no_install: bool,

    /// Also write the summary as JSON to this file
    #[arg(long)]
    summary_file: Option<PathBuf>,
}

// ============================================================================
// Main
// ============================================================================

fn init_tracing() {
    // Warnings only by default; RUST_LOG overrides
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = PkiConfig::new(cli.out_dir).with_openssl(cli.openssl);
    tracing::debug!(out_dir = %config.out_dir().display(), "starting");

    let generator = CertificateGenerator::new(config, ProcessRunner::new());
    let mut session = Session::new(generator, Prompter::stdio());
    if !cli.no_install {
        session = session.with_trust(TrustSetup::default());
    }

    let summary = session.run().await?;
    print!("{}", summary.render_text());

    if let Some(path) = cli.summary_file {
        summary
            .write_json(&path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}
