//! Command runner trait and the process-backed implementation.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{ChildStderr, ChildStdout, Command};
use tracing::debug;

use crate::{ExecError, Invocation};

/// Output captured from a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Combined stdout and stderr.
    pub output: String,
}

/// Trait for running external commands.
///
/// Implementations run exactly one command per call and return only after it
/// has finished. Callers never run two commands at once.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the invocation to completion.
    ///
    /// # Returns
    ///
    /// * `Ok(CommandOutput)` - If the command exited with status 0
    /// * `Err(ExecError)` - If it could not be started or exited non-zero
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
        (**self).run(invocation).await
    }
}

/// Runs invocations as child processes.
///
/// Before each command the description and the full command line are printed
/// to stdout so the user can see exactly what is executed on their behalf.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    announce: bool,
}

impl ProcessRunner {
    /// Creates a runner that announces every command on stdout.
    pub fn new() -> Self {
        Self { announce: true }
    }

    /// Creates a runner that does not print anything.
    pub fn quiet() -> Self {
        Self { announce: false }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
        let command_line = invocation.to_string();

        if self.announce {
            println!();
            println!("# {}", invocation.description());
            println!("-> {}", command_line);
        }
        debug!(command = %command_line, "running external command");

        let mut child = Command::new(invocation.program())
            .args(invocation.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        let combined = read_merged(child.stdout.take(), child.stderr.take()).await;
        let status = child.wait().await.map_err(|source| ExecError::Wait {
            command: command_line.clone(),
            source,
        })?;
        let combined = String::from_utf8_lossy(&combined).into_owned();

        if !status.success() {
            debug!(command = %command_line, %status, "external command failed");
            return Err(ExecError::Failed {
                command: command_line,
                status,
                output: combined,
            });
        }

        Ok(CommandOutput { output: combined })
    }
}

/// Reads both pipes until they close, appending chunks in arrival order.
///
/// A read error ends that stream; whatever was collected so far is kept.
async fn read_merged(mut stdout: Option<ChildStdout>, mut stderr: Option<ChildStderr>) -> Vec<u8> {
    let mut combined = Vec::new();
    let mut out_buf = [0u8; 4096];
    let mut err_buf = [0u8; 4096];

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_chunk(&mut stdout, &mut out_buf), if stdout.is_some() => match read {
                Ok(n) if n > 0 => combined.extend_from_slice(&out_buf[..n]),
                _ => stdout = None,
            },
            read = read_chunk(&mut stderr, &mut err_buf), if stderr.is_some() => match read {
                Ok(n) if n > 0 => combined.extend_from_slice(&err_buf[..n]),
                _ => stderr = None,
            },
        }
    }

    combined
}

async fn read_chunk<S: AsyncRead + Unpin>(stream: &mut Option<S>, buf: &mut [u8]) -> std::io::Result<usize> {
    match stream {
        Some(stream) => stream.read(buf).await,
        None => Ok(0),
    }
}
