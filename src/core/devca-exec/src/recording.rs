//! In-memory runner for tests.
//!
//! [`RecordingRunner`] never starts a process. It records each invocation and
//! imitates the toolkit by creating whatever file the command names after
//! `-out`, so code that checks for artifacts on disk behaves as it would
//! against the real toolkit.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{CommandOutput, CommandRunner, ExecError, Invocation};

/// A runner that records invocations instead of executing them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    extension_files: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    /// Creates a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner that fails every command described exactly as
    /// `description`.
    pub fn failing_on(description: impl Into<String>) -> Self {
        Self {
            fail_on: Some(description.into()),
            ..Self::default()
        }
    }

    /// All invocations seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Descriptions of all invocations seen so far.
    pub fn descriptions(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.description().to_string())
            .collect()
    }

    /// Contents of every `-extfile` as it was when the command ran.
    pub fn extension_files(&self) -> Vec<String> {
        self.extension_files
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        if let Some(ext) = invocation.value_of("-extfile") {
            let contents = fs::read_to_string(Path::new(ext)).unwrap_or_default();
            if let Ok(mut files) = self.extension_files.lock() {
                files.push(contents);
            }
        }

        if let Some(fail_on) = &self.fail_on {
            if invocation.description() == fail_on {
                return Err(ExecError::Spawn {
                    command: invocation.to_string(),
                    source: std::io::Error::other("simulated failure"),
                });
            }
        }

        if let Some(out) = invocation.value_of("-out") {
            fs::write(Path::new(out), format!("{}\n", invocation.description())).map_err(
                |source| ExecError::Spawn {
                    command: invocation.to_string(),
                    source,
                },
            )?;
        }

        Ok(CommandOutput::default())
    }
}
