//! Process invocation error types.

use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The executable could not be started.
    #[error("failed to start {command}: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The command started but its output or exit status could not be
    /// collected.
    #[error("failed to wait for {command}: {source}")]
    Wait {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully.
    ///
    /// `output` holds everything the command wrote to stdout and stderr.
    #[error("command failed ({status}): {command}\n{output}")]
    Failed {
        /// Rendered command line.
        command: String,
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Captured combined output.
        output: String,
    },
}
