//! # devca Exec
//!
//! Process invocation layer for devca.
//!
//! Every cryptographic operation is delegated to an external toolkit. This
//! crate describes those calls as structured argument lists and runs them
//! one at a time:
//! - [`Invocation`] - a described command with a list of arguments
//! - [`CommandRunner`] - the seam the orchestration layer runs commands through
//! - [`ProcessRunner`] - the real runner backed by child processes

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod invocation;
#[cfg(feature = "test-util")]
pub mod recording;
pub mod runner;

pub use error::ExecError;
pub use invocation::Invocation;
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};

#[cfg(feature = "test-util")]
pub use recording::RecordingRunner;
