//! Structured command descriptions.

use std::ffi::{OsStr, OsString};
use std::fmt;

/// A single external command with a human-readable description.
///
/// Arguments are kept as a list and handed to the OS one by one. They are
/// never joined into a shell string, so values such as domain names cannot
/// inject extra commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    description: String,
    program: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    /// Creates an invocation of `program` with no arguments.
    pub fn new(description: impl Into<String>, program: impl AsRef<OsStr>) -> Self {
        Self {
            description: description.into(),
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    /// Appends a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// What this command is for, e.g. "Generating root private key".
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The executable to run.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// The argument list, in order.
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Returns the value following `flag`, if the flag is present.
    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }
}

/// Renders the full command line, program first, space separated.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
