//! Line-oriented terminal prompts.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use anyhow::{bail, Context, Result};

/// Reads answers line by line and writes prompts and complaints.
///
/// Each prompt blocks until a full line is available. A closed input stream
/// is an error; callers treat it as fatal.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompter, returning the output stream.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes a line of text.
    pub fn say(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Returns the entered line, or `default` if it is empty.
    pub fn prompt_string(&mut self, label: &str, default: &str) -> Result<String> {
        let line = self
            .read_answer(label)
            .context("failed to read string from stdin")?;

        if line.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(line)
        }
    }

    /// Asks until the answer parses as a boolean.
    pub fn prompt_bool(&mut self, label: &str, default: bool) -> Result<bool> {
        let default = if default { "true" } else { "false" };
        loop {
            let answer = self.prompt_string(label, default)?;
            match parse_bool(&answer) {
                Some(value) => return Ok(value),
                None => self.say("expected true or false")?,
            }
        }
    }

    /// Asks until the answer is not empty.
    pub fn prompt_non_empty(&mut self, label: &str) -> Result<String> {
        loop {
            let answer = self.prompt_string(label, "")?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("expected string")?;
        }
    }

    /// Asks until the answer is a positive whole number of days.
    pub fn prompt_days(&mut self, label: &str, default: u32) -> Result<u32> {
        let default = default.to_string();
        loop {
            let answer = self.prompt_string(label, &default)?;
            match answer.trim().parse::<u32>() {
                Ok(days) if days > 0 => return Ok(days),
                _ => self.say("expected a positive number of days")?,
            }
        }
    }

    /// Blocks until the user presses enter.
    pub fn wait_for_enter(&mut self, label: &str) -> Result<()> {
        self.prompt_string(label, "")?;
        Ok(())
    }

    fn read_answer(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("unexpected end of input");
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Parses the boolean spellings the prompts accept.
///
/// `true`, `false`, `t`, `f`, `1` and `0`, in any letter case.
pub fn parse_bool(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}
