use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// What the writer of a destination is allowed to do with an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Nothing was there when checked; fail if something appears.
    Fresh,
    Replace,
}

pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Yes/no prompt with a default of no.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        loop {
            write!(self.output, "{question} [y/N]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Error: invalid input")?,
            }
        }
    }
}

pub fn guard(path: &Path, force: bool, confirm: &mut dyn Confirm) -> Result<OverwritePolicy> {
    if !path.exists() {
        return Ok(OverwritePolicy::Fresh);
    }
    if force {
        info!(path = %path.display(), "replacing existing output");
        return Ok(OverwritePolicy::Replace);
    }

    let question = format!("Output file '{}' already exists. Overwrite?", path.display());
    let confirmed = confirm.confirm(&question).unwrap_or_else(|err| {
        debug!(error = %err, "overwrite prompt failed, treating as declined");
        false
    });

    if confirmed {
        Ok(OverwritePolicy::Replace)
    } else {
        Err(Error::Aborted)
    }
}
