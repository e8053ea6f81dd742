//! Line-oriented terminal input and output.
//!
//! [`Console`] wraps any `BufRead` / `Write` pair so the interactive menu can
//! run against stdin/stdout or against in-memory buffers in tests. Every read
//! returns `Ok(None)` once input is exhausted.

use std::io::{self, BufRead, Write};

pub const INVALID_NUMBER_PROMPT: &str = "Please enter a valid number: ";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `text` without a newline and flush so it shows before input.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Read the next line with surrounding whitespace removed.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Read an integer, re-prompting until one is entered.
    ///
    /// Input is consumed token by token: each non-numeric token is discarded
    /// with a re-prompt, blank lines are skipped, and anything after the
    /// accepted integer on the same line is dropped.
    pub fn read_int(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            for token in line.split_whitespace() {
                match token.parse::<i64>() {
                    Ok(n) => return Ok(Some(n)),
                    Err(_) => {
                        tracing::debug!("discarding non-numeric input {token:?}");
                        self.prompt(INVALID_NUMBER_PROMPT)?;
                    }
                }
            }
        }
    }
}
