// Output sink for the `print` builtin

use crate::parser::ast::SourceLocation;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Write each line straight to standard output
    Stdout,
    /// Keep lines in memory (tests, embedding)
    Capture,
}

/// Terminal that receives program output one line at a time
#[derive(Debug, Clone)]
pub struct Terminal {
    pub lines: Vec<TerminalLine>,
    mode: Mode,
}

impl Terminal {
    pub fn stdout() -> Self {
        Terminal {
            lines: Vec::new(),
            mode: Mode::Stdout,
        }
    }

    pub fn capture() -> Self {
        Terminal {
            lines: Vec::new(),
            mode: Mode::Capture,
        }
    }

    /// Emit one line of output produced at `location`
    pub fn print_line(&mut self, text: String, location: SourceLocation) -> io::Result<()> {
        match self.mode {
            Mode::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", text)
            }
            Mode::Capture => {
                self.lines.push(TerminalLine { text, location });
                Ok(())
            }
        }
    }

    /// Get all captured lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::stdout()
    }
}

/// A line of terminal output with source location tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub text: String,
    pub location: SourceLocation,
}
