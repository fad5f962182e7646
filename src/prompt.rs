//! Blocking operator prompts.
//!
//! The wait-for-the-operator step is modelled as an explicit prompt
//! abstraction rather than editor-process detection: the session never
//! inspects the editor's lifecycle, it trusts the operator's signal.

use std::io::{self, BufRead, Write};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Terminal interaction seam. Mocked in tests so walks and edit sessions
/// run without a terminal attached.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Prompt: Send + Sync {
    /// Print `question` (no trailing newline) and return the operator's
    /// answer line with the line terminator stripped.
    fn ask(&self, question: &str) -> io::Result<String>;

    /// Print `message` and block until the operator presses Enter.
    fn pause(&self, message: &str) -> io::Result<()>;
}

/// Stdin/stdout-backed [`Prompt`].
#[derive(Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;
        self.read_line()
    }

    fn pause(&self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{message}")?;
        stdout.flush()?;
        self.read_line().map(|_| ())
    }
}
