//! Console streams used by the `input` and `output` built-ins

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented I/O for built-ins.
pub trait Console {
    /// Read one line without its terminator. `Ok(None)` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write one line; the terminator is added by the console.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// The process's standard input and output.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(strip_terminator(line)))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)?;
        out.flush()
    }
}

/// In-memory console: scripted input lines and captured output lines.
///
/// # Example
///
/// ```
/// use madlang::{BufferedConsole, Console};
///
/// let mut console = BufferedConsole::with_input(["7"]);
/// assert_eq!(console.read_line().unwrap(), Some("7".to_string()));
/// assert_eq!(console.read_line().unwrap(), None);
///
/// console.write_line("42").unwrap();
/// assert_eq!(console.output(), ["42"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BufferedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console whose `read_line` yields `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Queue another input line.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Lines written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Take the captured lines, leaving the buffer empty.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl Console for BufferedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
