// Output streams for script execution

use crate::interpreter::errors::Diagnostic;
use std::io::{self, Write};

/// Destination for produced text and diagnostics.
///
/// Text is passed through verbatim, in production order, with nothing added
/// between writes.
pub trait Terminal {
    /// Write program output.
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Write a recoverable diagnostic to the diagnostic stream.
    fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()>;

    /// Deliver anything still buffered.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn print(&mut self, text: &str) -> io::Result<()> {
        (**self).print(text)
    }

    fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        (**self).report(diagnostic)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Terminal backed by any pair of writers: program output and diagnostics.
///
/// Program output is buffered until [`Terminal::flush`]; diagnostics are
/// flushed as soon as they are written.
#[derive(Debug)]
pub struct StreamTerminal<O: Write, E: Write> {
    out: io::BufWriter<O>,
    err: E,
}

impl<O: Write, E: Write> StreamTerminal<O, E> {
    pub fn new(out: O, err: E) -> Self {
        StreamTerminal {
            out: io::BufWriter::new(out),
            err,
        }
    }
}

impl<O: Write, E: Write> Terminal for StreamTerminal<O, E> {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        writeln!(self.err, "warning: {}", diagnostic)?;
        self.err.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Terminal writing to the process's stdout and stderr
pub type StdTerminal = StreamTerminal<io::Stdout, io::Stderr>;

impl StdTerminal {
    pub fn stdio() -> Self {
        StreamTerminal::new(io::stdout(), io::stderr())
    }
}

/// Mock terminal for capturing output in memory
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    output: String,
    diagnostics: Vec<Diagnostic>,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far, concatenated
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Diagnostics in the order they were reported
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Terminal for MockTerminal {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.diagnostics.push(diagnostic.clone());
        Ok(())
    }
}
