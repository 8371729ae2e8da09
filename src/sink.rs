//! Destinations for the human-readable battle log.
//!
//! Every event line is `Turn <n>: <message>`. A sink is borrowed by one
//! battle for its whole run and flushed on every exit path.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Receives battle log lines in turn order.
pub trait LogSink {
    /// Record one event.
    fn record(&mut self, turn: u32, message: &str);

    /// Push buffered lines to their destination.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error seen since the sink was created.
    fn flush(&mut self) -> io::Result<()>;
}

/// Format one log line.
#[must_use]
pub fn format_line(turn: u32, message: &str) -> String {
    format!("Turn {turn}: {message}")
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&mut self, _turn: u32, _message: &str) {}

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
    flushes: usize,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the sink, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// How many times the sink was flushed.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, turn: u32, message: &str) {
        self.lines.push(format_line(turn, message));
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Writes lines to any [`Write`] destination.
///
/// `record` cannot fail; the first write error is kept and returned by the
/// next `flush`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl WriterSink<BufWriter<File>> {
    /// Create (or truncate) a log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Recover the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn record(&mut self, turn: u32, message: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{}", format_line(turn, message)) {
            self.error = Some(e);
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn record(&mut self, turn: u32, message: &str) {
        (**self).record(turn, message);
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
