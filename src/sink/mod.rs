//! Sinks: destinations that accept progressive content updates.
//!
//! The scheduler calls [`Sink::write`] with the full revealed prefix
//! after every unit; the final write of a non-superseded run is always
//! the complete text. Writes are synchronous and must not block on
//! anything slower than the output device.

use crate::reveal::{units, RevealUnit};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::queue;
use log::warn;
use std::io;
use std::sync::{Arc, Mutex};

/// A destination that accepts progressive content updates.
pub trait Sink: Send {
    /// Replace the sink's visible content.
    fn write(&mut self, content: &str);
}

/// A sink shared with a reveal session thread.
pub type SharedSink = Arc<Mutex<dyn Sink>>;

/// Wrap a sink for sharing with a reveal session.
pub fn shared<S: Sink + 'static>(sink: S) -> SharedSink {
    Arc::new(Mutex::new(sink))
}

/// An observable in-memory sink for tests and embedding.
///
/// Records the latest content and the full history of writes, which is
/// what the supersession and tag-atomicity properties are asserted on.
#[derive(Debug, Default)]
pub struct MemorySink {
    content: String,
    writes: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The content currently shown by the sink.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Every write the sink has received, oldest first.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl Sink for MemorySink {
    fn write(&mut self, content: &str) {
        self.content.clear();
        self.content.push_str(content);
        self.writes.push(content.to_owned());
    }
}

/// A crossterm-backed sink that prints to a writer (stdout by default).
///
/// Optimized for the scheduler's monotonically growing writes: when new
/// content extends what was already printed, only the delta is emitted.
/// A write that does not extend the previous content starts a fresh
/// line and reprints in full.
///
/// The three markup forms the pipeline produces are translated for the
/// terminal (bold and italic tags become text attributes, `<br />`
/// becomes a newline) and any other tag is dropped from the printout.
pub struct TerminalSink<W: io::Write + Send = io::Stdout> {
    out: W,
    written: String,
}

impl TerminalSink<io::Stdout> {
    /// Create a sink that prints to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalSink<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: io::Write + Send> TerminalSink<W> {
    /// Create a sink that prints to an arbitrary writer.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            written: String::new(),
        }
    }

    /// Consume the sink, returning the writer.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Queue one chunk of markup, translating tags for the terminal.
    fn render(&mut self, chunk: &str) -> io::Result<()> {
        for unit in units(chunk) {
            match unit {
                RevealUnit::Tag(tag) => match tag {
                    "<b>" | "<strong>" => queue!(self.out, SetAttribute(Attribute::Bold))?,
                    "</b>" | "</strong>" => {
                        queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
                    }
                    "<i>" | "<em>" => queue!(self.out, SetAttribute(Attribute::Italic))?,
                    "</i>" | "</em>" => queue!(self.out, SetAttribute(Attribute::NoItalic))?,
                    t if t.starts_with("<br") => queue!(self.out, Print("\n"))?,
                    _ => {}
                },
                RevealUnit::Char(grapheme) => queue!(self.out, Print(grapheme))?,
            }
        }
        self.out.flush()
    }
}

impl<W: io::Write + Send> Sink for TerminalSink<W> {
    fn write(&mut self, content: &str) {
        let delta = match content.strip_prefix(self.written.as_str()) {
            Some(delta) => delta.to_owned(),
            None => {
                // Content was replaced wholesale: start a fresh line.
                let mut full = String::with_capacity(content.len() + 1);
                full.push('\n');
                full.push_str(content);
                full
            }
        };

        if let Err(err) = self.render(&delta) {
            warn!("terminal sink write failed: {err}");
        }

        self.written.clear();
        self.written.push_str(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_replaces_content() {
        let mut sink = MemorySink::new();
        sink.write("a");
        sink.write("ab");
        assert_eq!(sink.content(), "ab");
        assert_eq!(sink.writes(), ["a", "ab"]);
    }

    #[test]
    fn test_terminal_sink_prints_only_deltas() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.write("Hi");
        sink.write("Hi there");
        let printed = String::from_utf8(sink.into_writer()).unwrap();
        // "Hi" must appear exactly once: the second write only adds the tail.
        assert_eq!(printed.matches("Hi").count(), 1);
        assert!(printed.contains(" there"));
    }

    #[test]
    fn test_terminal_sink_translates_line_breaks() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.write("a<br />b");
        let printed = String::from_utf8(sink.into_writer()).unwrap();
        assert!(printed.contains("a\nb"));
        assert!(!printed.contains("<br />"));
    }

    #[test]
    fn test_terminal_sink_drops_unknown_tags() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.write("x<span>y</span>z");
        let printed = String::from_utf8(sink.into_writer()).unwrap();
        assert!(printed.contains("xyz"));
        assert!(!printed.contains("span"));
    }

    #[test]
    fn test_terminal_sink_wholesale_replace_starts_new_line() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.write("first");
        sink.write("second");
        let printed = String::from_utf8(sink.into_writer()).unwrap();
        assert!(printed.contains("first\nsecond"));
    }
}
