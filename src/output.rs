//! Markdown output for snapshots.
//!
//! The document is written front to back through one [`Write`]r; nothing is
//! revisited once written and file content is never held in full.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Stands in for the content of a file that could not be read.
pub const UNREADABLE_MARKER: &str = "<!-- unable to read file -->";

/// How streaming one file's content ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Complete,
    /// Reading failed part-way and the marker was written in place of the rest.
    Failed,
}

pub struct MarkdownWriter<W: Write> {
    out: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_header(&mut self, root: &Path) -> io::Result<()> {
        self.out.write_all(b"# Codebase Snapshot\n\n")?;
        writeln!(self.out, "*Root directory:* `{}`\n", root.display())
    }

    pub fn write_tree(&mut self, lines: &[String]) -> io::Result<()> {
        self.out.write_all(b"## Directory structure\n\n```text\n")?;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b"\n")?;
            }
            self.out.write_all(line.as_bytes())?;
        }
        self.out.write_all(b"\n```\n\n")
    }

    pub fn begin_files(&mut self) -> io::Result<()> {
        self.out.write_all(b"## Files\n\n")
    }

    pub fn begin_file(&mut self, relative: &str, label: &str) -> io::Result<()> {
        write!(self.out, "### {}\n\n```{}\n", relative, label)
    }

    /// Writes one raw line, decoded lossily, with its line ending normalized to `\n`.
    ///
    /// `\r\n`, `\n` and a lone `\r` all end a line.
    pub fn write_line(&mut self, raw: &[u8]) -> io::Result<()> {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        for part in raw.split(|&b| b == b'\r') {
            self.out.write_all(String::from_utf8_lossy(part).as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Streams `reader` into the open block line by line.
    ///
    /// Read failures are absorbed into the marker line; any `Err` returned is
    /// a failure to write the document itself.
    pub fn write_content<R: BufRead>(&mut self, mut reader: R) -> io::Result<ReadOutcome> {
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => return Ok(ReadOutcome::Complete),
                Ok(_) => self.write_line(&line)?,
                Err(_) => {
                    self.write_unreadable()?;
                    return Ok(ReadOutcome::Failed);
                }
            }
        }
    }

    pub fn write_unreadable(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", UNREADABLE_MARKER)
    }

    pub fn end_file(&mut self) -> io::Result<()> {
        self.out.write_all(b"```\n\n")
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
