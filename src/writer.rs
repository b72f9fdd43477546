/*!
 * Aggregate document writer
 *
 * Layout:
 *
 * ```text
 * Introduction:
 * <two fixed lines>
 *
 * Index:
 * 1. a.py
 * 4. src/b.txt
 *
 * ==================================================
 * === 1. a.py ===
 * ==================================================
 *
 * <content>
 *
 * ```
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{AggregatorError, Result};
use crate::types::{AcceptedFile, AggregateDocument};

/// Width of the `=` rule around each file header
pub const SEPARATOR_WIDTH: usize = 50;

/// Serializes an [`AggregateDocument`] in the fixed text format
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateWriter;

impl AggregateWriter {
    pub fn new() -> Self {
        Self
    }

    /// Create or truncate `path` and write the document into it
    pub fn write(&self, document: &AggregateDocument, path: &Path) -> Result<()> {
        let to_write_error = |source: io::Error| AggregatorError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(to_write_error)?;
        let mut writer = BufWriter::new(file);
        self.render(document, &mut writer).map_err(to_write_error)?;
        writer.flush().map_err(to_write_error)
    }

    /// Write the document to any sink
    pub fn render<W: Write>(&self, document: &AggregateDocument, mut out: W) -> io::Result<()> {
        out.write_all(AggregateDocument::INTRODUCTION.as_bytes())?;
        out.write_all(b"\n")?;

        self.write_index(document.files(), &mut out)?;

        for file in document.files() {
            self.write_section(file, &mut out)?;
        }

        Ok(())
    }

    /// Render into a string, mostly for tests and previews
    pub fn render_to_string(&self, document: &AggregateDocument) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.render(document, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_index<W: Write>(&self, files: &[AcceptedFile], out: &mut W) -> io::Result<()> {
        writeln!(out, "Index:")?;
        for file in files {
            writeln!(out, "{}. {}", file.index(), file.path())?;
        }
        writeln!(out)
    }

    fn write_section<W: Write>(&self, file: &AcceptedFile, out: &mut W) -> io::Result<()> {
        let separator = "=".repeat(SEPARATOR_WIDTH);

        writeln!(out, "{}", separator)?;
        writeln!(out, "=== {}. {} ===", file.index(), file.path())?;
        writeln!(out, "{}", separator)?;
        writeln!(out)?;
        out.write_all(file.content().as_bytes())?;
        out.write_all(b"\n\n")
    }
}
