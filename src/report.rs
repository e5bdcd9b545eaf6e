//! Diagnostic Report
//!
//! Append-only sink for validation findings. One report covers a whole run:
//! the driver opens it before the first volume and finishes it after the
//! last, so entries from consecutive volumes land in one log in detection
//! order. There is no severity and no deduplication.

use std::fmt;
use std::io::{self, Write};

use serde::Deserialize;

/// Category tag attached to every diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Structural problems: locators, variant groups, leftover delimiters
    Format,
    /// Shad, tsheg and head-mark misuse
    Punctuation,
    /// Characters or character sequences that cannot occur
    Invalid,
    /// Page or line sequence violations
    PageNumbering,
    /// Verse meter deviations
    Verses,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Category::Format => "format",
            Category::Punctuation => "punctuation",
            Category::Invalid => "invalid",
            Category::PageNumbering => "pagenumbering",
            Category::Verses => "verses",
        };
        f.write_str(tag)
    }
}

/// A single validation finding, ready to be written to the report
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic<'a> {
    /// Raw locator text the finding refers to; empty when the finding is
    /// not tied to a specific locator (page ordering, unparsable locators)
    pub locator: &'a str,
    /// One-based line number in the volume file
    pub file_line: u32,
    /// Volume number the finding belongs to
    pub volume: u32,
    /// File stem of the volume, used as the entry prefix
    pub short_name: &'a str,
    pub category: Category,
    pub message: &'a str,
    /// Optional copy of the offending line with the problem span marked
    pub excerpt: Option<&'a str>,
}

/// Writes diagnostics in the line-oriented report format
#[derive(Debug)]
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Append one entry; a second line is added when an excerpt is present
    pub fn write(&mut self, entry: &Diagnostic<'_>) -> io::Result<()> {
        writeln!(
            self.out,
            "{}, l. {} ({}): {}: {}",
            entry.short_name, entry.file_line, entry.locator, entry.category, entry.message
        )?;
        if let Some(excerpt) = entry.excerpt {
            writeln!(self.out, "  -> {excerpt}")?;
        }
        Ok(())
    }

    /// Flush pending output and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
