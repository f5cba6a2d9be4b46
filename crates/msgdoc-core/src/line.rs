//! Source lines with provenance.
//!
//! A [`Line`] is the atomic unit every stage of the pipeline works on. It
//! carries its literal text together with the origin it was read from and
//! its 1-based line number within that origin, so that rendered output can
//! always be mapped back to a source position.

use std::{fmt, sync::Arc};

/// A single line of text and where it came from.
///
/// Cloning a line is cheap: the origin name is shared between all lines of
/// the same source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    text: String,
    origin: Arc<str>,
    offset: usize,
}

impl Line {
    /// Create a new line.
    ///
    /// # Arguments
    ///
    /// * `text` - The literal line content, without the line terminator.
    /// * `origin` - File path or virtual document id.
    /// * `offset` - 1-based line number within `origin`.
    pub fn new(text: impl Into<String>, origin: Arc<str>, offset: usize) -> Self {
        Self {
            text: text.into(),
            origin,
            offset,
        }
    }

    /// Returns the line content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the origin this line was read from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the shared origin handle.
    pub fn origin_handle(&self) -> &Arc<str> {
        &self.origin
    }

    /// Returns the 1-based line number within the origin.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` if the line has no visible content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Create a line with different text but the same provenance.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Arc::clone(&self.origin),
            offset: self.offset,
        }
    }

    /// Create an empty line with the same provenance.
    pub fn blank_at(&self) -> Self {
        self.with_text(String::new())
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Split raw content into provenance-carrying lines.
///
/// Line numbers start at 1. Both `\n` and `\r\n` terminators are accepted.
///
/// # Example
///
/// ```
/// # use msgdoc_core::line::lines_from_str;
/// let lines = lines_from_str("Point.msg", "float64 x\nfloat64 y\n");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1].text(), "float64 y");
/// assert_eq!(lines[1].offset(), 2);
/// assert_eq!(lines[1].origin(), "Point.msg");
/// ```
pub fn lines_from_str(origin: impl Into<Arc<str>>, content: &str) -> Vec<Line> {
    let origin = origin.into();
    content
        .lines()
        .enumerate()
        .map(|(index, text)| Line::new(text, Arc::clone(&origin), index + 1))
        .collect()
}

/// Collect the text of a line sequence, one entry per line.
pub fn texts(lines: &[Line]) -> Vec<&str> {
    lines.iter().map(Line::text).collect()
}
