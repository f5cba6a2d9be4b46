//! Comment block segmentation.
//!
//! A comment block is a maximal run of non-blank lines. Blank lines only
//! ever act as delimiters: [`split`] consumes them and [`join`] puts back
//! exactly one between consecutive blocks.

use crate::line::Line;

/// A borrowed run of non-blank lines.
pub type Block<'a> = &'a [Line];

/// Split lines into blocks separated by blank lines.
///
/// Blank lines never appear inside a returned block. Leading, trailing and
/// repeated blank lines produce no empty blocks.
///
/// # Example
///
/// ```
/// # use msgdoc_core::{blocks::split, line::lines_from_str};
/// let lines = lines_from_str("doc", "a\nb\n\n\nc\n");
/// let blocks = split(&lines);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].len(), 2);
/// assert_eq!(blocks[1][0].text(), "c");
/// ```
pub fn split(lines: &[Line]) -> Vec<Block<'_>> {
    lines
        .split(Line::is_blank)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Join blocks into a single run with one blank line between blocks.
///
/// The inserted blank lines carry the provenance of the last line of the
/// preceding block. No blank line is emitted after the last block.
pub fn join(blocks: &[Block<'_>]) -> Vec<Line> {
    let mut joined = Vec::new();
    for block in blocks.iter().filter(|block| !block.is_empty()) {
        if let Some(last) = joined.last().map(Line::blank_at) {
            joined.push(last);
        }
        joined.extend(block.iter().cloned());
    }
    joined
}

/// Normalize `join(split(lines))` in one step.
pub fn normalize(lines: &[Line]) -> Vec<Line> {
    join(&split(lines))
}

/// Remove the common indentation of `lines` and optionally prefix them.
///
/// The indentation width is the smallest leading whitespace count among the
/// non-empty lines (zero when there are none). That many characters are
/// removed from every line, then `prefix` is prepended to every line when
/// it is not empty.
///
/// # Example
///
/// ```
/// # use msgdoc_core::{blocks::align, line::{lines_from_str, texts}};
/// let mut lines = lines_from_str("doc", "   first\n     nested\n");
/// align(&mut lines, "| ");
/// assert_eq!(texts(&lines), vec!["| first", "|   nested"]);
/// ```
pub fn align(lines: &mut [Line], prefix: &str) {
    let width = lines
        .iter()
        .map(Line::text)
        .filter(|text| !text.is_empty())
        .map(|text| text.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    if width == 0 && prefix.is_empty() {
        return;
    }

    for line in lines.iter_mut() {
        let text = line.text_mut();
        let stripped: String = text.chars().skip(width).collect();
        *text = format!("{prefix}{stripped}");
    }
}
