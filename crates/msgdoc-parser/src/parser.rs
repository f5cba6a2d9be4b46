//! Line classifier and field extractor.
//!
//! Each line of an interface definition is one of:
//!
//! - a section separator (`---`),
//! - a comment or blank line,
//! - a declaration.
//!
//! Comment lines are attached to the neighbouring declarations while the
//! lines are scanned. The public entry point is [`parse`].

use std::mem;

use log::{debug, trace};

use msgdoc_core::{
    field::{Field, FieldBuilder, Section},
    line::Line,
};

use crate::{
    declaration,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Location},
};

/// The line separating two sections.
pub const SECTION_SEPARATOR: &str = "---";

/// The marker starting a comment.
pub const COMMENT_MARKER: char = '#';

/// Accumulates the fields of the section being scanned.
///
/// Fields stay as builders until the section is closed because each
/// comment line may still extend the trailing commentary of the last field.
#[derive(Debug, Default)]
struct SectionBuilder {
    fields: Vec<FieldBuilder>,
    pre_comments: Vec<Line>,
}

impl SectionBuilder {
    fn push_comment(&mut self, comment: Line) {
        if let Some(last) = self.fields.last_mut() {
            last.push_post_comment(comment.clone());
        }
        self.pre_comments.push(comment);
    }

    fn push_field(&mut self, builder: FieldBuilder) {
        let pre_comments = mem::take(&mut self.pre_comments);
        self.fields.push(builder.with_pre_comments(pre_comments));
    }

    fn finish(&mut self) -> Section {
        self.pre_comments.clear();
        Section::new(self.fields.drain(..).map(FieldBuilder::build).collect())
    }
}

/// Parse the lines of an interface definition into sections.
///
/// Always returns at least one section; every `---` separator closes the
/// current section, even an empty one. Bare compound types are qualified
/// with `package`.
///
/// Lines that cannot be classified are reported to `diagnostics` as
/// [`ErrorCode::E100`] warnings and skipped.
///
/// # Example
///
/// ```
/// # use msgdoc_core::line::lines_from_str;
/// # use msgdoc_parser::{error::DiagnosticCollector, parse};
/// let lines = lines_from_str("AddTwoInts.srv", "int64 a\nint64 b\n---\nint64 sum\n");
/// let mut diagnostics = DiagnosticCollector::new();
///
/// let sections = parse(&lines, "rospy_tutorials", &mut diagnostics);
///
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].len(), 2);
/// assert_eq!(sections[1].fields()[0].name(), "sum");
/// assert!(diagnostics.is_empty());
/// ```
pub fn parse(lines: &[Line], package: &str, diagnostics: &mut DiagnosticCollector) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = SectionBuilder::default();

    for line in lines {
        let text = line.text().trim();

        if text == SECTION_SEPARATOR {
            trace!(offset = line.offset(); "Section separator");
            sections.push(current.finish());
        } else if text.is_empty() || text.starts_with(COMMENT_MARKER) {
            let comment = text.strip_prefix(COMMENT_MARKER).unwrap_or(text);
            current.push_comment(line.with_text(comment));
        } else if let Some(declaration) = declaration::parse_declaration(text) {
            current.push_field(declaration.into_builder(line, package));
        } else {
            diagnostics.emit(unparsable_line(line, text));
        }
    }
    sections.push(current.finish());

    debug!(
        package = package,
        sections = sections.len(),
        fields = sections.iter().map(Section::len).sum::<usize>();
        "Parsed interface definition"
    );

    sections
}

/// Parse a single declaration line into a field without comments.
///
/// Returns `None` for comments, blank lines, separators and anything that
/// is not a valid declaration.
pub fn parse_field(line: &Line, package: &str) -> Option<Field> {
    let text = line.text().trim();
    if text == SECTION_SEPARATOR || text.starts_with(COMMENT_MARKER) {
        return None;
    }
    declaration::parse_declaration(text)
        .map(|declaration| declaration.into_builder(line, package).build())
}

fn unparsable_line(line: &Line, text: &str) -> Diagnostic {
    Diagnostic::warning(format!("cannot parse line `{text}`"))
        .with_code(ErrorCode::E100)
        .with_label(Location::from(line), "not a declaration, comment or separator")
        .with_help("declarations look like `TYPE NAME`, `TYPE[N] NAME` or `TYPE NAME = VALUE`")
}
