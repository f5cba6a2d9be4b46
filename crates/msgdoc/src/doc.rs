//! Assembled type documentation.

use std::sync::Arc;

use msgdoc_core::{
    blocks,
    field::Section,
    group::TypeKind,
    line::Line,
    options::{DescriptionSlice, RawAppend},
};

use crate::{render::RenderedSection, source::LoadedSchema};

/// Directive introducing the raw schema text.
pub const CODE_BLOCK_DIRECTIVE: &str = ".. code-block:: rostype";

/// Indentation of raw schema lines inside the code block.
const CODE_BLOCK_INDENT: &str = "    ";

/// Prefix of quoted type description lines.
const QUOTED_DESCRIPTION: &str = "| ";

/// The documentation of one message, service or action type.
///
/// Produced by [`DocBuilder::document`](crate::DocBuilder::document).
/// [`TypeDoc::lines`] yields the final output in order:
///
/// 1. the raw schema text when appended at the head,
/// 2. the field fragments of every section,
/// 3. the type description,
/// 4. the raw schema text when appended at the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDoc {
    kind: TypeKind,
    package: String,
    origin: Arc<str>,
    sections: Vec<RenderedSection>,
    description: Vec<Line>,
    raw: Option<(RawAppend, Vec<Line>)>,
}

impl TypeDoc {
    pub(crate) fn new(
        kind: TypeKind,
        schema: &LoadedSchema,
        sections: Vec<RenderedSection>,
        description: Vec<Line>,
        raw: Option<RawAppend>,
    ) -> Self {
        Self {
            kind,
            package: schema.package().to_string(),
            origin: Arc::clone(schema.origin_handle()),
            sections,
            description,
            raw: raw.map(|placement| (placement, code_block(schema, placement))),
        }
    }

    /// Returns the schema kind.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns the package the type belongs to.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the origin the schema was read from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the rendered sections.
    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    /// Returns the type description lines.
    pub fn description(&self) -> &[Line] {
        &self.description
    }

    /// Returns where the raw schema text is placed, if at all.
    pub fn raw(&self) -> Option<RawAppend> {
        self.raw.as_ref().map(|(placement, _)| *placement)
    }

    /// Returns the raw schema code block lines.
    pub fn raw_lines(&self) -> &[Line] {
        match &self.raw {
            Some((_, lines)) => lines,
            None => &[],
        }
    }

    /// Returns every output line in order, with provenance.
    pub fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        if self.raw() == Some(RawAppend::Head) {
            lines.extend_from_slice(self.raw_lines());
        }
        for section in &self.sections {
            lines.extend(section.lines());
        }
        if let Some(first) = self.description.first() {
            lines.push(first.blank_at());
            lines.extend_from_slice(&self.description);
        }
        if self.raw() == Some(RawAppend::Tail) {
            lines.extend_from_slice(self.raw_lines());
        }
        lines
    }

    /// Returns the output as text, one line per row.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in self.lines() {
            text.push_str(line.text());
            text.push('\n');
        }
        text
    }
}

/// Select the type description from the leading comments of the first
/// field.
///
/// The comment blocks above the first field of the first section are
/// sliced, joined and aligned, with a `| ` prefix when quoted.
pub(crate) fn type_description(sections: &[Section], slice: DescriptionSlice) -> Vec<Line> {
    let Some(first) = sections.first().and_then(|section| section.fields().first()) else {
        return Vec::new();
    };

    let comment_blocks = blocks::split(first.pre_comments());
    let selected = &comment_blocks[slice.range(comment_blocks.len())];
    let mut description = blocks::join(selected);

    let prefix = if slice.quote() { QUOTED_DESCRIPTION } else { "" };
    blocks::align(&mut description, prefix);
    description
}

fn code_block(schema: &LoadedSchema, placement: RawAppend) -> Vec<Line> {
    let anchor = Line::new("", Arc::clone(schema.origin_handle()), 1);

    let mut lines = vec![
        anchor.clone(),
        anchor.with_text(CODE_BLOCK_DIRECTIVE),
        anchor.clone(),
    ];
    lines.extend(
        schema
            .lines()
            .iter()
            .map(|line| line.with_text(format!("{CODE_BLOCK_INDENT}{}", line.text()))),
    );
    if placement == RawAppend::Head {
        lines.push(lines.last().map_or(anchor, Line::blank_at));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgdoc_core::line::{lines_from_str, texts};
    use msgdoc_parser::{error::DiagnosticCollector, parse};

    fn sections(source: &str) -> Vec<Section> {
        let lines = lines_from_str("test.msg", source);
        parse(&lines, "test_msgs", &mut DiagnosticCollector::new())
    }

    const DESCRIBED: &str = "\
#   Overview of the type.
#     Indented detail.

# Second block.

# Third block.
int32 a
";

    #[test]
    fn test_type_description_all_blocks() {
        let description = type_description(&sections(DESCRIBED), DescriptionSlice::default());

        assert_eq!(
            texts(&description),
            vec![
                "  Overview of the type.",
                "    Indented detail.",
                "",
                "Second block.",
                "",
                "Third block.",
            ]
        );
    }

    #[test]
    fn test_type_description_slice_and_quote() {
        let slice: DescriptionSlice = "1:, quote".parse().unwrap();
        let description = type_description(&sections(DESCRIBED), slice);

        assert_eq!(
            texts(&description),
            vec!["| Second block.", "| ", "| Third block."]
        );
    }

    #[test]
    fn test_type_description_negative_slice() {
        let slice: DescriptionSlice = ":-1".parse().unwrap();
        let description = type_description(&sections(DESCRIBED), slice);

        assert_eq!(description.len(), 4);
        assert_eq!(description[3].text().trim(), "Second block.");
    }

    #[test]
    fn test_type_description_empty_cases() {
        assert!(type_description(&sections("int32 a\n"), DescriptionSlice::default()).is_empty());
        assert!(type_description(&sections("# only comments\n"), DescriptionSlice::default()).is_empty());

        let slice: DescriptionSlice = "5:".parse().unwrap();
        assert!(type_description(&sections(DESCRIBED), slice).is_empty());
    }

    #[test]
    fn test_code_block_head_and_tail() {
        let schema = LoadedSchema::new("test_msgs", "Point.msg", "float64 x\n\nfloat64 y");

        let tail = code_block(&schema, RawAppend::Tail);
        assert_eq!(
            texts(&tail),
            vec![
                "",
                CODE_BLOCK_DIRECTIVE,
                "",
                "    float64 x",
                "    ",
                "    float64 y",
            ]
        );
        assert_eq!(tail[5].offset(), 3);
        assert_eq!(tail[1].origin(), "Point.msg");

        let head = code_block(&schema, RawAppend::Head);
        assert_eq!(head.len(), tail.len() + 1);
        assert!(head.last().unwrap().is_blank());
    }
}
