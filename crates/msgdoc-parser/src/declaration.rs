//! Grammar for a single declaration line.
//!
//! ```text
//! declaration := TYPE ARRAY? SPACE+ NAME ASSIGNMENT? SPACE* ('#' COMMENT)?
//! TYPE        := [\w/]+
//! ARRAY       := SPACE* '[' SPACE* DIGIT* SPACE* ']'
//! NAME        := \w+
//! ASSIGNMENT  := SPACE* '=' [^#]+
//! ```
//!
//! The input is expected to be trimmed already.

use winnow::{
    Parser as _,
    ascii::{digit0, space0, space1},
    combinator::{opt, preceded},
    error::{ContextError, ErrMode},
    token::{rest, take_till, take_while},
};

use msgdoc_core::{
    field::{FieldBuilder, STRING_TYPE, normalize_type},
    line::Line,
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// The right-hand side of a constant declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Assignment<'src> {
    /// Text between `=` and the next `#` (or the end of the line).
    value: &'src str,
    /// Everything after `=`, including what would otherwise be a comment.
    tail: &'src str,
}

/// A declaration split into its syntactic parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Declaration<'src> {
    type_name: &'src str,
    array_size: Option<&'src str>,
    name: &'src str,
    assignment: Option<Assignment<'src>>,
    comment: Option<&'src str>,
}

impl Declaration<'_> {
    /// Turn the declaration into a field builder.
    ///
    /// `package` qualifies bare compound types. String constants take the
    /// whole remainder of the line as their value, so a `#` inside the
    /// value is kept and no inline comment is recorded.
    pub(crate) fn into_builder(self, line: &Line, package: &str) -> FieldBuilder {
        let array_size: String = self
            .array_size
            .map(|size| size.chars().filter(|c| !c.is_whitespace()).collect())
            .unwrap_or_default();

        let (value, comment) = match self.assignment {
            Some(assignment) if self.type_name == STRING_TYPE => (assignment.tail.trim(), ""),
            Some(assignment) => (assignment.value.trim(), self.comment.unwrap_or("").trim()),
            None => ("", self.comment.unwrap_or("").trim()),
        };

        FieldBuilder::new(
            line.clone(),
            normalize_type(self.type_name, package),
            self.name,
        )
        .with_array_size(array_size)
        .with_value(value)
        .with_comment(comment)
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn type_name<'src>(input: &mut &'src str) -> IResult<&'src str> {
    take_while(1.., |c: char| is_word(c) || c == '/').parse_next(input)
}

fn array_size<'src>(input: &mut &'src str) -> IResult<&'src str> {
    (space0, '[', space0, digit0, space0, ']')
        .take()
        .parse_next(input)
}

fn name<'src>(input: &mut &'src str) -> IResult<&'src str> {
    take_while(1.., is_word).parse_next(input)
}

fn assignment<'src>(input: &mut &'src str) -> IResult<Assignment<'src>> {
    (space0, '=').void().parse_next(input)?;
    let tail = *input;
    let value = take_till(1.., '#').parse_next(input)?;
    Ok(Assignment { value, tail })
}

fn comment<'src>(input: &mut &'src str) -> IResult<&'src str> {
    preceded((space0, '#'), rest).parse_next(input)
}

fn declaration<'src>(input: &mut &'src str) -> IResult<Declaration<'src>> {
    let type_name = type_name.parse_next(input)?;
    let array_size = opt(array_size).parse_next(input)?;
    space1.parse_next(input)?;
    let name = name.parse_next(input)?;
    let assignment = opt(assignment).parse_next(input)?;
    let comment = opt(comment).parse_next(input)?;
    space0.parse_next(input)?;

    Ok(Declaration {
        type_name,
        array_size,
        name,
        assignment,
        comment,
    })
}

/// Parse a trimmed declaration line.
///
/// Returns `None` if the whole line does not match the grammar.
pub(crate) fn parse_declaration(text: &str) -> Option<Declaration<'_>> {
    let mut input = text;
    match declaration(&mut input) {
        Ok(parsed) if input.is_empty() => Some(parsed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field() {
        let decl = parse_declaration("float64 x").unwrap();

        assert_eq!(decl.type_name, "float64");
        assert_eq!(decl.array_size, None);
        assert_eq!(decl.name, "x");
        assert_eq!(decl.assignment, None);
        assert_eq!(decl.comment, None);
    }

    #[test]
    fn test_array_with_spaces() {
        let decl = parse_declaration("float64 [ 9 ] covariance").unwrap();

        assert_eq!(decl.array_size, Some(" [ 9 ]"));
        assert_eq!(decl.name, "covariance");
    }

    #[test]
    fn test_constant_with_comment() {
        let decl = parse_declaration("uint8 DEBUG=1  # debug level").unwrap();
        let assignment = decl.assignment.unwrap();

        assert_eq!(assignment.value, "1  ");
        assert_eq!(assignment.tail, "1  # debug level");
        assert_eq!(decl.comment, Some(" debug level"));
    }

    #[test]
    fn test_package_qualified_type() {
        let decl = parse_declaration("geometry_msgs/Point position #where").unwrap();

        assert_eq!(decl.type_name, "geometry_msgs/Point");
        assert_eq!(decl.comment, Some("where"));
    }

    #[test]
    fn test_assignment_without_value_is_rejected() {
        assert!(parse_declaration("int32 X =").is_none());
        assert!(parse_declaration("int32 X =#c").is_none());
    }

    #[test]
    fn test_malformed_lines() {
        assert!(parse_declaration("int32").is_none());
        assert!(parse_declaration("int32 a b").is_none());
        assert!(parse_declaration("int32[ x").is_none());
        assert!(parse_declaration("int32[3 x").is_none());
        assert!(parse_declaration("= 5").is_none());
    }
}
