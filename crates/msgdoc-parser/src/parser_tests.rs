//! Unit tests for the line classifier and field extractor.
//!
//! These tests verify how declarations are extracted and how comment lines
//! are attached to the declarations around them.

use msgdoc_core::{
    field::{Field, Section},
    line::{Line, lines_from_str, texts},
};
use proptest::prelude::*;

use crate::{
    error::{DiagnosticCollector, ErrorCode},
    parse, parse_field,
};

/// Helper function to parse a source string in the `test_msgs` package
fn parse_source(source: &str) -> (Vec<Section>, DiagnosticCollector) {
    let lines = lines_from_str("test.msg", source);
    let mut diagnostics = DiagnosticCollector::new();
    let sections = parse(&lines, "test_msgs", &mut diagnostics);
    (sections, diagnostics)
}

/// Helper function to parse a single-section source and assert it is clean
fn parse_fields(source: &str) -> Vec<Field> {
    let (sections, diagnostics) = parse_source(source);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got: {:?}",
        diagnostics.diagnostics()
    );
    assert_eq!(sections.len(), 1, "Expected a single section");
    sections[0].fields().to_vec()
}

fn trimmed(lines: &[Line]) -> Vec<&str> {
    lines.iter().map(|line| line.text().trim()).collect()
}

mod extraction_tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        let fields = parse_fields("int32 a\nfloat64 b\n");

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "a");
        assert_eq!(fields[0].type_name(), "int32");
        assert_eq!(fields[1].name(), "b");
        assert_eq!(fields[1].type_name(), "float64");
        assert!(!fields[0].is_constant());
    }

    #[test]
    fn test_array_sizes() {
        let fields = parse_fields("uint8[] data\nfloat64[9] covariance\nint8 [ 4 ] quad\n");

        assert_eq!(fields[0].array_size(), "[]");
        assert_eq!(fields[1].array_size(), "[9]");
        assert_eq!(fields[2].array_size(), "[4]");
        assert_eq!(fields[2].rendered_name(), "quad[4]");
    }

    #[test]
    fn test_constants() {
        let fields = parse_fields("int32 MAX = 100\nuint8 FLAG=1 # a flag\nfloat32 PI= 3.14\n");

        assert_eq!(fields[0].value(), "100");
        assert!(fields[0].is_constant());
        assert_eq!(fields[1].value(), "1");
        assert_eq!(fields[1].comment().text(), "a flag");
        assert_eq!(fields[2].value(), "3.14");
    }

    #[test]
    fn test_string_constant_keeps_hash() {
        let fields = parse_fields("string GREETING = hello # world\n");

        assert_eq!(fields[0].value(), "hello # world");
        assert_eq!(fields[0].comment().text(), "");
    }

    #[test]
    fn test_string_field_comment_is_separate() {
        let fields = parse_fields("string label # shown to users\n");

        assert_eq!(fields[0].value(), "");
        assert_eq!(fields[0].comment().text(), "shown to users");
    }

    #[test]
    fn test_type_normalization() {
        let fields = parse_fields("Header header\nPoint p\nstd_msgs/ColorRGBA color\ntime stamp\n");

        assert_eq!(fields[0].type_name(), "std_msgs/Header");
        assert_eq!(fields[1].type_name(), "test_msgs/Point");
        assert_eq!(fields[2].type_name(), "std_msgs/ColorRGBA");
        assert_eq!(fields[3].type_name(), "time");
    }

    #[test]
    fn test_header_ignores_enclosing_package() {
        let lines = lines_from_str("Odometry.msg", "Header header");
        let mut diagnostics = DiagnosticCollector::new();

        let sections = parse(&lines, "nav_msgs", &mut diagnostics);

        assert_eq!(sections[0].fields()[0].type_name(), "std_msgs/Header");
    }

    #[test]
    fn test_indented_declaration() {
        let fields = parse_fields("   int32 a   \n");
        assert_eq!(fields[0].name(), "a");
    }

    #[test]
    fn test_provenance() {
        let fields = parse_fields("# doc\n\nint32 a\n");

        assert_eq!(fields[0].line().offset(), 3);
        assert_eq!(fields[0].line().origin(), "test.msg");
        assert_eq!(fields[0].pre_comments()[0].offset(), 1);
        assert_eq!(fields[0].pre_comments()[1].offset(), 2);
    }

    #[test]
    fn test_parse_field_single_line() {
        let line = Line::new("uint8[3] rgb = 7", "x".into(), 1);
        let field = parse_field(&line, "pkg").unwrap();

        assert_eq!(field.type_name(), "uint8");
        assert_eq!(field.array_size(), "[3]");
        assert_eq!(field.value(), "7");

        let comment = Line::new("# comment", "x".into(), 2);
        assert!(parse_field(&comment, "pkg").is_none());
    }
}

mod comment_tests {
    use super::*;

    #[test]
    fn test_comment_association() {
        let source = "\
# leading comment
int32 a  # inline
# trailing for a, leading for b
string b
";
        let fields = parse_fields(source);

        assert_eq!(fields.len(), 2);

        let a = &fields[0];
        assert_eq!(a.type_name(), "int32");
        assert_eq!(trimmed(a.pre_comments()), vec!["leading comment"]);
        assert_eq!(a.comment().text(), "inline");
        assert_eq!(trimmed(a.post_comments()), vec!["trailing for a, leading for b"]);

        let b = &fields[1];
        assert_eq!(b.type_name(), "string");
        assert_eq!(trimmed(b.pre_comments()), vec!["trailing for a, leading for b"]);
        assert!(b.post_comments().is_empty());
    }

    #[test]
    fn test_leading_comment_keeps_text_after_marker() {
        let fields = parse_fields("# Position in free space\nfloat64 x  # metres\nfloat64 y\n");

        assert_eq!(texts(fields[0].pre_comments()), vec![" Position in free space"]);
        assert_eq!(fields[0].comment().text(), "metres");
        assert!(fields[1].pre_comments().is_empty());
    }

    #[test]
    fn test_blank_lines_are_kept_as_empty_comments() {
        let fields = parse_fields("# one\n\n# two\nint32 a\n\n");

        assert_eq!(texts(fields[0].pre_comments()), vec![" one", "", " two"]);
        assert_eq!(texts(fields[0].post_comments()), vec![""]);
    }

    #[test]
    fn test_comment_marker_only_first_hash_removed() {
        let fields = parse_fields("## heading\nint32 a\n");

        assert_eq!(texts(fields[0].pre_comments()), vec!["# heading"]);
    }

    #[test]
    fn test_trailing_comments_run_to_end() {
        let fields = parse_fields("int32 a\n# below a\n# still below a\n");

        assert_eq!(
            trimmed(fields[0].post_comments()),
            vec!["below a", "still below a"]
        );
    }
}

mod section_tests {
    use super::*;

    #[test]
    fn test_two_sections() {
        let (sections, diagnostics) = parse_source("int32 a\n---\nint32 b\n");

        assert!(diagnostics.is_empty());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].len(), 1);
        assert_eq!(sections[1].len(), 1);
        assert_eq!(sections[1].fields()[0].name(), "b");
    }

    #[test]
    fn test_three_sections_with_empty() {
        let (sections, _) = parse_source("int32 goal\n---\n---\nfloat32 progress\n");

        assert_eq!(sections.len(), 3);
        assert!(sections[1].is_empty());
        assert_eq!(sections[2].fields()[0].name(), "progress");
    }

    #[test]
    fn test_empty_input_has_one_empty_section() {
        let (sections, _) = parse_source("");

        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_empty());
    }

    #[test]
    fn test_separator_resets_leading_comments() {
        let (sections, _) = parse_source("# request doc\n---\n# response doc\nint32 b\n");

        let b = &sections[1].fields()[0];
        assert_eq!(trimmed(b.pre_comments()), vec!["response doc"]);
    }

    #[test]
    fn test_separator_ends_trailing_comments() {
        let (sections, _) = parse_source("int32 a\n# after a\n---\n# before b\nint32 b\n");

        let a = &sections[0].fields()[0];
        assert_eq!(trimmed(a.post_comments()), vec!["after a"]);
    }

    #[test]
    fn test_indented_separator() {
        let (sections, _) = parse_source("int32 a\n  ---  \nint32 b\n");
        assert_eq!(sections.len(), 2);
    }
}

mod diagnostic_tests {
    use super::*;

    #[test]
    fn test_unparsable_line_is_reported_and_skipped() {
        let (sections, diagnostics) = parse_source("int32 a\nthis is not valid\nint32 b\n");

        assert_eq!(sections[0].len(), 2);
        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 1);

        let diag = &diagnostics[0];
        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        let location = diag.primary_location().unwrap();
        assert_eq!(location.origin(), "test.msg");
        assert_eq!(location.offset(), 2);
    }

    #[test]
    fn test_unparsable_line_does_not_consume_comments() {
        let (sections, diagnostics) = parse_source("# doc for b\n???\nint32 b\n");

        assert_eq!(diagnostics.diagnostics().len(), 1);
        let b = &sections[0].fields()[0];
        assert_eq!(trimmed(b.pre_comments()), vec!["doc for b"]);
    }

    #[test]
    fn test_every_bad_line_reported() {
        let (_, diagnostics) = parse_source("int32\n= 3\nint32 a b\n");
        assert_eq!(diagnostics.diagnostics().len(), 3);
    }
}

fn declaration_strategy() -> impl Strategy<Value = (String, String, String, String)> {
    let type_name = prop_oneof![
        Just("int32".to_string()),
        Just("float64".to_string()),
        Just("uint8".to_string()),
        "[A-Z][a-zA-Z0-9]{0,6}",
        "[a-z_]{1,6}/[A-Z][a-zA-Z]{0,6}",
    ];
    let array_size = prop_oneof![
        Just(String::new()),
        Just("[]".to_string()),
        (1u32..64).prop_map(|n| format!("[{n}]")),
    ];
    let name = "[a-zA-Z_][a-zA-Z0-9_]{0,8}";
    let value = prop_oneof![
        Just(String::new()),
        (-1000i32..1000).prop_map(|n| n.to_string()),
        "[a-z]{1,5}\\.[0-9]{1,3}",
    ];
    (type_name, array_size, name, value)
}

proptest! {
    #[test]
    fn prop_declaration_roundtrip((type_name, array_size, name, value) in declaration_strategy()) {
        let source = if value.is_empty() {
            format!("{type_name}{array_size} {name}")
        } else {
            format!("{type_name}{array_size} {name} = {value}")
        };
        let line = Line::new(source, "prop.msg".into(), 1);
        let field = parse_field(&line, "prop_msgs").unwrap();

        let expected_type = msgdoc_core::field::normalize_type(&type_name, "prop_msgs");
        prop_assert_eq!(field.type_name(), expected_type.as_str());
        prop_assert_eq!(field.array_size(), array_size.as_str());
        prop_assert_eq!(field.name(), name.as_str());
        prop_assert_eq!(field.value(), value.as_str());

        // re-synthesizing the declaration yields an equivalent field
        let declared = format!("{}{} {}", field.type_name(), field.array_size(), field.name());
        let resynthesized = if field.is_constant() {
            format!("{declared} = {}", field.value())
        } else {
            declared
        };
        let again = parse_field(&Line::new(resynthesized, "prop.msg".into(), 1), "prop_msgs").unwrap();
        prop_assert_eq!(again.type_name(), field.type_name());
        prop_assert_eq!(again.array_size(), field.array_size());
        prop_assert_eq!(again.name(), field.name());
        prop_assert_eq!(again.value(), field.value());
    }

    #[test]
    fn prop_string_constant_keeps_hash(prefix in "[a-z ]{1,6}", suffix in "[a-z #]{0,6}") {
        prop_assume!(!prefix.trim().is_empty());
        let line = Line::new(format!("string S = {prefix}#{suffix}"), "prop.msg".into(), 1);
        let field = parse_field(&line, "prop_msgs").unwrap();

        let expected = format!("{prefix}#{suffix}");
        prop_assert_eq!(field.value(), expected.trim());
        prop_assert!(field.value().contains('#'));
    }
}
