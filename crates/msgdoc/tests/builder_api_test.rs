//! Integration tests for the DocBuilder API
//!
//! These tests build small package trees on disk and document the types in
//! them end to end.

use std::{fs, path::Path};

use tempfile::TempDir;

use msgdoc::{
    DocBuilder, MsgDocError, TypeDoc,
    config::{AppConfig, PackagesConfig, RenderConfig, RenderOptions},
    group::TypeKind,
    options::RawAppend,
    render::FragmentKind,
    source::{Inline, PackageFile},
};
use msgdoc_parser::error::ErrorCode;

const POSE: &str = "\
# A pose in free space.
#
# Composed of a position and an orientation.

geometry_msgs/Point position    # where
geometry_msgs/Quaternion orientation
";

const TRIGGER: &str = "\
---
bool success   # whether it worked
string message # informational
";

const FIBONACCI: &str = "\
# goal
int32 order
---
# result
int32[] sequence
---
# feedback
int32[] sequence
";

const LEVELS: &str = "\
uint8 LOW = 0    # low level
uint8 HIGH = 1   # high level
uint8 level      # current level
";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn write_package(base: &Path, name: &str, files: &[(&str, &str)]) {
    let root = base.join("src").join(name);
    write(
        &root.join("package.xml"),
        &format!("<?xml version=\"1.0\"?>\n<package format=\"2\">\n  <name>{name}</name>\n</package>\n"),
    );
    for (file, content) in files {
        write(&root.join(file), content);
    }
}

fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_package(tmp.path(), "geometry_msgs", &[("msg/Pose.msg", POSE)]);
    write_package(tmp.path(), "std_srvs", &[("srv/Trigger.srv", TRIGGER)]);
    write_package(
        tmp.path(),
        "actionlib_tutorials",
        &[("action/Fibonacci.action", FIBONACCI)],
    );
    write_package(tmp.path(), "demo_msgs", &[("msg/Levels.msg", LEVELS)]);
    tmp
}

fn builder(base: &Path, render: RenderConfig) -> DocBuilder {
    DocBuilder::new(AppConfig::new(
        PackagesConfig::new(vec![base.to_path_buf()]),
        render,
    ))
}

fn document(builder: &mut DocBuilder, reference: &str, kind: TypeKind) -> TypeDoc {
    let source = PackageFile::parse(reference).unwrap();
    let report = builder.document(&source, kind).unwrap();
    assert!(
        report.diagnostics().is_empty(),
        "Unexpected diagnostics: {:?}",
        report.diagnostics()
    );
    report.doc().cloned().expect("Type was skipped")
}

fn text_lines(doc: &TypeDoc) -> Vec<String> {
    doc.lines()
        .iter()
        .map(|line| line.text().to_string())
        .collect()
}

#[test]
fn test_message_from_package() {
    let tmp = workspace();
    let mut builder = builder(
        tmp.path(),
        RenderConfig::default()
            .with_field_comment("right1")
            .with_description("quote"),
    );

    let doc = document(&mut builder, "geometry_msgs/Pose", TypeKind::Msg);

    assert_eq!(doc.package(), "geometry_msgs");
    assert_eq!(
        text_lines(&doc),
        vec![
            "",
            ":field position: where",
            ":field-type position: geometry_msgs/Point",
            ":field orientation:",
            ":field-type orientation: geometry_msgs/Quaternion",
            "",
            "| A pose in free space.",
            "| ",
            "| Composed of a position and an orientation.",
        ]
    );
}

#[test]
fn test_service_sections() {
    let tmp = workspace();
    let mut builder = builder(tmp.path(), RenderConfig::default().with_field_comment("right1"));

    let doc = document(&mut builder, "std_srvs/Trigger", TypeKind::Srv);

    assert_eq!(doc.sections().len(), 2);
    assert!(doc.sections()[0].fragments().is_empty());
    assert_eq!(
        text_lines(&doc),
        vec![
            "",
            ":res-field success: whether it worked",
            ":res-field-type success: bool",
            ":res-field message: informational",
            ":res-field-type message: string",
        ]
    );
}

#[test]
fn test_action_sections() {
    let tmp = workspace();
    let mut builder = builder(tmp.path(), RenderConfig::default().with_field_comment("up"));

    let doc = document(&mut builder, "actionlib_tutorials/Fibonacci", TypeKind::Action);

    let roles: Vec<_> = doc
        .sections()
        .iter()
        .map(|section| section.fragments()[0].tag())
        .collect();
    assert_eq!(roles, vec!["goal-field", "result-field", "feedback-field"]);
    assert_eq!(doc.sections()[1].fragments()[0].text(), "result");
    assert_eq!(doc.sections()[2].fragments()[0].name(), "sequence[]");
}

#[test]
fn test_constants_are_linked() {
    let tmp = workspace();
    let mut builder = builder(tmp.path(), RenderConfig::default().with_field_comment("right1"));

    let doc = document(&mut builder, "demo_msgs/Levels", TypeKind::Msg);
    let fragments = doc.sections()[0].fragments();

    assert!(
        fragments
            .iter()
            .all(|fragment| fragment.kind() != FragmentKind::Value)
    );
    assert_eq!(fragments[0].linked_value(), Some("0"));
    assert!(text_lines(&doc).contains(&":constant HIGH: high level (``1``)".to_string()));
}

#[test]
fn test_constants_unlinked() {
    let tmp = workspace();
    let mut builder = builder(
        tmp.path(),
        RenderConfig::default()
            .with_field_comment("right1")
            .with_link_values(false),
    );

    let doc = document(&mut builder, "demo_msgs/Levels", TypeKind::Msg);

    assert!(text_lines(&doc).contains(&":constant-value LOW: 0".to_string()));
}

#[test]
fn test_raw_placement() {
    let tmp = workspace();
    let mut builder = builder(
        tmp.path(),
        RenderConfig::default().with_raw(Some(RawAppend::Head)),
    );

    let doc = document(&mut builder, "std_srvs/Trigger", TypeKind::Srv);
    let lines = text_lines(&doc);

    assert_eq!(lines[1], ".. code-block:: rostype");
    assert_eq!(lines[3], "    ---");
    assert!(lines.last().unwrap().starts_with(":res-field-type message"));
    assert_eq!(doc.lines()[4].offset(), 2);
}

#[test]
fn test_missing_package_and_file_are_skipped() {
    let tmp = workspace();
    let mut builder = DocBuilder::new(AppConfig::new(
        PackagesConfig::new(vec![tmp.path().to_path_buf()]),
        RenderConfig::default(),
    ));

    let report = builder
        .document(&PackageFile::new("nope_msgs", "Pose"), TypeKind::Msg)
        .unwrap();
    assert!(report.doc().is_none());
    assert_eq!(report.diagnostics()[0].code(), Some(ErrorCode::E200));

    let report = builder
        .document(&PackageFile::new("geometry_msgs", "Twist"), TypeKind::Msg)
        .unwrap();
    assert!(report.doc().is_none());
    assert_eq!(report.diagnostics()[0].code(), Some(ErrorCode::E201));
}

#[test]
fn test_cache_invalidation_picks_up_new_packages() {
    let tmp = workspace();
    let mut builder = builder(tmp.path(), RenderConfig::default());
    let source = PackageFile::new("late_msgs", "Late");

    let report = builder.document(&source, TypeKind::Msg).unwrap();
    assert!(report.doc().is_none());

    write_package(tmp.path(), "late_msgs", &[("msg/Late.msg", "int32 a\n")]);
    assert!(builder.document(&source, TypeKind::Msg).unwrap().doc().is_none());

    builder.invalidate_packages();
    assert!(builder.document(&source, TypeKind::Msg).unwrap().doc().is_some());
}

#[test]
fn test_unparsable_lines_are_reported() {
    let mut builder = DocBuilder::default();
    let source = Inline::new("demo_msgs", "Broken.msg", "int32 a\nnot a field line\nint32 b\n");

    let (doc, diagnostics) = builder
        .document(&source, TypeKind::Msg)
        .unwrap()
        .into_parts();

    assert_eq!(doc.unwrap().sections()[0].fragments().len(), 4);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), Some(ErrorCode::E100));
    assert_eq!(diagnostics[0].primary_location().unwrap().offset(), 2);
}

#[test]
fn test_invalid_description_option_is_fatal() {
    let mut builder = DocBuilder::new(AppConfig::new(
        PackagesConfig::default(),
        RenderConfig::default().with_description("0:1, sideways"),
    ));
    let source = Inline::new("demo_msgs", "A.msg", "int32 a\n");

    let result = builder.document(&source, TypeKind::Msg);

    assert!(matches!(result, Err(MsgDocError::Config(_))));
}

#[test]
fn test_document_with_explicit_options() {
    let mut builder = DocBuilder::default();
    let render = RenderConfig::default().with_field_comment("up");
    let options = RenderOptions::from_config(&render).unwrap();
    let source = Inline::new("demo_msgs", "A.msg", "# the answer\nint32 a\n");

    let report = builder.document_with(&source, TypeKind::Msg, &options);

    let doc = report.doc().unwrap();
    assert_eq!(doc.sections()[0].fragments()[0].text(), "the answer");
    assert_eq!(doc.sections()[0].fragments()[0].source().offset(), 1);
}
