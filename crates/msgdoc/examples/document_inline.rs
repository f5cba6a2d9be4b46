//! Example: Documenting a service definition held in memory
//!
//! This example demonstrates how to document a type without package
//! discovery by handing the schema text to the builder directly.

use msgdoc::{
    DocBuilder,
    config::{AppConfig, PackagesConfig, RenderConfig},
    group::TypeKind,
    source::Inline,
};

const ADD_TWO_INTS: &str = "\
# Adds two integers.
#
# The sum is returned in the response.

int64 a  # first operand
int64 b  # second operand
---
int64 sum  # a + b
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Documenting AddTwoInts.srv...\n");

    let render = RenderConfig::default()
        .with_field_comment("right1")
        .with_description("quote");
    let mut builder = DocBuilder::new(AppConfig::new(PackagesConfig::default(), render));

    let source = Inline::new("rospy_tutorials", "AddTwoInts.srv", ADD_TWO_INTS);
    let (doc, diagnostics) = builder.document(&source, TypeKind::Srv)?.into_parts();

    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    if let Some(doc) = doc {
        for line in doc.lines() {
            println!("{:>3} | {}", line.offset(), line.text());
        }
    }

    Ok(())
}
