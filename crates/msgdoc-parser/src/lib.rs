//! # msgdoc Parser
//!
//! Parser for robot interface definition files (`.msg`, `.srv`, `.action`).
//! It turns a sequence of source [`Line`](msgdoc_core::line::Line)s into
//! [`Section`](msgdoc_core::field::Section)s of fields, each field carrying
//! the comment lines found before it, inline with it and after it.
//!
//! ## Usage
//!
//! ```
//! # use msgdoc_core::line::lines_from_str;
//! # use msgdoc_parser::{error::DiagnosticCollector, parse};
//! let source = "# Position in free space\nfloat64 x  # metres\nfloat64 y\n";
//! let lines = lines_from_str("Point.msg", source);
//! let mut diagnostics = DiagnosticCollector::new();
//!
//! let sections = parse(&lines, "geometry_msgs", &mut diagnostics);
//! let x = &sections[0].fields()[0];
//!
//! assert_eq!(x.comment().text(), "metres");
//! assert_eq!(x.pre_comments()[0].text(), " Position in free space");
//! ```

mod declaration;
pub mod error;
mod parser;
#[cfg(test)]
mod parser_tests;

pub use parser::{COMMENT_MARKER, SECTION_SEPARATOR, parse, parse_field};
