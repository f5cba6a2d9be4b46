//! Error and diagnostic system for the msgdoc parser.
//!
//! This module provides a diagnostic system with:
//! - Error codes for documentation and searchability
//! - Labeled source locations (origin and line number)
//! - Severity levels
//! - A collector used as the reporting channel through the pipeline
//!
//! Nothing in here aborts processing: an unparsable line or a missing
//! schema file is reported and the pipeline carries on.
//!
//! # Example
//!
//! ```
//! # use msgdoc_parser::error::{Diagnostic, ErrorCode, Location};
//! let diag = Diagnostic::warning("cannot parse line `int32[ x`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Location::new("Broken.msg", 4), "not a declaration")
//!     .with_help("declarations look like `TYPE NAME` or `TYPE NAME = VALUE`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, Location};
pub use severity::Severity;
