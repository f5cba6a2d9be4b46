//! Severity levels for diagnostics.
//!
//! This module defines the severity of diagnostic messages, distinguishing
//! between issues that abort documenting a type and issues that are only
//! reported while processing continues.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] means an input exists but cannot be used
/// - [`Severity::Warning`] means an input is missing or part of it was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An input exists but cannot be used, e.g. an unreadable schema file.
    Error,

    /// An input is missing or part of it was skipped.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
