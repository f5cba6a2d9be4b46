//! Error codes for the msgdoc diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Declaration parsing
//! - `E2xx` - Schema lookup

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unparsable line.
    ///
    /// A line is neither a comment, a blank line, a section separator nor a
    /// valid declaration.
    E100,

    // =========================================================================
    // Lookup Errors (E2xx)
    // =========================================================================
    /// Package not found.
    ///
    /// No `package.xml` with the requested name exists under the base paths.
    E200,

    /// Schema file not found.
    ///
    /// The package exists but does not contain the requested definition file.
    E201,

    /// Schema file unreadable.
    ///
    /// The definition file exists but could not be read as UTF-8 text.
    E202,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unparsable line",
            ErrorCode::E200 => "package not found",
            ErrorCode::E201 => "schema file not found",
            ErrorCode::E202 => "schema file unreadable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
