//! Labeled source locations for diagnostic messages.
//!
//! A label associates a message with a line of an input origin, providing
//! context for where an error or warning occurred.

use std::{fmt, sync::Arc};

use msgdoc_core::line::Line;

/// A position in an input origin: the origin name and a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    origin: Arc<str>,
    offset: usize,
}

impl Location {
    /// Create a location.
    pub fn new(origin: impl Into<Arc<str>>, offset: usize) -> Self {
        Self {
            origin: origin.into(),
            offset,
        }
    }

    /// Returns the origin name.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the 1-based line number.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl From<&Line> for Location {
    fn from(line: &Line) -> Self {
        Self {
            origin: Arc::clone(line.origin_handle()),
            offset: line.offset(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.offset)
    }
}

/// A labeled location.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the main location of an error or warning.
/// - **Secondary labels** provide additional context.
///
/// # Example
///
/// ```text
/// warning[E100]: cannot parse line `int32[ broken`
///   --> msg/Broken.msg:4
///    |
///  4 | int32[ broken
///    | ^^^^^^^^^^^^^ not a declaration
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    location: Location,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the location this label applies to.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
