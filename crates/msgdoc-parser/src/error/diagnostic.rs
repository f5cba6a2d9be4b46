//! The core diagnostic type for the msgdoc error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, labeled source locations, and help text.

use std::fmt;

use crate::error::{ErrorCode, Label, Location, Severity};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// warning[E201]: cannot find `Imu.msg` in package `sensor_msgs`
///   = help: check that the type name and interface kind are correct
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use msgdoc_parser::error::{Diagnostic, ErrorCode, Location};
    /// let diag = Diagnostic::error("cannot read `nav_msgs/msg/Odometry.msg`")
    ///     .with_code(ErrorCode::E202)
    ///     .with_secondary_label(Location::new("index.rst", 12), "requested here");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use msgdoc_parser::error::{Diagnostic, Location};
    /// let diag = Diagnostic::warning("cannot parse line")
    ///     .with_label(Location::new("Foo.msg", 3), "not a declaration");
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the location of the first primary label, if any.
    pub fn primary_location(&self) -> Option<&Location> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::location)
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(location, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(location, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[E100]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
