//! Collector for accumulating diagnostics.
//!
//! The [`DiagnosticCollector`] is the reporting channel handed through the
//! pipeline: stages report problems and keep going instead of failing on the
//! first one.

use log::warn;

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics.
///
/// # Example
///
/// ```
/// # use msgdoc_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode, Location};
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::warning("cannot parse line `float64[`")
///         .with_code(ErrorCode::E100)
///         .with_label(Location::new("Pose.msg", 3), "not a declaration"),
/// );
///
/// assert!(!collector.has_errors());
/// assert_eq!(collector.finish().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is logged, added to the collection and, if it is an
    /// error, the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        match diagnostic.primary_location() {
            Some(location) => warn!(
                origin = location.origin(),
                offset = location.offset();
                "{diagnostic}"
            ),
            None => warn!("{diagnostic}"),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if an error diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns the diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
