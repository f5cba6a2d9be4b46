//! Error adapter for converting msgdoc errors and diagnostics to miette
//! reports.
//!
//! This module provides the bridge between the library's error types and
//! miette's rich diagnostic formatting used in the CLI.
//!
//! Diagnostics point at lines. When the origin of a diagnostic can be read,
//! each labelled line is shown as a source snippet.

use std::{fmt, fs};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use msgdoc::MsgDocError;
use msgdoc_parser::error::Diagnostic;

/// Adapter for a single msgdoc diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Origin name and text of the primary location, if available
    src: Option<(String, NamedSource<String>)>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter with the text of its primary origin.
    pub fn new(diag: &'a Diagnostic, src: Option<String>) -> Self {
        let src = diag.primary_location().zip(src).map(|(location, text)| {
            let origin = location.origin().to_string();
            (origin.clone(), NamedSource::new(origin, text))
        });
        Self { diag, src }
    }

    /// Create a new diagnostic adapter, reading its primary origin from disk.
    pub fn from_origin(diag: &'a Diagnostic) -> Self {
        let text = diag
            .primary_location()
            .and_then(|location| fs::read_to_string(location.origin()).ok());
        Self::new(diag, text)
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diag.primary_location() {
            Some(location) if self.src.is_none() => {
                write!(f, "{}: {}", location, self.diag.message())
            }
            _ => write!(f, "{}", self.diag.message()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        if self.diag.severity().is_error() {
            Some(miette::Severity::Error)
        } else {
            Some(miette::Severity::Warning)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src
            .as_ref()
            .map(|(_, src)| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (origin, src) = self.src.as_ref()?;
        let text = src.inner();

        let labels: Vec<LabeledSpan> = self
            .diag
            .labels()
            .iter()
            .filter(|label| label.location().origin() == origin)
            .filter_map(|label| {
                let span = line_span(text, label.location().offset())?;
                let message = Some(label.message().to_string());
                Some(if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                })
            })
            .collect();

        if labels.is_empty() {
            return None;
        }
        Some(Box::new(labels.into_iter()))
    }
}

/// Adapter for [`MsgDocError`].
///
/// Errors carry no source location and are rendered as plain messages.
pub struct ErrorAdapter<'a>(pub &'a MsgDocError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MsgDocError::Io(_) => "msgdoc::io",
            MsgDocError::Config(_) => "msgdoc::config",
            MsgDocError::InvalidReference(_) => "msgdoc::reference",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            MsgDocError::Config(_) => {
                "description entries are `start:end` slices or `quote`, separated by commas"
            }
            MsgDocError::InvalidReference(_) => "name the type as `package/Type`",
            MsgDocError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable problem that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or an error, providing a
/// uniform interface for rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Byte span of the 1-based line `offset` in `text`, without its line
/// terminator.
fn line_span(text: &str, offset: usize) -> Option<SourceSpan> {
    let index = offset.checked_sub(1)?;
    let mut start = 0;
    for line in text.split_inclusive('\n').take(index) {
        start += line.len();
    }
    let line = text.get(start..)?.split_inclusive('\n').next()?;
    let len = line.trim_end_matches(['\n', '\r']).len();
    Some(SourceSpan::new(start.into(), len))
}

/// Convert a [`MsgDocError`] into a reportable error.
pub fn to_reportables(err: &MsgDocError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Convert diagnostics into reportables, reading each origin from disk.
pub fn diagnostics_to_reportables(diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|diag| Reportable::Diagnostic(DiagnosticAdapter::from_origin(diag)))
        .collect()
}
