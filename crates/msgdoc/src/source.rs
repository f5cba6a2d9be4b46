//! Schema sources.
//!
//! A [`SchemaSource`] supplies the lines of one schema together with the
//! package that qualifies its bare type names. Two sources are provided:
//!
//! - [`PackageFile`] - a `package/Type` reference resolved through package discovery.
//! - [`Inline`] - text handed over directly, e.g. a file given on the command line.
//!
//! Any closure with the signature of [`SchemaSource::load`] is a source too.

use std::{fs, path::PathBuf, sync::Arc};

use log::{debug, info};

use msgdoc_core::{
    field::PACKAGE_SEPARATOR,
    group::TypeKind,
    line::{Line, lines_from_str},
};
use msgdoc_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode, Location};

use crate::{
    error::MsgDocError,
    package::{Package, PackageCache, find_packages},
};

/// The lines of a schema, ready to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSchema {
    package: String,
    origin: Arc<str>,
    lines: Vec<Line>,
}

impl LoadedSchema {
    /// Split `content` into lines attributed to `origin`.
    pub fn new(package: impl Into<String>, origin: impl Into<Arc<str>>, content: &str) -> Self {
        let origin = origin.into();
        Self {
            package: package.into(),
            lines: lines_from_str(Arc::clone(&origin), content),
            origin,
        }
    }

    /// Returns the package qualifying bare type names.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the origin the lines were read from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the shared origin handle.
    pub fn origin_handle(&self) -> &Arc<str> {
        &self.origin
    }

    /// Returns the lines of the schema.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

/// Supplies schema lines to the documentation pipeline.
///
/// Returning `None` skips the type. Implementations report why through
/// `diagnostics`.
pub trait SchemaSource {
    /// Load the schema of the given kind.
    fn load(
        &self,
        kind: TypeKind,
        packages: &mut PackageCache,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<LoadedSchema>;
}

impl<F> SchemaSource for F
where
    F: Fn(TypeKind, &mut PackageCache, &mut DiagnosticCollector) -> Option<LoadedSchema>,
{
    fn load(
        &self,
        kind: TypeKind,
        packages: &mut PackageCache,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<LoadedSchema> {
        self(kind, packages, diagnostics)
    }
}

/// A schema file inside a discovered package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    package: String,
    type_name: String,
    base: Option<PathBuf>,
    requested_at: Option<Location>,
}

impl PackageFile {
    /// Create a source for `type_name` in `package`.
    pub fn new(package: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
            base: None,
            requested_at: None,
        }
    }

    /// Parse a `package/Type` reference.
    ///
    /// # Errors
    ///
    /// Returns [`MsgDocError::InvalidReference`] when either part is
    /// missing.
    ///
    /// # Example
    ///
    /// ```
    /// # use msgdoc::source::PackageFile;
    /// let source = PackageFile::parse("geometry_msgs/Pose").unwrap();
    /// assert_eq!(source.package(), "geometry_msgs");
    /// assert_eq!(source.type_name(), "Pose");
    /// assert!(PackageFile::parse("Pose").is_err());
    /// ```
    pub fn parse(reference: &str) -> Result<Self, MsgDocError> {
        match reference.trim().split_once(PACKAGE_SEPARATOR) {
            Some((package, type_name)) if !package.is_empty() && !type_name.is_empty() => {
                Ok(Self::new(package, type_name))
            }
            _ => Err(MsgDocError::InvalidReference(reference.to_string())),
        }
    }

    /// Search only `base` for the package, bypassing the cache.
    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Attach the location that requested this type to its diagnostics.
    pub fn with_requested_at(mut self, location: Location) -> Self {
        self.requested_at = Some(location);
        self
    }

    /// Returns the package name.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the type name without package.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    fn find_package(&self, packages: &mut PackageCache) -> Option<Package> {
        match &self.base {
            Some(base) => {
                debug!(package = self.package, base:? = base; "Searching base path directly");
                find_packages(base).swap_remove(&self.package)
            }
            None => packages.find(&self.package).cloned(),
        }
    }

    fn diagnostic(&self, diagnostic: Diagnostic, label: &str) -> Diagnostic {
        match &self.requested_at {
            Some(location) => diagnostic.with_secondary_label(location.clone(), label),
            None => diagnostic,
        }
    }
}

impl SchemaSource for PackageFile {
    fn load(
        &self,
        kind: TypeKind,
        packages: &mut PackageCache,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<LoadedSchema> {
        let Some(package) = self.find_package(packages) else {
            diagnostics.emit(
                self.diagnostic(
                    Diagnostic::warning(format!("package `{}` not found", self.package)),
                    "requested here",
                )
                .with_code(ErrorCode::E200)
                .with_help("add the directory containing the package to the base paths"),
            );
            return None;
        };

        let path = package.schema_path(kind, &self.type_name);
        if !path.is_file() {
            diagnostics.emit(
                self.diagnostic(
                    Diagnostic::warning(format!(
                        "{kind} file for `{}/{}` not found at `{}`",
                        self.package,
                        self.type_name,
                        path.display()
                    )),
                    "requested here",
                )
                .with_code(ErrorCode::E201),
            );
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                info!(path:? = path; "Loaded schema file");
                Some(LoadedSchema::new(
                    package.name(),
                    path.display().to_string(),
                    &content,
                ))
            }
            Err(err) => {
                diagnostics.emit(
                    self.diagnostic(
                        Diagnostic::error(format!("cannot read `{}`: {err}", path.display())),
                        "requested here",
                    )
                    .with_code(ErrorCode::E202),
                );
                None
            }
        }
    }
}

/// Schema text supplied directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    package: String,
    origin: String,
    content: String,
}

impl Inline {
    /// Create a source from `content`, attributed to `origin` and
    /// qualified with `package`.
    pub fn new(
        package: impl Into<String>,
        origin: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            origin: origin.into(),
            content: content.into(),
        }
    }
}

impl SchemaSource for Inline {
    fn load(
        &self,
        _kind: TypeKind,
        _packages: &mut PackageCache,
        _diagnostics: &mut DiagnosticCollector,
    ) -> Option<LoadedSchema> {
        Some(LoadedSchema::new(
            self.package.as_str(),
            self.origin.as_str(),
            &self.content,
        ))
    }
}
