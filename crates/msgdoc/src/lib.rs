//! msgdoc - documentation fragments from robot interface definition files.
//!
//! Reads message (`.msg`), service (`.srv`) and action (`.action`) schema
//! files, attaches their comments to the declared fields and renders
//! field-list documentation fragments with source provenance.

pub mod config;
pub mod doc;
pub mod package;
pub mod render;
pub mod resolve;
pub mod source;

mod error;

pub use msgdoc_core::{blocks, field, group, line, options};

pub use doc::TypeDoc;
pub use error::MsgDocError;

use log::{debug, info, trace};

use msgdoc_core::group::TypeKind;
use msgdoc_parser::error::{Diagnostic, DiagnosticCollector};

use config::{AppConfig, RenderOptions};
use package::PackageCache;
use source::SchemaSource;

/// The outcome of documenting one type.
///
/// A type that could not be loaded has no [`TypeDoc`]; the diagnostics
/// explain why.
#[derive(Debug, Clone)]
pub struct DocReport {
    doc: Option<TypeDoc>,
    diagnostics: Vec<Diagnostic>,
}

impl DocReport {
    /// Returns the documentation, or `None` if the type was skipped.
    pub fn doc(&self) -> Option<&TypeDoc> {
        self.doc.as_ref()
    }

    /// Returns the diagnostics reported while documenting the type.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Split the report into its documentation and diagnostics.
    pub fn into_parts(self) -> (Option<TypeDoc>, Vec<Diagnostic>) {
        (self.doc, self.diagnostics)
    }
}

/// Builder producing documentation for interface types.
///
/// The builder owns the [`PackageCache`], so packages are discovered once
/// and reused across requests.
///
/// # Examples
///
/// ```rust
/// use msgdoc::{DocBuilder, config::AppConfig, group::TypeKind, source::Inline};
///
/// let source = Inline::new(
///     "geometry_msgs",
///     "Point.msg",
///     "# A point in free space\nfloat64 x  # metres\n",
/// );
///
/// let mut builder = DocBuilder::new(AppConfig::default());
/// let report = builder
///     .document(&source, TypeKind::Msg)
///     .expect("Failed to document");
///
/// let doc = report.doc().expect("Type was skipped");
/// assert!(doc.to_text().contains(":field-type x: float64"));
/// ```
#[derive(Debug)]
pub struct DocBuilder {
    config: AppConfig,
    packages: PackageCache,
}

impl Default for DocBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DocBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Package search paths and rendering options
    pub fn new(config: AppConfig) -> Self {
        let packages = PackageCache::new(config.packages().base_paths());
        Self { config, packages }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the package cache.
    pub fn packages(&self) -> &PackageCache {
        &self.packages
    }

    /// Forget discovered packages so the next lookup searches again.
    pub fn invalidate_packages(&mut self) {
        self.packages.invalidate();
    }

    /// Document a type using the configured rendering options.
    ///
    /// # Errors
    ///
    /// Returns [`MsgDocError::Config`] if the configured option strings are
    /// invalid. Problems with the schema itself are reported as
    /// diagnostics on the returned [`DocReport`].
    pub fn document(
        &mut self,
        source: &dyn SchemaSource,
        kind: TypeKind,
    ) -> Result<DocReport, MsgDocError> {
        let options = RenderOptions::from_config(self.config.render())?;
        Ok(self.document_with(source, kind, &options))
    }

    /// Document a type with explicit rendering options.
    pub fn document_with(
        &mut self,
        source: &dyn SchemaSource,
        kind: TypeKind,
        options: &RenderOptions,
    ) -> DocReport {
        info!(kind:% = kind; "Documenting type");
        let mut diagnostics = DiagnosticCollector::new();

        let Some(schema) = source.load(kind, &mut self.packages, &mut diagnostics) else {
            info!(kind:% = kind; "Type skipped");
            return DocReport {
                doc: None,
                diagnostics: diagnostics.finish(),
            };
        };

        let sections = msgdoc_parser::parse(schema.lines(), schema.package(), &mut diagnostics);

        let mut rendered = render::render_sections(&sections, kind, options.policy());
        if options.link_values() {
            for section in &mut rendered {
                section.link_values();
            }
        }
        let description = doc::type_description(&sections, options.description());
        debug!(
            origin = schema.origin(),
            sections = rendered.len(),
            description_lines = description.len();
            "Rendered type"
        );

        let doc = TypeDoc::new(kind, &schema, rendered, description, options.raw());
        trace!(doc:?; "Type documentation");

        DocReport {
            doc: Some(doc),
            diagnostics: diagnostics.finish(),
        }
    }
}
