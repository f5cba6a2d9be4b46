//! CLI logic for the msgdoc documentation tool.
//!
//! This module contains the core CLI logic: it loads the configuration,
//! applies command-line overrides, documents one type and writes the
//! resulting lines.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write as _};

use log::{info, warn};

use msgdoc::{
    DocBuilder, MsgDocError,
    config::AppConfig,
    source::{Inline, PackageFile, SchemaSource},
};
use msgdoc_parser::error::Diagnostic;

/// Run the msgdoc CLI application
///
/// Documents the type named by `args` and writes the rendered lines to the
/// output file, or to standard output.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Returns
///
/// The diagnostics reported while documenting the type. A type that could
/// not be found is skipped and only reported there.
///
/// # Errors
///
/// Returns `MsgDocError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid rendering options
/// - A malformed `package/Type` reference
pub fn run(args: &Args) -> Result<Vec<Diagnostic>, MsgDocError> {
    let kind = args.type_kind();
    info!(
        type_ref = args.target.as_deref().unwrap_or_default(),
        kind:% = kind;
        "Documenting type"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    let source: Box<dyn SchemaSource> = match (&args.file, &args.target) {
        (Some(file), _) => {
            let content = fs::read_to_string(file)?;
            let package = args.package.clone().unwrap_or_default();
            Box::new(Inline::new(package, file.display().to_string(), content))
        }
        (None, Some(target)) => Box::new(PackageFile::parse(target)?),
        (None, None) => return Err(MsgDocError::InvalidReference(String::new())),
    };

    let mut builder = DocBuilder::new(app_config);
    let (doc, diagnostics) = builder.document(source.as_ref(), kind)?.into_parts();

    let Some(doc) = doc else {
        warn!(kind:% = kind; "Type skipped, nothing written");
        return Ok(diagnostics);
    };

    let text = doc.to_text();
    match &args.output {
        Some(output) => {
            fs::write(output, text)?;
            info!(output_file:? = output; "Documentation written");
        }
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
    }

    Ok(diagnostics)
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    config
        .packages_mut()
        .extend_base_paths(args.base_paths.iter().cloned());

    let mut render = config.render().clone();
    if let Some(field_comment) = &args.field_comment {
        render = render.with_field_comment(field_comment.as_str());
    }
    if let Some(description) = &args.description {
        render = render.with_description(description.as_str());
    }
    if args.raw.is_some() {
        render = render.with_raw(args.raw);
    }
    if args.no_link_values {
        render = render.with_link_values(false);
    }
    *config.render_mut() = render;
}
