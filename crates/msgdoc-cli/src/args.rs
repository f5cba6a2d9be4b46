//! Command-line argument definitions for the msgdoc CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the type to document, override the
//! rendering configuration, and control output and logging.

use std::path::{Path, PathBuf};

use clap::Parser;

use msgdoc::{group::TypeKind, options::RawAppend};

/// Command-line arguments for the msgdoc documentation tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Type to document, as `package/Type`
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub target: Option<String>,

    /// Schema kind (msg, srv, action); inferred from --file when omitted
    #[arg(short, long)]
    pub kind: Option<TypeKind>,

    /// Document this schema file instead of looking up a package
    #[arg(short, long, requires = "package")]
    pub file: Option<PathBuf>,

    /// Package qualifying bare type names in --file
    #[arg(short, long)]
    pub package: Option<String>,

    /// Directory searched for packages (repeatable)
    #[arg(short, long = "base-path")]
    pub base_paths: Vec<PathBuf>,

    /// Field comment placement tokens, e.g. "up right1 quote"
    #[arg(long)]
    pub field_comment: Option<String>,

    /// Type description selection, e.g. "0:-1, quote"
    #[arg(long)]
    pub description: Option<String>,

    /// Append the raw schema text at the head or tail
    #[arg(long)]
    pub raw: Option<RawAppend>,

    /// Keep constant values as separate entries
    #[arg(long)]
    pub no_link_values: bool,

    /// Output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns the schema kind to document.
    ///
    /// An explicit `--kind` wins, then the extension of `--file`, then
    /// [`TypeKind::Msg`].
    pub fn type_kind(&self) -> TypeKind {
        self.kind
            .or_else(|| self.file.as_deref().and_then(kind_from_extension))
            .unwrap_or_default()
    }
}

fn kind_from_extension(path: &Path) -> Option<TypeKind> {
    path.extension()?.to_str()?.parse().ok()
}
