//! Error types for msgdoc operations.
//!
//! This module provides the main error type [`MsgDocError`]. Only problems
//! that abort a request are errors; recoverable problems are reported as
//! [`Diagnostic`](msgdoc_parser::error::Diagnostic)s next to the output.

use std::io;

use thiserror::Error;

use msgdoc_core::options::OptionError;

/// The main error type for msgdoc operations.
#[derive(Debug, Error)]
pub enum MsgDocError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] OptionError),

    #[error("Invalid type reference `{0}`, expected `package/Type`")]
    InvalidReference(String),
}
