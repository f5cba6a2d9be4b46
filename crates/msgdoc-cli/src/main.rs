//! msgdoc CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use miette::Diagnostic as _;

use msgdoc_cli::{
    Args,
    error_adapter::{Reportable, diagnostics_to_reportables, to_reportables},
};

fn render(reportable: &Reportable<'_>) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting msgdoc");
    debug!(args:?; "Parsed arguments");

    match msgdoc_cli::run(&args) {
        Ok(diagnostics) => {
            for reportable in diagnostics_to_reportables(&diagnostics) {
                if reportable.severity() == Some(miette::Severity::Error) {
                    error!("{}", render(&reportable));
                } else {
                    warn!("{}", render(&reportable));
                }
            }
        }
        Err(err) => {
            for reportable in to_reportables(&err) {
                error!("{}", render(&reportable));
            }
            process::exit(1);
        }
    }

    info!("Completed successfully");
}
