//! Command-line host for the Tailmark pipeline.
//!
//! The runtime splits the leading configuration flags from the command,
//! loads the layered configuration, installs telemetry, loads the configured
//! design system and runs one decoration or hover request against a file.
//! It writes only to the streams it is given, so tests can capture its
//! output.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tailmark_catalog::CatalogLoader;
use tailmark_config::Config;
use tailmark_scan::Pipeline;
use tracing::{debug, info};

mod cli;
mod config;
mod errors;
mod output;
pub mod telemetry;

use cli::{Cli, CliCommand};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;

const CLI_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::run");

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

fn run_with_loader<I, W, E, L>(args: I, stdout: &mut W, stderr: &mut E, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);
    let cli = match Cli::try_parse_from(&split.command_arguments) {
        Ok(cli) => cli,
        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            return report(stdout, &error, ExitCode::SUCCESS);
        }
        Err(error) => return report(stderr, &AppError::CliUsage(error), ExitCode::FAILURE),
    };

    let result = loader
        .load(&split.config_arguments)
        .and_then(|config| execute(&cli, &config, stdout));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(stderr, &error, ExitCode::FAILURE),
    }
}

fn report<W: Write>(out: &mut W, message: &dyn std::fmt::Display, code: ExitCode) -> ExitCode {
    if writeln!(out, "{message}").is_err() {
        return ExitCode::FAILURE;
    }
    code
}

fn execute<W: Write>(cli: &Cli, config: &Config, stdout: &mut W) -> Result<(), AppError> {
    telemetry::initialise(config)?;

    let file = cli.command.file();
    let text = fs::read_to_string(file).map_err(|source| AppError::ReadInput {
        path: file.clone(),
        source,
    })?;

    let mut pipeline = load_pipeline(config)?;
    let spans = pipeline.decorate(&text);
    debug!(target: CLI_TARGET, path = %file, spans = spans.len(), "file decorated");

    match &cli.command {
        CliCommand::Decorate { .. } => output::write_spans(stdout, &text, &spans),
        CliCommand::Hover { offset, .. } => {
            if !config.enable_hover {
                return Err(AppError::HoverDisabled);
            }
            let hover = pipeline.hover_at(&text, *offset);
            output::write_hover(stdout, hover.as_ref())
        }
    }
}

fn load_pipeline(config: &Config) -> Result<Pipeline, AppError> {
    let mut pipeline = Pipeline::new(Box::new(CatalogLoader), &config.pipeline_options())?;
    let settings = config
        .design_system_settings()
        .ok_or(AppError::MissingDesignSystem)?;
    pipeline.reload(&settings.source())?;
    info!(
        target: CLI_TARGET,
        path = %settings.path,
        version = %settings.version,
        "design system ready"
    );
    Ok(pipeline)
}

#[cfg(test)]
mod tests;
