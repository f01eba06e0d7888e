//! lwgen CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or request file
//! - 3: Validation failure
//! - 4: Generation error

use std::process::ExitCode;

use clap::Parser;
use lw_generate::GenerateError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const GENERATION_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Providers => commands::providers::execute(),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Logs go to stderr so generated HCL on stdout stays clean.
fn init_logging(verbose: bool, quiet: bool) {
    let default_directives = if verbose {
        "lw_cli=debug,lw_generate=debug,warn"
    } else if quiet {
        "warn"
    } else {
        "lw_cli=info,lw_generate=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let generate_error = e.chain().find_map(|cause| cause.downcast_ref::<GenerateError>());

    match generate_error {
        Some(GenerateError::InvalidInputs(_)) => ExitCodes::VALIDATION_FAILURE,
        Some(GenerateError::GenerationFailed(_)) => ExitCodes::GENERATION_ERROR,
        Some(GenerateError::Request(_) | GenerateError::Yaml(_) | GenerateError::Json(_)) => {
            ExitCodes::INVALID_ARGS
        }
        None => {
            let msg = e.to_string().to_lowercase();
            if msg.contains("already exists") || msg.contains("not found") {
                ExitCodes::INVALID_ARGS
            } else {
                ExitCodes::GENERAL_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use lw_generate::{GcpArgs, TerraformGenerator};

    #[test]
    fn test_categorize_invalid_inputs() {
        let err = GcpArgs::new(false, false)
            .generate()
            .context("Failed to generate Terraform")
            .unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);
    }

    #[test]
    fn test_categorize_request_errors() {
        let err = anyhow::Error::new(GenerateError::Request("bad file".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_other_errors() {
        assert_eq!(
            categorize_error(&anyhow::anyhow!("main.tf already exists")),
            ExitCodes::INVALID_ARGS
        );
        assert_eq!(categorize_error(&anyhow::anyhow!("disk full")), ExitCodes::GENERAL_ERROR);
    }
}
