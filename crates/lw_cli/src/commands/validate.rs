//! Validate command - Check a request file without rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct ValidateArgs {
    /// Request file describing the integration (.yaml, .yml or .json)
    #[arg(short, long)]
    config: PathBuf,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let request = super::load_request(&args.config)?;
    info!("Validating {} request {}", request.provider(), args.config.display());

    request
        .validate()
        .with_context(|| format!("Validation failed for {}", args.config.display()))?;

    println!("✅ {} request is valid", request.provider());
    Ok(())
}
