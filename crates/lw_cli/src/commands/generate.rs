//! Generate command - Render Terraform for a request file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::output::{write_main_tf, WriteOutcome};

#[derive(Args)]
pub struct GenerateArgs {
    /// Request file describing the integration (.yaml, .yml or .json)
    #[arg(short, long)]
    config: PathBuf,

    /// Directory to write main.tf into; prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing main.tf that has different content
    #[arg(short, long)]
    force: bool,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let request = super::load_request(&args.config)?;
    let provider = request.provider();

    let hcl = request
        .generate()
        .with_context(|| format!("Failed to generate Terraform for {}", provider))?;

    let Some(dir) = args.output else {
        print!("{}", hcl);
        return Ok(());
    };

    match write_main_tf(&dir, &hcl, args.force)? {
        WriteOutcome::Written(path) => info!("Wrote {} configuration to {}", provider, path.display()),
        WriteOutcome::Unchanged(path) => info!("{} is up to date", path.display()),
    }

    Ok(())
}
