//! Providers command - List supported integrations.

use anyhow::Result;
use lw_generate::CloudProvider;

pub fn execute() -> Result<()> {
    println!("{:<16} {:<10} DESCRIPTION", "PROVIDER", "TERRAFORM");
    for provider in CloudProvider::all() {
        println!(
            "{:<16} {:<10} {}",
            provider.as_str(),
            provider.provider_name(),
            provider.description()
        );
    }
    Ok(())
}
