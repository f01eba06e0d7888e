//! CLI command definitions.
//!
//! Every command reads a request file naming one integration and its
//! options; see `lw_generate::GenerateRequest` for the format.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lw_generate::{GenerateRequest, RequestFormat};
use tracing::debug;

pub mod generate;
pub mod providers;
pub mod validate;

/// lwgen - Terraform generation for Lacework cloud integrations
#[derive(Parser)]
#[command(name = "lwgen")]
#[command(version, about = "lwgen - Terraform generation for Lacework cloud integrations")]
#[command(long_about = r#"
lwgen turns a small request file into the Terraform configuration that
integrates a cloud account with Lacework.

COMMANDS:
  generate   → Render main.tf for a request
  validate   → Check a request without rendering
  providers  → List supported integrations

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or request file
  3 - Validation failure
  4 - Generation error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Terraform for a request file
    Generate(generate::GenerateArgs),

    /// Validate a request file
    Validate(validate::ValidateArgs),

    /// List the supported integrations
    Providers,
}

/// Read and parse a request file, picking the format from its extension.
pub(crate) fn load_request(path: &Path) -> Result<GenerateRequest> {
    let format = RequestFormat::from_path(path)?;
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Request file not found or unreadable: {}", path.display()))?;

    debug!("Loaded request file {} as {:?}", path.display(), format);

    let request = GenerateRequest::parse(&contents, format)
        .with_context(|| format!("Failed to parse request file {}", path.display()))?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_generate::{CloudProvider, GenerateError};
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.yaml");
        fs::write(&path, "provider: oci\nenable_config: true\n").unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.provider(), CloudProvider::Oci);
    }

    #[test]
    fn test_load_json_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"provider": "gcp_gke_audit", "project_id": "p"}"#).unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.provider(), CloudProvider::GcpGkeAudit);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.toml");
        fs::write(&path, "provider = \"oci\"").unwrap();

        let err = load_request(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::Request(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_request(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
