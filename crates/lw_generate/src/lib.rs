//! # lw_generate
//!
//! Terraform generation for Lacework cloud integrations.
//!
//! Each supported integration has an arguments struct built from a few
//! required flags plus `with_*` modifiers. Every arguments struct implements
//! [`TerraformGenerator`]: `validate` rejects contradictory options and
//! `generate` renders the HCL document.
//!
//! ```rust
//! use lw_generate::{GcpArgs, TerraformGenerator};
//!
//! let hcl = GcpArgs::new(false, true)
//!     .with_project_id("project-1")
//!     .generate()?;
//! assert!(hcl.contains("module \"gcp_project_audit_log\""));
//! # Ok::<(), lw_generate::GenerateError>(())
//! ```

pub mod aws;
pub mod aws_eks_audit;
pub mod azure;
pub mod error;
pub mod gcp;
pub mod gcp_gke_audit;
pub mod generator;
pub mod oci;
pub mod provider;
pub mod request;

pub use aws::{AwsArgs, ExistingIamRole, SubAccount};
pub use aws_eks_audit::{CrossAccountIamRole, EksAuditArgs};
pub use azure::{AdApplication, AzureArgs, StorageAccount};
pub use error::{GenerateError, GenerateResult};
pub use gcp::GcpArgs;
pub use gcp_gke_audit::GkeAuditArgs;
pub use generator::{lacework_provider, required_providers, ExistingResource, ServiceAccount, TerraformGenerator};
pub use oci::OciArgs;
pub use provider::CloudProvider;
pub use request::{GenerateRequest, RequestFormat};
