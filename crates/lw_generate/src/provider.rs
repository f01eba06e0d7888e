//! Supported integration generators.

use serde::{Deserialize, Serialize};

/// The cloud integrations Terraform can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudProvider {
    Aws,
    AwsEksAudit,
    Azure,
    Gcp,
    GcpGkeAudit,
    Oci,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::AwsEksAudit => "aws_eks_audit",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
            CloudProvider::GcpGkeAudit => "gcp_gke_audit",
            CloudProvider::Oci => "oci",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "aws" => Some(CloudProvider::Aws),
            "aws_eks_audit" | "eks" => Some(CloudProvider::AwsEksAudit),
            "azure" => Some(CloudProvider::Azure),
            "gcp" => Some(CloudProvider::Gcp),
            "gcp_gke_audit" | "gke" => Some(CloudProvider::GcpGkeAudit),
            "oci" => Some(CloudProvider::Oci),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            CloudProvider::Aws,
            CloudProvider::AwsEksAudit,
            CloudProvider::Azure,
            CloudProvider::Gcp,
            CloudProvider::GcpGkeAudit,
            CloudProvider::Oci,
        ]
    }

    /// Get the Terraform provider name.
    pub fn provider_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws | CloudProvider::AwsEksAudit => "aws",
            CloudProvider::Azure => "azurerm",
            CloudProvider::Gcp | CloudProvider::GcpGkeAudit => "google",
            CloudProvider::Oci => "oci",
        }
    }

    /// Short description of what gets generated.
    pub fn description(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS config, CloudTrail and agentless scanning",
            CloudProvider::AwsEksAudit => "Amazon EKS audit log",
            CloudProvider::Azure => "Azure config and activity log",
            CloudProvider::Gcp => "GCP config and audit log",
            CloudProvider::GcpGkeAudit => "Google GKE audit log",
            CloudProvider::Oci => "OCI config",
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
