//! Generation requests loaded from YAML or JSON documents.
//!
//! A request names the generator with a `provider` key and carries that
//! generator's arguments alongside it:
//!
//! ```yaml
//! provider: gcp
//! enable_audit_log: true
//! project_id: project-1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aws::AwsArgs;
use crate::aws_eks_audit::EksAuditArgs;
use crate::azure::AzureArgs;
use crate::error::{GenerateError, GenerateResult};
use crate::gcp::GcpArgs;
use crate::gcp_gke_audit::GkeAuditArgs;
use crate::generator::TerraformGenerator;
use crate::oci::OciArgs;
use crate::provider::CloudProvider;

/// Serialization format of a request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Yaml,
    Json,
}

impl RequestFormat {
    /// Pick the format from a file extension (`yaml`, `yml` or `json`).
    pub fn from_path(path: &Path) -> GenerateResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Ok(RequestFormat::Yaml),
            Some("json") => Ok(RequestFormat::Json),
            _ => Err(GenerateError::Request(format!(
                "unsupported request file {}, expected .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

/// One generator and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum GenerateRequest {
    Aws(AwsArgs),
    AwsEksAudit(EksAuditArgs),
    Azure(AzureArgs),
    Gcp(GcpArgs),
    GcpGkeAudit(GkeAuditArgs),
    Oci(OciArgs),
}

impl GenerateRequest {
    pub fn parse(contents: &str, format: RequestFormat) -> GenerateResult<Self> {
        match format {
            RequestFormat::Yaml => Self::from_yaml_str(contents),
            RequestFormat::Json => Self::from_json_str(contents),
        }
    }

    pub fn from_yaml_str(contents: &str) -> GenerateResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> GenerateResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn provider(&self) -> CloudProvider {
        self.as_generator().provider()
    }

    pub fn as_generator(&self) -> &dyn TerraformGenerator {
        match self {
            GenerateRequest::Aws(args) => args,
            GenerateRequest::AwsEksAudit(args) => args,
            GenerateRequest::Azure(args) => args,
            GenerateRequest::Gcp(args) => args,
            GenerateRequest::GcpGkeAudit(args) => args,
            GenerateRequest::Oci(args) => args,
        }
    }

    pub fn validate(&self) -> GenerateResult<()> {
        self.as_generator().validate()
    }

    pub fn generate(&self) -> GenerateResult<String> {
        self.as_generator().generate()
    }
}

impl From<AwsArgs> for GenerateRequest {
    fn from(args: AwsArgs) -> Self {
        GenerateRequest::Aws(args)
    }
}

impl From<EksAuditArgs> for GenerateRequest {
    fn from(args: EksAuditArgs) -> Self {
        GenerateRequest::AwsEksAudit(args)
    }
}

impl From<AzureArgs> for GenerateRequest {
    fn from(args: AzureArgs) -> Self {
        GenerateRequest::Azure(args)
    }
}

impl From<GcpArgs> for GenerateRequest {
    fn from(args: GcpArgs) -> Self {
        GenerateRequest::Gcp(args)
    }
}

impl From<GkeAuditArgs> for GenerateRequest {
    fn from(args: GkeAuditArgs) -> Self {
        GenerateRequest::GcpGkeAudit(args)
    }
}

impl From<OciArgs> for GenerateRequest {
    fn from(args: OciArgs) -> Self {
        GenerateRequest::Oci(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ExistingResource;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_yaml_request_uses_defaults() {
        let yaml = r#"
provider: gcp
enable_audit_log: true
project_id: project-1
"#;
        let request = GenerateRequest::from_yaml_str(yaml).unwrap();

        assert_eq!(request.provider(), CloudProvider::Gcp);
        assert_eq!(
            request,
            GenerateRequest::Gcp(GcpArgs::new(false, true).with_project_id("project-1"))
        );
    }

    #[test]
    fn test_json_request() {
        let json = r#"{
            "provider": "aws_eks_audit",
            "region_cluster_map": {"us-east-1": ["cluster1"]},
            "kms_key_rotation": false
        }"#;
        let request = GenerateRequest::from_json_str(json).unwrap();

        let expected = EksAuditArgs::new([("us-east-1", vec!["cluster1"])]).with_kms_key_rotation(false);
        assert_eq!(request, GenerateRequest::from(expected));
        assert!(request.generate().unwrap().contains("kms_key_rotation = false"));
    }

    #[test]
    fn test_nested_request_structs() {
        let yaml = r#"
provider: aws
enable_config: true
aws_region: us-east-2
aws_profile: default
sub_accounts:
  - profile: dev
    region: us-west-1
existing_iam_role:
  name: role
  arn: arn:aws:iam::123:role/role
  external_id: abc
"#;
        let request = GenerateRequest::from_yaml_str(yaml).unwrap();
        let GenerateRequest::Aws(args) = &request else {
            panic!("expected an AWS request");
        };
        assert_eq!(args.sub_accounts.len(), 1);
        assert!(args.existing_iam_role.as_ref().unwrap().is_complete());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_existing_groups() {
        let yaml = r#"
provider: gcp
enable_config: true
existing_service_account: {}
"#;
        let request = GenerateRequest::from_yaml_str(yaml).unwrap();
        assert!(request.generate().is_ok());

        let yaml = r#"
provider: aws
enable_config: true
aws_region: us-east-2
existing_iam_role: {}
"#;
        let request = GenerateRequest::from_yaml_str(yaml).unwrap();
        assert!(request.generate().is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        let err = GenerateRequest::from_yaml_str("provider: alibaba\n").unwrap_err();
        assert!(matches!(err, GenerateError::Yaml(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RequestFormat::from_path(&PathBuf::from("request.YML")).unwrap(),
            RequestFormat::Yaml
        );
        assert_eq!(
            RequestFormat::from_path(&PathBuf::from("request.json")).unwrap(),
            RequestFormat::Json
        );
        assert!(matches!(
            RequestFormat::from_path(&PathBuf::from("request.toml")),
            Err(GenerateError::Request(_))
        ));
    }

    #[test]
    fn test_validate_reports_invalid_inputs() {
        let request = GenerateRequest::from(GcpArgs::new(false, false));
        assert!(request.validate().unwrap_err().is_invalid_inputs());
    }
}
