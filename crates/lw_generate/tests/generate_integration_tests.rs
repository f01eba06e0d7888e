//! Integration tests for the provider generators.

use lw_generate::{
    AwsArgs, AzureArgs, CloudProvider, EksAuditArgs, GcpArgs, GenerateError, GenerateRequest, GkeAuditArgs,
    OciArgs, TerraformGenerator,
};
use pretty_assertions::assert_eq;

const GCP_AUDIT_LOG_FIXTURE: &str = r#"terraform {
  required_providers {
    lacework = {
      source  = "lacework/lacework"
      version = "~> 1.0"
    }
  }
}

provider "google" {
  project = "project-1"
}

module "gcp_project_audit_log" {
  source  = "lacework/audit-log/gcp"
  version = "~> 3.0"
}
"#;

fn sample_requests() -> Vec<GenerateRequest> {
    vec![
        AwsArgs::new(true, true)
            .with_aws_region("us-east-2")
            .with_lacework_profile("test-account")
            .into(),
        EksAuditArgs::new([("us-east-1", vec!["a"]), ("us-west-2", vec!["b", "c"])]).into(),
        AzureArgs::new(true, true, true).into(),
        GcpArgs::new(true, true)
            .with_audit_log_labels([("z", "1"), ("a", "2")])
            .into(),
        GkeAuditArgs::new("project-1").into(),
        OciArgs::new(true)
            .with_tenancy_ocid("ocid1.tenancy.oc1..a")
            .with_user_email("test@example.com")
            .into(),
    ]
}

#[test]
fn test_gcp_audit_log_fixture() {
    let hcl = GcpArgs::new(false, true)
        .with_project_id("project-1")
        .generate()
        .unwrap();

    assert_eq!(hcl, GCP_AUDIT_LOG_FIXTURE);
}

#[test]
fn test_every_provider_is_covered() {
    let providers: Vec<CloudProvider> = sample_requests().iter().map(GenerateRequest::provider).collect();
    assert_eq!(providers, CloudProvider::all());
}

#[test]
fn test_documents_start_with_required_providers() {
    for request in sample_requests() {
        let hcl = request.generate().unwrap();
        assert!(
            hcl.starts_with("terraform {\n  required_providers {\n    lacework = {\n"),
            "{} output did not start with required providers",
            request.provider()
        );
        assert!(hcl.ends_with("}\n"));
        assert!(!hcl.contains("\n\n\n"));
    }
}

#[test]
fn test_generated_documents_parse_as_hcl() {
    for request in sample_requests() {
        let hcl = request.generate().unwrap();
        let body = hcl::parse(&hcl)
            .unwrap_or_else(|err| panic!("{} output: {}\n{}", request.provider(), err, hcl));
        assert!(body.blocks().count() >= 2);
    }
}

#[test]
fn test_generation_is_deterministic() {
    for request in sample_requests() {
        assert_eq!(request.generate().unwrap(), request.generate().unwrap());
    }
}

#[test]
fn test_lacework_provider_follows_cloud_provider() {
    let hcl = sample_requests()[0].generate().unwrap();
    let aws = hcl.find("provider \"aws\"").unwrap();
    let lacework = hcl.find("provider \"lacework\"").unwrap();
    let module = hcl.find("module \"aws_config\"").unwrap();
    assert!(aws < lacework && lacework < module);
}

#[test]
fn test_organization_scope_requires_both_flag_and_id() {
    let missing_id: Vec<Box<dyn TerraformGenerator>> = vec![
        Box::new(AwsArgs::new(true, false).with_aws_region("us-east-2").with_organization_integration(true)),
        Box::new(GcpArgs::new(true, false).with_organization_integration(true)),
        Box::new(GkeAuditArgs::new("project-1").with_organization_integration(true)),
        Box::new(AzureArgs::new(true, false, true).with_management_group(true)),
    ];
    let missing_flag: Vec<Box<dyn TerraformGenerator>> = vec![
        Box::new(AwsArgs::new(true, false).with_aws_region("us-east-2").with_organization_id("o-1")),
        Box::new(GcpArgs::new(true, false).with_organization_id("1")),
        Box::new(GkeAuditArgs::new("project-1").with_organization_id("1")),
        Box::new(AzureArgs::new(true, false, true).with_management_group_id("mgmt")),
    ];

    for generator in missing_id.iter().chain(missing_flag.iter()) {
        let err = generator.generate().unwrap_err();
        assert!(
            matches!(err, GenerateError::InvalidInputs(_)),
            "{} accepted a partial organization scope",
            generator.provider()
        );
    }
}

#[test]
fn test_eks_fan_out_counts() {
    let multi = EksAuditArgs::new([("us-east-1", vec!["a"]), ("us-west-2", vec!["b"])])
        .generate()
        .unwrap();
    assert_eq!(multi.matches("provider \"aws\" {").count(), 2);
    assert_eq!(multi.matches("resource \"aws_cloudwatch_log_subscription_filter\"").count(), 2);
    assert_eq!(multi.matches("no_cw_subscription_filter = true").count(), 1);
    assert!(!multi.contains("cluster_names"));

    let single = EksAuditArgs::new([("us-east-1", vec!["a"])]).generate().unwrap();
    assert_eq!(single.matches("provider \"aws\" {").count(), 1);
    assert!(!single.contains("aws_cloudwatch_log_subscription_filter"));
    assert!(!single.contains("no_cw_subscription_filter"));
    assert!(single.contains("cluster_names = [\"a\"]"));
}

#[test]
fn test_request_round_trip_through_yaml() {
    let yaml = r#"
provider: gcp_gke_audit
project_id: project-1
organization_integration: true
organization_id: "123456789"
"#;
    let request = GenerateRequest::from_yaml_str(yaml).unwrap();
    let hcl = request.generate().unwrap();

    assert!(hcl.contains("module \"gcp_organization_level_gke_audit_log\" {"));
    assert!(hcl.contains("integration_type = \"ORGANIZATION\""));
}
