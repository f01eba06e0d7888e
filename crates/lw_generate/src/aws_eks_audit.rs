//! Amazon EKS audit log integration.
//!
//! One region renders a single provider and hands the cluster names to the
//! module. More than one region fans out: an aliased provider per region,
//! module-internal subscription filters switched off, and one
//! `aws_cloudwatch_log_subscription_filter` resource per region.

use std::collections::BTreeMap;

use lw_hcl::{
    encode_inline, is_identifier, Attributes, Block, Document, HclResult, Module, Provider, RawExpr, Resource,
    Traversal, Value,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::generator::{
    lacework_provider, non_empty, provided, required_providers, ExistingResource, TerraformGenerator,
};
use crate::provider::CloudProvider;

pub const AWS_EKS_AUDIT_SOURCE: &str = "lacework/eks-audit-log/aws";
pub const AWS_EKS_AUDIT_VERSION: &str = "~> 1.0";

const EKS_AUDIT_MODULE: &str = "aws_eks_audit_log";
const SUBSCRIPTION_FILTER_RESOURCE: &str = "aws_cloudwatch_log_subscription_filter";
const KMS_KEY_DELETION_DAYS: std::ops::RangeInclusive<i64> = 7..=30;

/// A cross-account IAM role Lacework should assume instead of creating one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossAccountIamRole {
    pub arn: String,
    pub external_id: String,
}

impl CrossAccountIamRole {
    pub fn new(arn: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            external_id: external_id.into(),
        }
    }
}

impl ExistingResource for CrossAccountIamRole {
    fn is_complete(&self) -> bool {
        !self.arn.is_empty() && !self.external_id.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.arn.is_empty() && self.external_id.is_empty()
    }
}

/// Arguments for the EKS audit log generator.
///
/// Encryption of the bucket, Firehose stream and SNS topic is on by
/// default, as are KMS key rotation and multi-region keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EksAuditArgs {
    /// Cluster names per AWS region.
    pub region_cluster_map: BTreeMap<String, Vec<String>>,
    pub aws_profile: Option<String>,
    pub bucket_enable_mfa_delete: bool,
    pub bucket_force_destroy: bool,
    pub bucket_lifecycle_expiration_days: Option<i64>,
    pub bucket_encryption_enabled: bool,
    pub bucket_sse_algorithm: Option<String>,
    pub bucket_sse_key_arn: Option<String>,
    pub bucket_versioning: bool,
    pub existing_bucket_arn: Option<String>,
    pub existing_cross_account_iam_role: Option<CrossAccountIamRole>,
    pub filter_pattern: Option<String>,
    pub firehose_encryption_enabled: bool,
    pub firehose_encryption_key_arn: Option<String>,
    pub kms_key_deletion_days: Option<i64>,
    pub kms_key_multi_region: bool,
    pub kms_key_rotation: bool,
    pub sns_topic_encryption_enabled: bool,
    pub sns_topic_encryption_key_arn: Option<String>,
    pub integration_name: Option<String>,
    pub prefix: Option<String>,
    pub lacework_profile: Option<String>,
}

impl Default for EksAuditArgs {
    fn default() -> Self {
        Self {
            region_cluster_map: BTreeMap::new(),
            aws_profile: None,
            bucket_enable_mfa_delete: false,
            bucket_force_destroy: false,
            bucket_lifecycle_expiration_days: None,
            bucket_encryption_enabled: true,
            bucket_sse_algorithm: None,
            bucket_sse_key_arn: None,
            bucket_versioning: false,
            existing_bucket_arn: None,
            existing_cross_account_iam_role: None,
            filter_pattern: None,
            firehose_encryption_enabled: true,
            firehose_encryption_key_arn: None,
            kms_key_deletion_days: None,
            kms_key_multi_region: true,
            kms_key_rotation: true,
            sns_topic_encryption_enabled: true,
            sns_topic_encryption_key_arn: None,
            integration_name: None,
            prefix: None,
            lacework_profile: None,
        }
    }
}

impl EksAuditArgs {
    pub fn new<I, R, C, S>(region_cluster_map: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
        R: Into<String>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let region_cluster_map: BTreeMap<String, Vec<String>> = region_cluster_map
            .into_iter()
            .map(|(region, clusters)| (region.into(), clusters.into_iter().map(Into::into).collect()))
            .collect();

        Self {
            region_cluster_map,
            ..Default::default()
        }
    }

    pub fn with_aws_profile(mut self, profile: impl Into<String>) -> Self {
        self.aws_profile = Some(profile.into());
        self
    }

    pub fn with_bucket_enable_mfa_delete(mut self, enabled: bool) -> Self {
        self.bucket_enable_mfa_delete = enabled;
        self
    }

    pub fn with_bucket_force_destroy(mut self, enabled: bool) -> Self {
        self.bucket_force_destroy = enabled;
        self
    }

    pub fn with_bucket_lifecycle_expiration_days(mut self, days: i64) -> Self {
        self.bucket_lifecycle_expiration_days = Some(days);
        self
    }

    pub fn with_bucket_encryption_enabled(mut self, enabled: bool) -> Self {
        self.bucket_encryption_enabled = enabled;
        self
    }

    pub fn with_bucket_sse_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.bucket_sse_algorithm = Some(algorithm.into());
        self
    }

    pub fn with_bucket_sse_key_arn(mut self, arn: impl Into<String>) -> Self {
        self.bucket_sse_key_arn = Some(arn.into());
        self
    }

    pub fn with_bucket_versioning(mut self, enabled: bool) -> Self {
        self.bucket_versioning = enabled;
        self
    }

    pub fn with_existing_bucket_arn(mut self, arn: impl Into<String>) -> Self {
        self.existing_bucket_arn = Some(arn.into());
        self
    }

    pub fn with_existing_cross_account_iam_role(mut self, role: CrossAccountIamRole) -> Self {
        self.existing_cross_account_iam_role = Some(role);
        self
    }

    pub fn with_filter_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filter_pattern = Some(pattern.into());
        self
    }

    pub fn with_firehose_encryption_enabled(mut self, enabled: bool) -> Self {
        self.firehose_encryption_enabled = enabled;
        self
    }

    pub fn with_firehose_encryption_key_arn(mut self, arn: impl Into<String>) -> Self {
        self.firehose_encryption_key_arn = Some(arn.into());
        self
    }

    pub fn with_kms_key_deletion_days(mut self, days: i64) -> Self {
        self.kms_key_deletion_days = Some(days);
        self
    }

    pub fn with_kms_key_multi_region(mut self, enabled: bool) -> Self {
        self.kms_key_multi_region = enabled;
        self
    }

    pub fn with_kms_key_rotation(mut self, enabled: bool) -> Self {
        self.kms_key_rotation = enabled;
        self
    }

    pub fn with_sns_topic_encryption_enabled(mut self, enabled: bool) -> Self {
        self.sns_topic_encryption_enabled = enabled;
        self
    }

    pub fn with_sns_topic_encryption_key_arn(mut self, arn: impl Into<String>) -> Self {
        self.sns_topic_encryption_key_arn = Some(arn.into());
        self
    }

    pub fn with_integration_name(mut self, name: impl Into<String>) -> Self {
        self.integration_name = Some(name.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_lacework_profile(mut self, profile: impl Into<String>) -> Self {
        self.lacework_profile = Some(profile.into());
        self
    }

    /// Regions in render order.
    fn regions(&self) -> Vec<&str> {
        self.region_cluster_map.keys().map(String::as_str).collect()
    }

    fn has_bucket_options(&self) -> bool {
        self.bucket_enable_mfa_delete
            || self.bucket_force_destroy
            || self.bucket_lifecycle_expiration_days.is_some()
            || non_empty(self.bucket_sse_algorithm.as_deref()).is_some()
            || non_empty(self.bucket_sse_key_arn.as_deref()).is_some()
            || self.bucket_versioning
    }

    fn aws_providers(&self, regions: &[&str]) -> HclResult<Vec<Block>> {
        let multi_region = regions.len() > 1;
        regions
            .iter()
            .map(|region| {
                let mut attributes = Attributes::new();
                if multi_region {
                    attributes.insert("alias", *region);
                }
                attributes.insert_some("profile", non_empty(self.aws_profile.as_deref()));
                attributes.insert("region", *region);
                Provider::new("aws").with_attributes(attributes).to_block()
            })
            .collect()
    }

    fn module(&self, regions: &[&str]) -> Module {
        let mut attributes = Attributes::new();

        if let [region] = regions {
            if let Some(clusters) = self.region_cluster_map.get(*region) {
                attributes.insert("cluster_names", clusters.clone());
            }
        } else {
            attributes.insert("no_cw_subscription_filter", true);
        }

        if let Some(arn) = non_empty(self.existing_bucket_arn.as_deref()) {
            attributes.insert("use_existing_bucket", true);
            attributes.insert("bucket_arn", arn);
        }
        if self.bucket_enable_mfa_delete {
            attributes.insert("bucket_enable_mfa_delete", true);
        }
        if self.bucket_force_destroy {
            attributes.insert("bucket_force_destroy", true);
        }
        attributes.insert_some("bucket_lifecycle_expiration_days", self.bucket_lifecycle_expiration_days);
        if !self.bucket_encryption_enabled {
            attributes.insert("bucket_encryption_enabled", false);
        }
        attributes.insert_some("bucket_sse_algorithm", non_empty(self.bucket_sse_algorithm.as_deref()));
        attributes.insert_some("bucket_sse_key_arn", non_empty(self.bucket_sse_key_arn.as_deref()));
        if self.bucket_versioning {
            attributes.insert("bucket_versioning_enabled", true);
        }

        if let Some(role) = provided(&self.existing_cross_account_iam_role) {
            attributes.insert("use_existing_cross_account_iam_role", true);
            attributes.insert("iam_role_arn", &role.arn);
            attributes.insert("iam_role_external_id", &role.external_id);
        }

        attributes.insert_some("filter_pattern", non_empty(self.filter_pattern.as_deref()));
        if !self.firehose_encryption_enabled {
            attributes.insert("kinesis_firehose_encryption_enabled", false);
        }
        attributes.insert_some(
            "kinesis_firehose_encryption_key_arn",
            non_empty(self.firehose_encryption_key_arn.as_deref()),
        );
        attributes.insert_some("kms_key_deletion_days", self.kms_key_deletion_days);
        if !self.kms_key_multi_region {
            attributes.insert("kms_key_multi_region", false);
        }
        if !self.kms_key_rotation {
            attributes.insert("kms_key_rotation", false);
        }
        if !self.sns_topic_encryption_enabled {
            attributes.insert("sns_topic_encryption_enabled", false);
        }
        attributes.insert_some(
            "sns_topic_encryption_key_arn",
            non_empty(self.sns_topic_encryption_key_arn.as_deref()),
        );
        attributes.insert_some("lacework_integration_name", non_empty(self.integration_name.as_deref()));
        attributes.insert_some("prefix", non_empty(self.prefix.as_deref()));

        let module = Module::new(EKS_AUDIT_MODULE, AWS_EKS_AUDIT_SOURCE)
            .with_version(AWS_EKS_AUDIT_VERSION)
            .with_attributes(attributes);

        match regions {
            [first, _, ..] => module.with_provider_alias("aws", Traversal::provider("aws", first)),
            _ => module,
        }
    }

    fn subscription_filter(&self, module: &Module, region: &str) -> HclResult<Resource> {
        let clusters = self.region_cluster_map.get(region).cloned().unwrap_or_default();
        let for_each = format!("toset({})", encode_inline(&Value::from(clusters))?);

        let attributes = Attributes::new()
            .with("destination_arn", module.output("firehose_arn"))
            .with("filter_pattern", module.output("filter_pattern"))
            .with("for_each", RawExpr::new(for_each))
            .with("log_group_name", RawExpr::new("\"/aws/eks/${each.value}/cluster\""))
            .with(
                "name",
                RawExpr::new(format!("\"${{{}}}-${{each.value}}\"", module.output("filter_prefix"))),
            )
            .with("role_arn", module.output("cloudwatch_iam_role_arn"));

        Ok(Resource::new(
            SUBSCRIPTION_FILTER_RESOURCE,
            format!("lacework_cw_subscription_filter-{}", region),
        )
        .with_provider(Traversal::provider("aws", region))
        .with_attributes(attributes)
        .with_depends_on(vec![Traversal::module(module.name())]))
    }
}

impl TerraformGenerator for EksAuditArgs {
    fn provider(&self) -> CloudProvider {
        CloudProvider::AwsEksAudit
    }

    fn validate(&self) -> GenerateResult<()> {
        if self.region_cluster_map.is_empty() {
            return Err(GenerateError::invalid(
                "at least one region with a list of clusters must be provided",
            ));
        }

        for (region, clusters) in &self.region_cluster_map {
            if region.is_empty() {
                return Err(GenerateError::invalid("region names cannot be empty"));
            }
            if clusters.is_empty() || clusters.iter().any(String::is_empty) {
                return Err(GenerateError::invalid(format!(
                    "region {:?} must list at least one cluster, and cluster names cannot be empty",
                    region
                )));
            }
        }

        // Each region becomes a provider alias once there is more than one.
        if self.region_cluster_map.len() > 1 {
            if let Some(region) = self.region_cluster_map.keys().find(|region| !is_identifier(region)) {
                return Err(GenerateError::invalid(format!(
                    "region {:?} cannot be used as a provider alias",
                    region
                )));
            }
        }

        if let Some(role) = provided(&self.existing_cross_account_iam_role) {
            if !role.is_complete() {
                return Err(GenerateError::invalid(
                    "when using an existing cross-account IAM role, both the ARN and external ID must be provided",
                ));
            }
        }

        if let Some(days) = self.kms_key_deletion_days {
            if !KMS_KEY_DELETION_DAYS.contains(&days) {
                return Err(GenerateError::invalid(format!(
                    "KMS key deletion days must be between 7 and 30, got {}",
                    days
                )));
            }
        }

        let key_arns = [
            (&self.bucket_sse_key_arn, self.bucket_encryption_enabled, "bucket"),
            (&self.firehose_encryption_key_arn, self.firehose_encryption_enabled, "Firehose"),
            (&self.sns_topic_encryption_key_arn, self.sns_topic_encryption_enabled, "SNS topic"),
        ];
        for (arn, enabled, target) in key_arns {
            if non_empty(arn.as_deref()).is_some() && !enabled {
                return Err(GenerateError::invalid(format!(
                    "a {} encryption key ARN requires {} encryption to be enabled",
                    target, target
                )));
            }
        }

        if non_empty(self.existing_bucket_arn.as_deref()).is_some() && self.has_bucket_options() {
            return Err(GenerateError::invalid(
                "bucket options cannot be used with an existing bucket",
            ));
        }

        Ok(())
    }

    fn build(&self) -> HclResult<Document> {
        let regions = self.regions();
        let module = self.module(&regions);

        let filters = if regions.len() > 1 {
            debug!("Fanning out subscription filters over {} regions", regions.len());
            regions
                .iter()
                .map(|region| self.subscription_filter(&module, region)?.to_block())
                .collect::<HclResult<Vec<_>>>()?
        } else {
            Vec::new()
        };

        Ok(Document::new()
            .add(required_providers()?)
            .add(self.aws_providers(&regions)?)
            .add(lacework_provider(self.lacework_profile.as_deref())?)
            .add(module.to_block()?)
            .add(filters))
    }
}
