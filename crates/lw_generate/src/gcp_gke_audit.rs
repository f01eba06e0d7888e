//! Google GKE audit log integration.

use std::collections::BTreeMap;

use lw_hcl::{Attributes, Document, HclResult, Module, Provider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::generator::{
    lacework_provider, non_empty, provided, require_together, required_providers, string_map, ExistingResource,
    ServiceAccount, TerraformGenerator,
};
use crate::provider::CloudProvider;

pub const GCP_GKE_AUDIT_SOURCE: &str = "lacework/gke-audit-log/gcp";
pub const GCP_GKE_AUDIT_VERSION: &str = "~> 0.3";

/// Arguments for the GKE audit log generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GkeAuditArgs {
    pub project_id: String,
    pub service_account_credentials: Option<String>,
    pub organization_integration: bool,
    pub organization_id: Option<String>,
    pub existing_service_account: Option<ServiceAccount>,
    pub existing_sink_name: Option<String>,
    pub integration_name: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub pub_sub_subscription_labels: BTreeMap<String, String>,
    pub pub_sub_topic_labels: BTreeMap<String, String>,
    pub prefix: Option<String>,
    pub wait_time: Option<String>,
    pub lacework_profile: Option<String>,
}

impl GkeAuditArgs {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn with_service_account_credentials(mut self, path: impl Into<String>) -> Self {
        self.service_account_credentials = Some(path.into());
        self
    }

    pub fn with_organization_integration(mut self, enabled: bool) -> Self {
        self.organization_integration = enabled;
        self
    }

    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_existing_service_account(mut self, account: ServiceAccount) -> Self {
        self.existing_service_account = Some(account);
        self
    }

    pub fn with_existing_sink_name(mut self, name: impl Into<String>) -> Self {
        self.existing_sink_name = Some(name.into());
        self
    }

    pub fn with_integration_name(mut self, name: impl Into<String>) -> Self {
        self.integration_name = Some(name.into());
        self
    }

    pub fn with_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels = string_map(labels);
        self
    }

    pub fn with_pub_sub_subscription_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.pub_sub_subscription_labels = string_map(labels);
        self
    }

    pub fn with_pub_sub_topic_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.pub_sub_topic_labels = string_map(labels);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_wait_time(mut self, wait_time: impl Into<String>) -> Self {
        self.wait_time = Some(wait_time.into());
        self
    }

    pub fn with_lacework_profile(mut self, profile: impl Into<String>) -> Self {
        self.lacework_profile = Some(profile.into());
        self
    }

    fn module(&self) -> Module {
        let name = if self.organization_integration {
            "gcp_organization_level_gke_audit_log"
        } else {
            "gcp_project_level_gke_audit_log"
        };
        debug!("Using GKE audit log module {}", name);

        let mut attributes = Attributes::new();
        if self.organization_integration {
            attributes.insert("integration_type", "ORGANIZATION");
            attributes.insert_some("organization_id", non_empty(self.organization_id.as_deref()));
        }
        attributes.insert_some("existing_sink_name", non_empty(self.existing_sink_name.as_deref()));
        if let Some(account) = provided(&self.existing_service_account) {
            account.insert_into(&mut attributes);
        }
        if !self.labels.is_empty() {
            attributes.insert("labels", self.labels.clone());
        }
        if !self.pub_sub_subscription_labels.is_empty() {
            attributes.insert("pubsub_subscription_labels", self.pub_sub_subscription_labels.clone());
        }
        if !self.pub_sub_topic_labels.is_empty() {
            attributes.insert("pubsub_topic_labels", self.pub_sub_topic_labels.clone());
        }
        attributes.insert_some("lacework_integration_name", non_empty(self.integration_name.as_deref()));
        attributes.insert_some("prefix", non_empty(self.prefix.as_deref()));
        attributes.insert_some("wait_time", non_empty(self.wait_time.as_deref()));

        Module::new(name, GCP_GKE_AUDIT_SOURCE)
            .with_version(GCP_GKE_AUDIT_VERSION)
            .with_attributes(attributes)
    }
}

impl TerraformGenerator for GkeAuditArgs {
    fn provider(&self) -> CloudProvider {
        CloudProvider::GcpGkeAudit
    }

    fn validate(&self) -> GenerateResult<()> {
        if self.project_id.is_empty() {
            return Err(GenerateError::invalid("a project ID must be provided"));
        }

        require_together(
            self.organization_integration,
            self.organization_id.as_deref(),
            "an Organization ID must be provided for an Organization Integration",
            "to provide an Organization ID, Organization Integration must be true",
        )?;

        if let Some(account) = provided(&self.existing_service_account) {
            if !account.is_complete() {
                return Err(GenerateError::invalid(
                    "when using an existing service account, both the name and private key must be provided",
                ));
            }
        }

        Ok(())
    }

    fn build(&self) -> HclResult<Document> {
        let mut provider = Attributes::new();
        provider.insert_some("credentials", non_empty(self.service_account_credentials.as_deref()));
        provider.insert("project", &self.project_id);

        Ok(Document::new()
            .add(required_providers()?)
            .add(Provider::new("google").with_attributes(provider).to_block()?)
            .add(lacework_provider(self.lacework_profile.as_deref())?)
            .add(self.module().to_block()?))
    }
}
