//! GCP config and audit log integrations.

use std::collections::BTreeMap;

use lw_hcl::{Attributes, Document, HclResult, Module, Provider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::generator::{
    lacework_provider, non_empty, provided, require_together, required_providers, string_list, string_map,
    ExistingResource, ServiceAccount, TerraformGenerator,
};
use crate::provider::CloudProvider;

pub const GCP_CONFIG_SOURCE: &str = "lacework/config/gcp";
pub const GCP_CONFIG_VERSION: &str = "~> 2.3";
pub const GCP_AUDIT_LOG_SOURCE: &str = "lacework/audit-log/gcp";
pub const GCP_AUDIT_LOG_VERSION: &str = "~> 3.0";
pub const GCP_PUB_SUB_AUDIT_LOG_SOURCE: &str = "lacework/pub-sub-audit-log/gcp";
pub const GCP_PUB_SUB_AUDIT_LOG_VERSION: &str = "~> 0.2";

/// Arguments for the GCP generator.
///
/// `enable_ubla`, `google_workspace_filter`, `k8s_filter` and
/// `include_root_projects` default to `true` and are only rendered when
/// turned off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcpArgs {
    pub enable_config: bool,
    pub enable_audit_log: bool,
    pub use_pub_sub_audit_log: bool,
    pub service_account_credentials: Option<String>,
    pub project_id: Option<String>,
    pub organization_integration: bool,
    pub organization_id: Option<String>,
    pub existing_service_account: Option<ServiceAccount>,
    pub config_integration_name: Option<String>,
    pub audit_log_integration_name: Option<String>,
    pub audit_log_labels: BTreeMap<String, String>,
    pub bucket_labels: BTreeMap<String, String>,
    pub pub_sub_subscription_labels: BTreeMap<String, String>,
    pub pub_sub_topic_labels: BTreeMap<String, String>,
    pub bucket_region: Option<String>,
    pub custom_bucket_name: Option<String>,
    pub bucket_lifecycle_rule_age: Option<i64>,
    pub enable_force_destroy_bucket: bool,
    pub enable_ubla: bool,
    pub existing_log_bucket_name: Option<String>,
    pub existing_log_sink_name: Option<String>,
    pub custom_filter: Option<String>,
    pub google_workspace_filter: bool,
    pub k8s_filter: bool,
    pub folders_to_include: Vec<String>,
    pub folders_to_exclude: Vec<String>,
    pub include_root_projects: bool,
    pub prefix: Option<String>,
    pub wait_time: Option<String>,
    pub lacework_profile: Option<String>,
}

impl Default for GcpArgs {
    fn default() -> Self {
        Self {
            enable_config: false,
            enable_audit_log: false,
            use_pub_sub_audit_log: false,
            service_account_credentials: None,
            project_id: None,
            organization_integration: false,
            organization_id: None,
            existing_service_account: None,
            config_integration_name: None,
            audit_log_integration_name: None,
            audit_log_labels: BTreeMap::new(),
            bucket_labels: BTreeMap::new(),
            pub_sub_subscription_labels: BTreeMap::new(),
            pub_sub_topic_labels: BTreeMap::new(),
            bucket_region: None,
            custom_bucket_name: None,
            bucket_lifecycle_rule_age: None,
            enable_force_destroy_bucket: false,
            enable_ubla: true,
            existing_log_bucket_name: None,
            existing_log_sink_name: None,
            custom_filter: None,
            google_workspace_filter: true,
            k8s_filter: true,
            folders_to_include: Vec::new(),
            folders_to_exclude: Vec::new(),
            include_root_projects: true,
            prefix: None,
            wait_time: None,
            lacework_profile: None,
        }
    }
}

impl GcpArgs {
    pub fn new(enable_config: bool, enable_audit_log: bool) -> Self {
        Self {
            enable_config,
            enable_audit_log,
            ..Default::default()
        }
    }

    pub fn with_service_account_credentials(mut self, path: impl Into<String>) -> Self {
        self.service_account_credentials = Some(path.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
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

    pub fn with_config_integration_name(mut self, name: impl Into<String>) -> Self {
        self.config_integration_name = Some(name.into());
        self
    }

    pub fn with_audit_log_integration_name(mut self, name: impl Into<String>) -> Self {
        self.audit_log_integration_name = Some(name.into());
        self
    }

    /// Use the Pub/Sub based audit log module instead of a storage bucket.
    pub fn with_pub_sub_audit_log(mut self, enabled: bool) -> Self {
        self.use_pub_sub_audit_log = enabled;
        self
    }

    pub fn with_audit_log_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.audit_log_labels = string_map(labels);
        self
    }

    pub fn with_bucket_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.bucket_labels = string_map(labels);
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

    pub fn with_bucket_region(mut self, region: impl Into<String>) -> Self {
        self.bucket_region = Some(region.into());
        self
    }

    pub fn with_custom_bucket_name(mut self, name: impl Into<String>) -> Self {
        self.custom_bucket_name = Some(name.into());
        self
    }

    pub fn with_bucket_lifecycle_rule_age(mut self, days: i64) -> Self {
        self.bucket_lifecycle_rule_age = Some(days);
        self
    }

    pub fn with_force_destroy_bucket(mut self, enabled: bool) -> Self {
        self.enable_force_destroy_bucket = enabled;
        self
    }

    pub fn with_ubla(mut self, enabled: bool) -> Self {
        self.enable_ubla = enabled;
        self
    }

    pub fn with_existing_log_bucket_name(mut self, name: impl Into<String>) -> Self {
        self.existing_log_bucket_name = Some(name.into());
        self
    }

    pub fn with_existing_log_sink_name(mut self, name: impl Into<String>) -> Self {
        self.existing_log_sink_name = Some(name.into());
        self
    }

    pub fn with_custom_filter(mut self, filter: impl Into<String>) -> Self {
        self.custom_filter = Some(filter.into());
        self
    }

    pub fn with_google_workspace_filter(mut self, enabled: bool) -> Self {
        self.google_workspace_filter = enabled;
        self
    }

    pub fn with_k8s_filter(mut self, enabled: bool) -> Self {
        self.k8s_filter = enabled;
        self
    }

    pub fn with_folders_to_include<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folders_to_include = string_list(folders);
        self
    }

    pub fn with_folders_to_exclude<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folders_to_exclude = string_list(folders);
        self
    }

    pub fn with_include_root_projects(mut self, enabled: bool) -> Self {
        self.include_root_projects = enabled;
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

    fn has_bucket_options(&self) -> bool {
        non_empty(self.custom_bucket_name.as_deref()).is_some()
            || non_empty(self.bucket_region.as_deref()).is_some()
            || !self.bucket_labels.is_empty()
            || self.bucket_lifecycle_rule_age.is_some()
            || self.enable_force_destroy_bucket
            || !self.enable_ubla
    }

    fn google_provider(&self) -> Provider {
        let mut attributes = Attributes::new();
        attributes.insert_some("credentials", non_empty(self.service_account_credentials.as_deref()));
        attributes.insert_some("project", non_empty(self.project_id.as_deref()));
        Provider::new("google").with_attributes(attributes)
    }

    fn organization_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        if self.organization_integration {
            attributes.insert("org_integration", true);
            attributes.insert_some("organization_id", non_empty(self.organization_id.as_deref()));
        }
        attributes
    }

    fn config_module(&self) -> Option<Module> {
        if !self.enable_config {
            return None;
        }

        let name = if self.organization_integration {
            "gcp_organization_level_config"
        } else {
            "gcp_project_level_config"
        };
        debug!("Using config module {}", name);

        let mut attributes = self.organization_attributes();
        if let Some(account) = provided(&self.existing_service_account) {
            account.insert_into(&mut attributes);
        }
        attributes.insert_some("lacework_integration_name", non_empty(self.config_integration_name.as_deref()));
        attributes.insert_some("prefix", non_empty(self.prefix.as_deref()));
        attributes.insert_some("wait_time", non_empty(self.wait_time.as_deref()));
        if !self.folders_to_include.is_empty() {
            attributes.insert("folders_to_include", self.folders_to_include.clone());
        }
        if !self.folders_to_exclude.is_empty() {
            attributes.insert("folders_to_exclude", self.folders_to_exclude.clone());
        }
        if !self.include_root_projects {
            attributes.insert("include_root_projects", false);
        }

        Some(
            Module::new(name, GCP_CONFIG_SOURCE)
                .with_version(GCP_CONFIG_VERSION)
                .with_attributes(attributes),
        )
    }

    fn audit_log_module(&self, config: Option<&Module>) -> Option<Module> {
        if !self.enable_audit_log {
            return None;
        }

        let (name, source, version) = match (self.use_pub_sub_audit_log, self.organization_integration) {
            (false, false) => ("gcp_project_audit_log", GCP_AUDIT_LOG_SOURCE, GCP_AUDIT_LOG_VERSION),
            (false, true) => ("gcp_organization_level_audit_log", GCP_AUDIT_LOG_SOURCE, GCP_AUDIT_LOG_VERSION),
            (true, false) => (
                "gcp_project_level_pub_sub_audit_log",
                GCP_PUB_SUB_AUDIT_LOG_SOURCE,
                GCP_PUB_SUB_AUDIT_LOG_VERSION,
            ),
            (true, true) => (
                "gcp_organization_level_pub_sub_audit_log",
                GCP_PUB_SUB_AUDIT_LOG_SOURCE,
                GCP_PUB_SUB_AUDIT_LOG_VERSION,
            ),
        };
        debug!("Using audit log module {}", name);

        let mut attributes = self.organization_attributes();
        match (provided(&self.existing_service_account), config) {
            (Some(account), _) => account.insert_into(&mut attributes),
            (None, Some(config)) => {
                debug!("Sharing the service account of {}", config.name());
                attributes.insert("use_existing_service_account", true);
                attributes.insert("service_account_name", config.output("service_account_name"));
                attributes.insert(
                    "service_account_private_key",
                    config.output("service_account_private_key"),
                );
            }
            (None, None) => {}
        }

        attributes.insert_some("existing_sink_name", non_empty(self.existing_log_sink_name.as_deref()));
        if !self.use_pub_sub_audit_log {
            attributes.insert_some("existing_bucket_name", non_empty(self.existing_log_bucket_name.as_deref()));
            if self.enable_force_destroy_bucket {
                attributes.insert("bucket_force_destroy", true);
            }
            if !self.enable_ubla {
                attributes.insert("enable_ubla", false);
            }
            attributes.insert_some("lifecycle_rule_age", self.bucket_lifecycle_rule_age);
            attributes.insert_some("bucket_region", non_empty(self.bucket_region.as_deref()));
            attributes.insert_some("custom_bucket_name", non_empty(self.custom_bucket_name.as_deref()));
            if !self.bucket_labels.is_empty() {
                attributes.insert("bucket_labels", self.bucket_labels.clone());
            }
        }

        if !self.audit_log_labels.is_empty() {
            attributes.insert("labels", self.audit_log_labels.clone());
        }
        if !self.pub_sub_subscription_labels.is_empty() {
            attributes.insert("pubsub_subscription_labels", self.pub_sub_subscription_labels.clone());
        }
        if !self.pub_sub_topic_labels.is_empty() {
            attributes.insert("pubsub_topic_labels", self.pub_sub_topic_labels.clone());
        }

        attributes.insert_some("custom_filter", non_empty(self.custom_filter.as_deref()));
        if !self.google_workspace_filter {
            attributes.insert("google_workspace_filter", false);
        }
        if !self.k8s_filter {
            attributes.insert("k8s_filter", false);
        }
        attributes.insert_some(
            "lacework_integration_name",
            non_empty(self.audit_log_integration_name.as_deref()),
        );
        attributes.insert_some("prefix", non_empty(self.prefix.as_deref()));
        attributes.insert_some("wait_time", non_empty(self.wait_time.as_deref()));

        Some(Module::new(name, source).with_version(version).with_attributes(attributes))
    }
}

impl TerraformGenerator for GcpArgs {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Gcp
    }

    fn validate(&self) -> GenerateResult<()> {
        if !self.enable_config && !self.enable_audit_log {
            return Err(GenerateError::invalid(
                "audit log or configuration integration must be enabled",
            ));
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

        let has_include = !self.folders_to_include.is_empty();
        let has_exclude = !self.folders_to_exclude.is_empty();
        if (has_include || has_exclude) && !self.organization_integration {
            return Err(GenerateError::invalid(
                "folders to include or exclude require an Organization Integration",
            ));
        }
        if has_include && has_exclude {
            return Err(GenerateError::invalid(
                "folders to include and folders to exclude are mutually exclusive",
            ));
        }
        if !self.include_root_projects && !has_exclude {
            return Err(GenerateError::invalid(
                "root projects can only be excluded together with folders to exclude",
            ));
        }

        let existing_bucket = non_empty(self.existing_log_bucket_name.as_deref()).is_some();
        if existing_bucket && self.has_bucket_options() {
            return Err(GenerateError::invalid(
                "bucket options cannot be used with an existing log bucket",
            ));
        }
        if self.use_pub_sub_audit_log {
            if existing_bucket {
                return Err(GenerateError::invalid(
                    "an existing log bucket cannot be used with the Pub/Sub audit log",
                ));
            }
            if self.has_bucket_options() {
                return Err(GenerateError::invalid(
                    "bucket options cannot be used with the Pub/Sub audit log",
                ));
            }
        }

        if let Some(age) = self.bucket_lifecycle_rule_age {
            if age < 1 {
                return Err(GenerateError::invalid(format!(
                    "bucket lifecycle rule age must be a positive number of days, got {}",
                    age
                )));
            }
        }

        Ok(())
    }

    fn build(&self) -> HclResult<Document> {
        let config = self.config_module();
        let audit_log = self.audit_log_module(config.as_ref());

        Ok(Document::new()
            .add(required_providers()?)
            .add(self.google_provider().to_block()?)
            .add(lacework_provider(self.lacework_profile.as_deref())?)
            .add(config.map(|module| module.to_block()).transpose()?)
            .add(audit_log.map(|module| module.to_block()).transpose()?))
    }
}
