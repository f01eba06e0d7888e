//! Azure config and activity log integrations.

use lw_hcl::{Attributes, Block, Document, HclResult, Module, Provider, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::generator::{
    lacework_provider, non_empty, provided, require_together, required_providers, string_list, ExistingResource,
    TerraformGenerator,
};
use crate::provider::CloudProvider;

pub const AZURE_AD_APPLICATION_SOURCE: &str = "lacework/ad-application/azure";
pub const AZURE_AD_APPLICATION_VERSION: &str = "~> 1.0";
pub const AZURE_CONFIG_SOURCE: &str = "lacework/config/azure";
pub const AZURE_CONFIG_VERSION: &str = "~> 2.0";
pub const AZURE_ACTIVITY_LOG_SOURCE: &str = "lacework/activity-log/azure";
pub const AZURE_ACTIVITY_LOG_VERSION: &str = "~> 2.0";

const AD_APPLICATION_MODULE: &str = "az_ad_application";

/// An Active Directory application created outside this configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdApplication {
    pub id: String,
    pub password: String,
    pub service_principal_id: String,
}

impl AdApplication {
    pub fn new(
        id: impl Into<String>,
        password: impl Into<String>,
        service_principal_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
            service_principal_id: service_principal_id.into(),
        }
    }
}

impl ExistingResource for AdApplication {
    fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.password.is_empty() && !self.service_principal_id.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.id.is_empty() && self.password.is_empty() && self.service_principal_id.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageAccount {
    pub name: String,
    pub resource_group: String,
}

impl StorageAccount {
    pub fn new(name: impl Into<String>, resource_group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_group: resource_group.into(),
        }
    }
}

impl ExistingResource for StorageAccount {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.resource_group.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.resource_group.is_empty()
    }
}

/// Arguments for the Azure generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureArgs {
    pub enable_config: bool,
    pub enable_activity_log: bool,
    pub create_ad_integration: bool,
    pub ad_application: Option<AdApplication>,
    pub config_integration_name: Option<String>,
    pub activity_log_integration_name: Option<String>,
    pub all_subscriptions: bool,
    pub subscription_ids: Vec<String>,
    pub management_group: bool,
    pub management_group_id: Option<String>,
    pub existing_storage_account: Option<StorageAccount>,
    pub storage_location: Option<String>,
    pub subscription_id: Option<String>,
    pub lacework_profile: Option<String>,
}

impl AzureArgs {
    pub fn new(enable_config: bool, enable_activity_log: bool, create_ad_integration: bool) -> Self {
        Self {
            enable_config,
            enable_activity_log,
            create_ad_integration,
            ..Default::default()
        }
    }

    pub fn with_ad_application(mut self, application: AdApplication) -> Self {
        self.ad_application = Some(application);
        self
    }

    pub fn with_config_integration_name(mut self, name: impl Into<String>) -> Self {
        self.config_integration_name = Some(name.into());
        self
    }

    pub fn with_activity_log_integration_name(mut self, name: impl Into<String>) -> Self {
        self.activity_log_integration_name = Some(name.into());
        self
    }

    pub fn with_all_subscriptions(mut self, enabled: bool) -> Self {
        self.all_subscriptions = enabled;
        self
    }

    pub fn with_subscription_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subscription_ids = string_list(ids);
        self
    }

    pub fn with_management_group(mut self, enabled: bool) -> Self {
        self.management_group = enabled;
        self
    }

    pub fn with_management_group_id(mut self, id: impl Into<String>) -> Self {
        self.management_group_id = Some(id.into());
        self
    }

    pub fn with_existing_storage_account(mut self, account: StorageAccount) -> Self {
        self.existing_storage_account = Some(account);
        self
    }

    pub fn with_storage_location(mut self, location: impl Into<String>) -> Self {
        self.storage_location = Some(location.into());
        self
    }

    /// Subscription the `azurerm` provider runs against.
    pub fn with_subscription_id(mut self, id: impl Into<String>) -> Self {
        self.subscription_id = Some(id.into());
        self
    }

    pub fn with_lacework_profile(mut self, profile: impl Into<String>) -> Self {
        self.lacework_profile = Some(profile.into());
        self
    }

    fn providers(&self) -> HclResult<Vec<Block>> {
        let mut blocks = Vec::new();
        if self.create_ad_integration {
            blocks.push(Provider::new("azuread").to_block()?);
        }

        let mut attributes = Attributes::new();
        attributes.insert_some("subscription_id", non_empty(self.subscription_id.as_deref()));
        let azurerm = Provider::new("azurerm")
            .with_attributes(attributes)
            .with_block(Block::new("features", Vec::<String>::new())?);
        blocks.push(azurerm.to_block()?);

        Ok(blocks)
    }

    fn ad_application_module(&self) -> Option<Module> {
        self.create_ad_integration.then(|| {
            Module::new(AD_APPLICATION_MODULE, AZURE_AD_APPLICATION_SOURCE)
                .with_version(AZURE_AD_APPLICATION_VERSION)
        })
    }

    /// The AD application inputs shared by config and activity log.
    fn ad_attributes(&self, ad_module: Option<&Module>) -> Attributes {
        let (id, password, principal): (Value, Value, Value) = match (ad_module, provided(&self.ad_application)) {
            (Some(module), _) => (
                module.output("application_id").into(),
                module.output("application_password").into(),
                module.output("service_principal_id").into(),
            ),
            (None, Some(application)) => (
                (&application.id).into(),
                (&application.password).into(),
                (&application.service_principal_id).into(),
            ),
            (None, None) => return Attributes::new(),
        };

        Attributes::new()
            .with("use_existing_ad_application", true)
            .with("application_id", id)
            .with("application_password", password)
            .with("service_principal_id", principal)
    }

    fn subscription_attributes(&self, attributes: &mut Attributes) {
        if self.all_subscriptions {
            attributes.insert("all_subscriptions", true);
        }
        if !self.subscription_ids.is_empty() {
            attributes.insert("subscription_ids", self.subscription_ids.clone());
        }
    }

    fn config_module(&self, ad_module: Option<&Module>) -> Option<Module> {
        if !self.enable_config {
            return None;
        }

        let mut attributes = self.ad_attributes(ad_module);
        self.subscription_attributes(&mut attributes);
        if self.management_group {
            attributes.insert("use_management_group", true);
            attributes.insert_some("management_group_id", non_empty(self.management_group_id.as_deref()));
        }
        attributes.insert_some("lacework_integration_name", non_empty(self.config_integration_name.as_deref()));

        Some(
            Module::new("az_config", AZURE_CONFIG_SOURCE)
                .with_version(AZURE_CONFIG_VERSION)
                .with_attributes(attributes),
        )
    }

    fn activity_log_module(&self, ad_module: Option<&Module>) -> Option<Module> {
        if !self.enable_activity_log {
            return None;
        }

        let mut attributes = self.ad_attributes(ad_module);
        self.subscription_attributes(&mut attributes);
        if let Some(account) = provided(&self.existing_storage_account) {
            debug!("Using existing storage account {}", account.name);
            attributes.insert("use_existing_storage_account", true);
            attributes.insert("storage_account_name", &account.name);
            attributes.insert("storage_account_resource_group", &account.resource_group);
        }
        attributes.insert_some("location", non_empty(self.storage_location.as_deref()));
        attributes.insert_some(
            "lacework_integration_name",
            non_empty(self.activity_log_integration_name.as_deref()),
        );

        Some(
            Module::new("az_activity_log", AZURE_ACTIVITY_LOG_SOURCE)
                .with_version(AZURE_ACTIVITY_LOG_VERSION)
                .with_attributes(attributes),
        )
    }
}

impl TerraformGenerator for AzureArgs {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Azure
    }

    fn validate(&self) -> GenerateResult<()> {
        if !self.enable_config && !self.enable_activity_log {
            return Err(GenerateError::invalid(
                "config or activity log integration must be enabled",
            ));
        }

        match (provided(&self.ad_application), self.create_ad_integration) {
            (Some(_), true) => {
                return Err(GenerateError::invalid(
                    "an existing AD application cannot be provided when creating one",
                ));
            }
            (Some(application), false) if application.is_complete() => {}
            (_, false) => {
                return Err(GenerateError::invalid(
                    "when not creating an AD application, the application ID, password and service principal ID must be provided",
                ));
            }
            (None, true) => {}
        }

        require_together(
            self.management_group,
            self.management_group_id.as_deref(),
            "a management group ID must be provided when using a management group",
            "to provide a management group ID, management group must be true",
        )?;
        if self.management_group && !self.enable_config {
            return Err(GenerateError::invalid(
                "a management group requires the config integration",
            ));
        }

        if self.all_subscriptions && !self.subscription_ids.is_empty() {
            return Err(GenerateError::invalid(
                "all subscriptions cannot be combined with explicit subscription IDs",
            ));
        }

        if let Some(account) = provided(&self.existing_storage_account) {
            if !account.is_complete() {
                return Err(GenerateError::invalid(
                    "when using an existing storage account, both the name and resource group must be provided",
                ));
            }
        }
        let storage_options = provided(&self.existing_storage_account).is_some()
            || non_empty(self.storage_location.as_deref()).is_some();
        if storage_options && !self.enable_activity_log {
            return Err(GenerateError::invalid(
                "storage account options require the activity log integration",
            ));
        }

        Ok(())
    }

    fn build(&self) -> HclResult<Document> {
        let ad_module = self.ad_application_module();
        let config = self.config_module(ad_module.as_ref());
        let activity_log = self.activity_log_module(ad_module.as_ref());

        let modules = ad_module
            .iter()
            .chain(config.iter())
            .chain(activity_log.iter())
            .map(Module::to_block)
            .collect::<HclResult<Vec<_>>>()?;

        Ok(Document::new()
            .add(required_providers()?)
            .add(self.providers()?)
            .add(lacework_provider(self.lacework_profile.as_deref())?)
            .add(modules))
    }
}
