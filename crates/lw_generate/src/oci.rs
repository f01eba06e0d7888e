//! OCI config integration.

use lw_hcl::{Attributes, Document, HclResult, Module, Provider};
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, GenerateResult};
use crate::generator::{lacework_provider, non_empty, required_providers, TerraformGenerator};
use crate::provider::CloudProvider;

pub const OCI_CONFIG_SOURCE: &str = "lacework/config/oci";
pub const OCI_CONFIG_VERSION: &str = "~> 0.2";

const TENANCY_OCID_PREFIX: &str = "ocid1.tenancy.";

/// Arguments for the OCI generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OciArgs {
    pub enable_config: bool,
    pub tenancy_ocid: Option<String>,
    pub user_email: Option<String>,
    pub config_name: Option<String>,
    /// Profile from `~/.oci/config` used by the provider.
    pub oci_profile: Option<String>,
    pub lacework_profile: Option<String>,
}

impl OciArgs {
    pub fn new(enable_config: bool) -> Self {
        Self {
            enable_config,
            ..Default::default()
        }
    }

    pub fn with_tenancy_ocid(mut self, ocid: impl Into<String>) -> Self {
        self.tenancy_ocid = Some(ocid.into());
        self
    }

    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = Some(name.into());
        self
    }

    pub fn with_oci_profile(mut self, profile: impl Into<String>) -> Self {
        self.oci_profile = Some(profile.into());
        self
    }

    pub fn with_lacework_profile(mut self, profile: impl Into<String>) -> Self {
        self.lacework_profile = Some(profile.into());
        self
    }
}

impl TerraformGenerator for OciArgs {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Oci
    }

    fn validate(&self) -> GenerateResult<()> {
        if !self.enable_config {
            return Err(GenerateError::invalid("config integration must be enabled"));
        }

        match non_empty(self.tenancy_ocid.as_deref()) {
            None => return Err(GenerateError::invalid("a tenancy OCID must be provided")),
            Some(ocid) if !ocid.starts_with(TENANCY_OCID_PREFIX) => {
                return Err(GenerateError::invalid(format!(
                    "invalid tenancy OCID {:?}, expected it to start with {:?}",
                    ocid, TENANCY_OCID_PREFIX
                )));
            }
            Some(_) => {}
        }

        if non_empty(self.user_email.as_deref()).is_none() {
            return Err(GenerateError::invalid("a user email must be provided"));
        }

        Ok(())
    }

    fn build(&self) -> HclResult<Document> {
        let mut provider = Attributes::new();
        provider.insert_some("config_file_profile", non_empty(self.oci_profile.as_deref()));

        let mut attributes = Attributes::new();
        attributes.insert_some("tenancy_id", non_empty(self.tenancy_ocid.as_deref()));
        attributes.insert_some("user_email", non_empty(self.user_email.as_deref()));
        attributes.insert_some("lacework_integration_name", non_empty(self.config_name.as_deref()));

        let config = Module::new("oci_config", OCI_CONFIG_SOURCE)
            .with_version(OCI_CONFIG_VERSION)
            .with_attributes(attributes);

        Ok(Document::new()
            .add(required_providers()?)
            .add(Provider::new("oci").with_attributes(provider).to_block()?)
            .add(lacework_provider(self.lacework_profile.as_deref())?)
            .add(config.to_block()?))
    }
}
