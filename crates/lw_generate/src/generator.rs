//! The generator contract and the pieces every provider shares.

use std::collections::BTreeMap;

use lw_hcl::{Attributes, Block, Document, HclResult, Provider, RequiredProvider, RequiredProviders};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GenerateError, GenerateResult};
use crate::provider::CloudProvider;

pub const LACEWORK_PROVIDER_NAME: &str = "lacework";
pub const LACEWORK_PROVIDER_SOURCE: &str = "lacework/lacework";
pub const LACEWORK_PROVIDER_VERSION: &str = "~> 1.0";

/// Turns one provider's arguments into a Terraform document.
///
/// Implementors supply `validate` and `build`; `generate` runs both and
/// renders. Validation is pure and reports the first violated rule, so an
/// invalid configuration never reaches block construction.
pub trait TerraformGenerator {
    fn provider(&self) -> CloudProvider;

    fn validate(&self) -> GenerateResult<()>;

    fn build(&self) -> HclResult<Document>;

    fn generate(&self) -> GenerateResult<String> {
        info!("Generating Terraform for {}", self.provider());
        self.validate()?;

        let document = self.build()?;
        debug!("Rendering {} top-level blocks", document.len());

        Ok(document.render())
    }
}

/// The `terraform { required_providers { lacework = ... } }` block.
pub fn required_providers() -> HclResult<Block> {
    RequiredProviders::new()
        .with_provider(
            RequiredProvider::new(LACEWORK_PROVIDER_NAME)
                .with_source(LACEWORK_PROVIDER_SOURCE)
                .with_version(LACEWORK_PROVIDER_VERSION),
        )
        .to_block()
}

/// `provider "lacework"`, only when a profile was given.
pub fn lacework_provider(profile: Option<&str>) -> HclResult<Option<Block>> {
    match non_empty(profile) {
        Some(profile) => {
            let provider = Provider::new(LACEWORK_PROVIDER_NAME)
                .with_attributes(Attributes::new().with("profile", profile));
            Ok(Some(provider.to_block()?))
        }
        None => Ok(None),
    }
}

/// A group of fields naming a resource that already exists.
///
/// A group is used only when every field is set. A group with every field
/// empty is the same as no group at all; anything in between is rejected.
pub trait ExistingResource {
    fn is_complete(&self) -> bool;

    fn is_empty(&self) -> bool;
}

/// The group, unless it was given with every field empty.
pub(crate) fn provided<T: ExistingResource>(group: &Option<T>) -> Option<&T> {
    group.as_ref().filter(|group| !group.is_empty())
}

/// Credentials of a GCP service account that already exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAccount {
    pub name: String,
    pub private_key: String,
}

impl ServiceAccount {
    pub fn new(name: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private_key: private_key.into(),
        }
    }

    pub(crate) fn insert_into(&self, attributes: &mut Attributes) {
        attributes.insert("use_existing_service_account", true);
        attributes.insert("service_account_name", &self.name);
        attributes.insert("service_account_private_key", &self.private_key);
    }
}

impl ExistingResource for ServiceAccount {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.private_key.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.private_key.is_empty()
    }
}

/// Treat an empty string the same as an unset option.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A scope flag and its identifier must be given together.
pub(crate) fn require_together(
    enabled: bool,
    id: Option<&str>,
    missing_id: &str,
    missing_flag: &str,
) -> GenerateResult<()> {
    match (enabled, non_empty(id).is_some()) {
        (true, false) => Err(GenerateError::invalid(missing_id)),
        (false, true) => Err(GenerateError::invalid(missing_flag)),
        _ => Ok(()),
    }
}

pub(crate) fn string_map<I, K, V>(entries: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

pub(crate) fn string_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
