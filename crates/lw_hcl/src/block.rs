//! Builders for the Terraform block kinds the generators emit.
//!
//! Builders are plain values: create with `new`, refine with `with_*`, then
//! materialize with `to_block`. Only `to_block` can fail, and only for
//! encoding problems such as a name that is not a valid identifier.

use std::collections::BTreeMap;

use crate::attributes::Attributes;
use crate::error::HclResult;
use crate::structure::{Block, Body};
use crate::value::{Object, Traversal, Value};

/// One entry of the `required_providers` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredProvider {
    name: String,
    source: Option<String>,
    version: Option<String>,
}

impl RequiredProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            version: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The `terraform { required_providers { ... } }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredProviders {
    providers: Vec<RequiredProvider>,
}

impl RequiredProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: RequiredProvider) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn to_block(&self) -> HclResult<Block> {
        let mut entries = Attributes::new();
        for provider in &self.providers {
            let mut constraint = Object::new();
            if let Some(source) = &provider.source {
                constraint.insert("source".to_string(), Value::from(source));
            }
            if let Some(version) = &provider.version {
                constraint.insert("version".to_string(), Value::from(version));
            }
            entries.insert(provider.name.clone(), Value::Object(constraint));
        }

        let mut required_body = Body::new();
        required_body.push_attributes(&entries)?;

        let mut body = Body::new();
        body.push_block(Block::new("required_providers", Vec::<String>::new())?.with_body(required_body));

        Ok(Block::new("terraform", Vec::<String>::new())?.with_body(body))
    }
}

/// A `provider "<type>"` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    provider_type: String,
    attributes: Attributes,
    blocks: Vec<Block>,
}

impl Provider {
    pub fn new(provider_type: impl Into<String>) -> Self {
        Self {
            provider_type: provider_type.into(),
            attributes: Attributes::new(),
            blocks: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Append a nested block, such as `features {}` for `azurerm`.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn provider_type(&self) -> &str {
        &self.provider_type
    }

    pub fn to_block(&self) -> HclResult<Block> {
        let mut body = Body::new();
        body.push_attributes(&self.attributes)?;
        for block in &self.blocks {
            body.push_block(block.clone());
        }

        Ok(Block::new("provider", [self.provider_type.as_str()])?.with_body(body))
    }
}

/// A `module "<name>"` block.
///
/// `source` and `version` always render first, then the sorted inputs, then
/// the `providers` mapping if any aliases were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    source: String,
    version: Option<String>,
    attributes: Attributes,
    providers: BTreeMap<String, Traversal>,
}

impl Module {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            version: None,
            attributes: Attributes::new(),
            providers: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Bind a provider the module uses to an aliased provider, e.g. `aws = aws.main`.
    pub fn with_provider_alias(mut self, local: impl Into<String>, provider: Traversal) -> Self {
        self.providers.insert(local.into(), provider);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference to one of this module's outputs.
    pub fn output(&self, output: &str) -> Traversal {
        Traversal::module_output(&self.name, output)
    }

    pub fn to_block(&self) -> HclResult<Block> {
        let mut body = Body::new();
        body.push_attribute("source", &Value::from(&self.source))?;
        if let Some(version) = &self.version {
            body.push_attribute("version", &Value::from(version))?;
        }
        body.push_attributes(&self.attributes)?;

        if !self.providers.is_empty() {
            let providers: Object = self
                .providers
                .iter()
                .map(|(local, provider)| (local.clone(), Value::from(provider.clone())))
                .collect();
            body.push_attribute("providers", &Value::Object(providers))?;
        }

        Ok(Block::new("module", [self.name.as_str()])?.with_body(body))
    }
}

/// A `resource "<type>" "<name>"` block.
///
/// An explicit `provider` renders first and `depends_on` renders last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    resource_type: String,
    name: String,
    attributes: Attributes,
    provider: Option<Traversal>,
    depends_on: Vec<Traversal>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            attributes: Attributes::new(),
            provider: None,
            depends_on: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Use an aliased provider, e.g. `aws.us-west-2`.
    pub fn with_provider(mut self, provider: Traversal) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_depends_on(mut self, depends_on: Vec<Traversal>) -> Self {
        self.depends_on.extend(depends_on);
        self
    }

    pub fn to_block(&self) -> HclResult<Block> {
        let mut body = Body::new();
        if let Some(provider) = &self.provider {
            body.push_attribute("provider", &Value::from(provider.clone()))?;
        }
        body.push_attributes(&self.attributes)?;

        if !self.depends_on.is_empty() {
            let depends_on = self.depends_on.iter().cloned().map(Value::from).collect();
            body.push_attribute("depends_on", &Value::List(depends_on))?;
        }

        Ok(Block::new("resource", [self.resource_type.as_str(), self.name.as_str()])?.with_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::Tokens;
    use crate::error::HclError;
    use crate::value::RawExpr;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_required_providers() {
        let block = RequiredProviders::new()
            .with_provider(
                RequiredProvider::new("lacework")
                    .with_source("lacework/lacework")
                    .with_version("~> 1.0"),
            )
            .to_block()
            .unwrap();

        let expected = r#"terraform {
  required_providers {
    lacework = {
      source  = "lacework/lacework"
      version = "~> 1.0"
    }
  }
}
"#;
        assert_eq!(block.to_string(), expected);
    }

    #[test]
    fn test_provider_attributes_sorted() {
        let block = Provider::new("google")
            .with_attributes(
                Attributes::new()
                    .with("project", "project-1")
                    .with("credentials", "/path/creds.json"),
            )
            .to_block()
            .unwrap();

        let expected = r#"provider "google" {
  credentials = "/path/creds.json"
  project     = "project-1"
}
"#;
        assert_eq!(block.to_string(), expected);
    }

    #[test]
    fn test_module_source_and_version_lead() {
        let block = Module::new("main_cloudtrail", "lacework/cloudtrail/aws")
            .with_version("~> 2.0")
            .with_attributes(
                Attributes::new()
                    .with("use_existing_iam_role", true)
                    .with("iam_role_name", Traversal::module_output("aws_config", "iam_role_name"))
                    .with("bucket_arn", "arn:aws:s3:::bucket"),
            )
            .with_provider_alias("aws", Traversal::provider("aws", "main"))
            .to_block()
            .unwrap();

        let expected = r#"module "main_cloudtrail" {
  source                = "lacework/cloudtrail/aws"
  version               = "~> 2.0"
  bucket_arn            = "arn:aws:s3:::bucket"
  iam_role_name         = module.aws_config.iam_role_name
  use_existing_iam_role = true
  providers = {
    aws = aws.main
  }
}
"#;
        assert_eq!(block.to_string(), expected);
    }

    #[test]
    fn test_module_output_reference() {
        let module = Module::new("gcp_project_level_config", "lacework/config/gcp");
        assert_eq!(
            module.output("service_account_name").to_string(),
            "module.gcp_project_level_config.service_account_name"
        );
    }

    #[test]
    fn test_resource_provider_and_depends_on() {
        let block = Resource::new("aws_cloudwatch_log_subscription_filter", "filter-us-west-2")
            .with_provider(Traversal::provider("aws", "us-west-2"))
            .with_attributes(
                Attributes::new()
                    .with("name", RawExpr::new("\"${each.value}\""))
                    .with("for_each", RawExpr::new("toset([\"a\"])")),
            )
            .with_depends_on(vec![Traversal::module("eks")])
            .to_block()
            .unwrap();

        let expected = r#"resource "aws_cloudwatch_log_subscription_filter" "filter-us-west-2" {
  provider   = aws.us-west-2
  for_each   = toset(["a"])
  name       = "${each.value}"
  depends_on = [module.eks]
}
"#;
        assert_eq!(block.to_string(), expected);
        assert_eq!(
            block.attribute("provider"),
            Some(&Tokens::Inline("aws.us-west-2".to_string()))
        );
    }

    #[test]
    fn test_invalid_provider_alias_fails() {
        let err = Module::new("m", "src")
            .with_provider_alias("aws", Traversal::provider("aws", "bad alias"))
            .to_block()
            .unwrap_err();
        assert!(matches!(err, HclError::InvalidTraversal(_)));
    }

    #[test]
    fn test_dotted_alias_stays_one_segment() {
        let err = Resource::new("aws_s3_bucket", "b")
            .with_provider(Traversal::provider("aws", "eu.central"))
            .to_block()
            .unwrap_err();
        assert!(matches!(err, HclError::InvalidTraversal(_)));
    }
}
