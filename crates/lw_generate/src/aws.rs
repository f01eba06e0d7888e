//! AWS config, CloudTrail and agentless scanning integrations.
//!
//! Sub-accounts switch the generator into multi-account mode: the main
//! account's provider gets the `main` alias, every sub-account gets its own
//! aliased provider, and modules are bound explicitly to one of them.

use std::collections::HashSet;

use lw_hcl::{is_identifier, Attributes, Block, Document, HclResult, Module, Provider, Traversal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::generator::{
    lacework_provider, non_empty, provided, require_together, required_providers, string_list, ExistingResource,
    TerraformGenerator,
};
use crate::provider::CloudProvider;

pub const AWS_CONFIG_SOURCE: &str = "lacework/config/aws";
pub const AWS_CONFIG_VERSION: &str = "~> 0.5";
pub const AWS_ORG_CONFIG_SOURCE: &str = "lacework/org-configuration/aws";
pub const AWS_ORG_CONFIG_VERSION: &str = "~> 0.1";
pub const AWS_CLOUDTRAIL_SOURCE: &str = "lacework/cloudtrail/aws";
pub const AWS_CLOUDTRAIL_VERSION: &str = "~> 2.0";
pub const AWS_AGENTLESS_SOURCE: &str = "lacework/agentless-scanning/aws";
pub const AWS_AGENTLESS_VERSION: &str = "~> 0.6";

const MAIN_ALIAS: &str = "main";
const CONFIG_MODULE: &str = "aws_config";
const ORG_CONFIG_MODULE: &str = "aws_org_configuration";
const CLOUDTRAIL_MODULE: &str = "main_cloudtrail";
const AGENTLESS_GLOBAL_MODULE: &str = "lacework_aws_agentless_scanning_global";

/// An IAM role that Lacework should reuse instead of creating one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExistingIamRole {
    pub name: String,
    pub arn: String,
    pub external_id: String,
}

impl ExistingIamRole {
    pub fn new(name: impl Into<String>, arn: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
            external_id: external_id.into(),
        }
    }
}

impl ExistingResource for ExistingIamRole {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.arn.is_empty() && !self.external_id.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.arn.is_empty() && self.external_id.is_empty()
    }
}

/// An additional AWS account, reached through its own CLI profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubAccount {
    pub profile: String,
    pub region: String,
    pub alias: Option<String>,
}

impl SubAccount {
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Provider alias; the profile name unless set explicitly.
    pub fn alias(&self) -> &str {
        non_empty(self.alias.as_deref()).unwrap_or(&self.profile)
    }
}

/// Arguments for the AWS generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsArgs {
    pub enable_config: bool,
    pub enable_cloudtrail: bool,
    pub enable_agentless: bool,
    pub aws_region: Option<String>,
    pub aws_profile: Option<String>,
    pub consolidated_cloudtrail: bool,
    pub cloudtrail_name: Option<String>,
    pub existing_cloudtrail_bucket_arn: Option<String>,
    pub existing_sns_topic_arn: Option<String>,
    pub existing_iam_role: Option<ExistingIamRole>,
    pub force_destroy_bucket: bool,
    pub sub_accounts: Vec<SubAccount>,
    pub organization_integration: bool,
    pub organization_id: Option<String>,
    pub organization_units: Vec<String>,
    pub config_integration_name: Option<String>,
    pub cloudtrail_integration_name: Option<String>,
    pub agentless_integration_name: Option<String>,
    pub prefix: Option<String>,
    pub wait_time: Option<String>,
    pub lacework_profile: Option<String>,
}

impl AwsArgs {
    pub fn new(enable_config: bool, enable_cloudtrail: bool) -> Self {
        Self {
            enable_config,
            enable_cloudtrail,
            ..Default::default()
        }
    }

    pub fn with_agentless(mut self, enabled: bool) -> Self {
        self.enable_agentless = enabled;
        self
    }

    pub fn with_aws_region(mut self, region: impl Into<String>) -> Self {
        self.aws_region = Some(region.into());
        self
    }

    pub fn with_aws_profile(mut self, profile: impl Into<String>) -> Self {
        self.aws_profile = Some(profile.into());
        self
    }

    pub fn with_consolidated_cloudtrail(mut self, enabled: bool) -> Self {
        self.consolidated_cloudtrail = enabled;
        self
    }

    pub fn with_cloudtrail_name(mut self, name: impl Into<String>) -> Self {
        self.cloudtrail_name = Some(name.into());
        self
    }

    pub fn with_existing_cloudtrail_bucket_arn(mut self, arn: impl Into<String>) -> Self {
        self.existing_cloudtrail_bucket_arn = Some(arn.into());
        self
    }

    pub fn with_existing_sns_topic_arn(mut self, arn: impl Into<String>) -> Self {
        self.existing_sns_topic_arn = Some(arn.into());
        self
    }

    pub fn with_existing_iam_role(mut self, role: ExistingIamRole) -> Self {
        self.existing_iam_role = Some(role);
        self
    }

    pub fn with_force_destroy_bucket(mut self, enabled: bool) -> Self {
        self.force_destroy_bucket = enabled;
        self
    }

    pub fn with_sub_accounts(mut self, sub_accounts: Vec<SubAccount>) -> Self {
        self.sub_accounts = sub_accounts;
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

    pub fn with_organization_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organization_units = string_list(units);
        self
    }

    pub fn with_config_integration_name(mut self, name: impl Into<String>) -> Self {
        self.config_integration_name = Some(name.into());
        self
    }

    pub fn with_cloudtrail_integration_name(mut self, name: impl Into<String>) -> Self {
        self.cloudtrail_integration_name = Some(name.into());
        self
    }

    pub fn with_agentless_integration_name(mut self, name: impl Into<String>) -> Self {
        self.agentless_integration_name = Some(name.into());
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

    fn multi_account(&self) -> bool {
        !self.sub_accounts.is_empty()
    }

    /// Whether the single-account config module (not the org one) is generated.
    fn account_config(&self) -> bool {
        self.enable_config && !self.organization_integration
    }

    fn bind_main(&self, module: Module) -> Module {
        if self.multi_account() {
            module.with_provider_alias("aws", Traversal::provider("aws", MAIN_ALIAS))
        } else {
            module
        }
    }

    fn aws_providers(&self) -> HclResult<Vec<Block>> {
        let mut main = Attributes::new();
        if self.multi_account() {
            main.insert("alias", MAIN_ALIAS);
        }
        main.insert_some("profile", non_empty(self.aws_profile.as_deref()));
        main.insert_some("region", non_empty(self.aws_region.as_deref()));

        let mut blocks = vec![Provider::new("aws").with_attributes(main).to_block()?];
        for account in &self.sub_accounts {
            debug!("Adding provider for sub-account {}", account.alias());
            let attributes = Attributes::new()
                .with("alias", account.alias())
                .with("profile", &account.profile)
                .with("region", &account.region);
            blocks.push(Provider::new("aws").with_attributes(attributes).to_block()?);
        }

        Ok(blocks)
    }

    fn iam_role_attributes(&self, attributes: &mut Attributes) {
        if let Some(role) = provided(&self.existing_iam_role) {
            attributes.insert("use_existing_iam_role", true);
            attributes.insert("iam_role_name", &role.name);
            attributes.insert("iam_role_arn", &role.arn);
            attributes.insert("iam_role_external_id", &role.external_id);
        }
    }

    fn config_modules(&self) -> Vec<Module> {
        if !self.enable_config {
            return Vec::new();
        }

        if self.organization_integration {
            debug!("Using organization config module");
            let mut attributes = Attributes::new();
            attributes.insert_some("organization_id", non_empty(self.organization_id.as_deref()));
            if !self.organization_units.is_empty() {
                attributes.insert("organization_unit", self.organization_units.clone());
            }
            attributes.insert_some("lacework_integration_name", non_empty(self.config_integration_name.as_deref()));
            attributes.insert_some("prefix", non_empty(self.prefix.as_deref()));

            let module = Module::new(ORG_CONFIG_MODULE, AWS_ORG_CONFIG_SOURCE)
                .with_version(AWS_ORG_CONFIG_VERSION)
                .with_attributes(attributes);
            return vec![self.bind_main(module)];
        }

        let mut attributes = Attributes::new();
        self.iam_role_attributes(&mut attributes);
        attributes.insert_some("lacework_integration_name", non_empty(self.config_integration_name.as_deref()));
        attributes.insert_some("prefix", non_empty(self.prefix.as_deref()));
        attributes.insert_some("wait_time", non_empty(self.wait_time.as_deref()));

        let main = Module::new(CONFIG_MODULE, AWS_CONFIG_SOURCE)
            .with_version(AWS_CONFIG_VERSION)
            .with_attributes(attributes);

        let mut modules = vec![self.bind_main(main)];
        for account in &self.sub_accounts {
            let alias = account.alias();
            modules.push(
                Module::new(format!("{}_{}", CONFIG_MODULE, alias), AWS_CONFIG_SOURCE)
                    .with_version(AWS_CONFIG_VERSION)
                    .with_provider_alias("aws", Traversal::provider("aws", alias)),
            );
        }

        modules
    }

    fn cloudtrail_module(&self) -> Option<Module> {
        if !self.enable_cloudtrail {
            return None;
        }

        let mut attributes = Attributes::new();
        if self.consolidated_cloudtrail {
            attributes.insert("consolidated_trail", true);
        }
        if self.organization_integration {
            attributes.insert("is_organization_trail", true);
        }
        attributes.insert_some("cloudtrail_name", non_empty(self.cloudtrail_name.as_deref()));

        if let Some(arn) = non_empty(self.existing_cloudtrail_bucket_arn.as_deref()) {
            attributes.insert("use_existing_cloudtrail", true);
            attributes.insert("bucket_arn", arn);
        }
        if self.force_destroy_bucket {
            attributes.insert("bucket_force_destroy", true);
        }
        if let Some(arn) = non_empty(self.existing_sns_topic_arn.as_deref()) {
            attributes.insert("use_existing_sns_topic", true);
            attributes.insert("sns_topic_arn", arn);
        }

        if provided(&self.existing_iam_role).is_some() {
            self.iam_role_attributes(&mut attributes);
        } else if self.account_config() {
            debug!("Sharing the IAM role of {}", CONFIG_MODULE);
            attributes.insert("use_existing_iam_role", true);
            attributes.insert("iam_role_name", Traversal::module_output(CONFIG_MODULE, "iam_role_name"));
            attributes.insert("iam_role_arn", Traversal::module_output(CONFIG_MODULE, "iam_role_arn"));
            attributes.insert("iam_role_external_id", Traversal::module_output(CONFIG_MODULE, "external_id"));
        }

        attributes.insert_some(
            "lacework_integration_name",
            non_empty(self.cloudtrail_integration_name.as_deref()),
        );
        attributes.insert_some("prefix", non_empty(self.prefix.as_deref()));
        attributes.insert_some("wait_time", non_empty(self.wait_time.as_deref()));

        let module = Module::new(CLOUDTRAIL_MODULE, AWS_CLOUDTRAIL_SOURCE)
            .with_version(AWS_CLOUDTRAIL_VERSION)
            .with_attributes(attributes);
        Some(self.bind_main(module))
    }

    fn agentless_modules(&self) -> Vec<Module> {
        if !self.enable_agentless {
            return Vec::new();
        }

        let mut attributes = Attributes::new().with("global", true).with("regional", true);
        attributes.insert_some(
            "lacework_integration_name",
            non_empty(self.agentless_integration_name.as_deref()),
        );
        let global = Module::new(AGENTLESS_GLOBAL_MODULE, AWS_AGENTLESS_SOURCE)
            .with_version(AWS_AGENTLESS_VERSION)
            .with_attributes(attributes);

        let mut modules = vec![self.bind_main(global)];
        for account in &self.sub_accounts {
            let alias = account.alias();
            debug!("Adding regional agentless scanning for {}", alias);
            let attributes = Attributes::new()
                .with("regional", true)
                .with("global_module_reference", Traversal::module(AGENTLESS_GLOBAL_MODULE));
            modules.push(
                Module::new(format!("lacework_aws_agentless_scanning_region_{}", alias), AWS_AGENTLESS_SOURCE)
                    .with_version(AWS_AGENTLESS_VERSION)
                    .with_attributes(attributes)
                    .with_provider_alias("aws", Traversal::provider("aws", alias)),
            );
        }

        modules
    }

    fn validate_sub_accounts(&self) -> GenerateResult<()> {
        if !self.multi_account() {
            return Ok(());
        }
        if non_empty(self.aws_profile.as_deref()).is_none() {
            return Err(GenerateError::invalid(
                "a main AWS profile must be set when using sub-accounts",
            ));
        }

        let mut seen = HashSet::new();
        for account in &self.sub_accounts {
            if account.profile.is_empty() || account.region.is_empty() {
                return Err(GenerateError::invalid(
                    "each sub-account requires a profile and a region",
                ));
            }

            let alias = account.alias();
            if alias == MAIN_ALIAS {
                return Err(GenerateError::invalid(format!(
                    "sub-account alias {:?} is reserved for the main account",
                    alias
                )));
            }
            if !is_identifier(alias) {
                return Err(GenerateError::invalid(format!(
                    "sub-account alias {:?} is not a valid identifier",
                    alias
                )));
            }
            if !seen.insert(alias) {
                return Err(GenerateError::invalid(format!(
                    "sub-account alias {:?} is used more than once",
                    alias
                )));
            }
        }

        Ok(())
    }
}

impl TerraformGenerator for AwsArgs {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Aws
    }

    fn validate(&self) -> GenerateResult<()> {
        if !self.enable_config && !self.enable_cloudtrail && !self.enable_agentless {
            return Err(GenerateError::invalid(
                "config, cloudtrail or agentless integration must be enabled",
            ));
        }

        if non_empty(self.aws_region.as_deref()).is_none() {
            return Err(GenerateError::invalid("an AWS region must be set"));
        }

        require_together(
            self.organization_integration,
            self.organization_id.as_deref(),
            "an Organization ID must be provided for an Organization Integration",
            "to provide an Organization ID, Organization Integration must be true",
        )?;
        if !self.organization_units.is_empty() && !self.organization_integration {
            return Err(GenerateError::invalid(
                "organizational units require an Organization Integration",
            ));
        }

        if let Some(role) = provided(&self.existing_iam_role) {
            if !role.is_complete() {
                return Err(GenerateError::invalid(
                    "when using an existing IAM role, the name, ARN and external ID must all be provided",
                ));
            }
        }

        self.validate_sub_accounts()?;

        if self.consolidated_cloudtrail && !self.enable_cloudtrail {
            return Err(GenerateError::invalid(
                "a consolidated CloudTrail requires the CloudTrail integration",
            ));
        }

        if self.force_destroy_bucket && non_empty(self.existing_cloudtrail_bucket_arn.as_deref()).is_some() {
            return Err(GenerateError::invalid(
                "bucket force destroy cannot be used with an existing CloudTrail bucket",
            ));
        }

        Ok(())
    }

    fn build(&self) -> HclResult<Document> {
        let modules = self
            .config_modules()
            .into_iter()
            .chain(self.cloudtrail_module())
            .chain(self.agentless_modules())
            .map(|module| module.to_block())
            .collect::<HclResult<Vec<_>>>()?;
        debug!("Generated {} AWS modules", modules.len());

        Ok(Document::new()
            .add(required_providers()?)
            .add(self.aws_providers()?)
            .add(lacework_provider(self.lacework_profile.as_deref())?)
            .add(modules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invalid_message(args: &AwsArgs) -> String {
        match args.generate() {
            Err(GenerateError::InvalidInputs(message)) => message,
            other => panic!("expected invalid inputs, got {:?}", other),
        }
    }

    #[test]
    fn test_config_and_cloudtrail() {
        let hcl = AwsArgs::new(true, true).with_aws_region("us-east-2").generate().unwrap();

        let expected = r#"provider "aws" {
  region = "us-east-2"
}

module "aws_config" {
  source  = "lacework/config/aws"
  version = "~> 0.5"
}

module "main_cloudtrail" {
  source                = "lacework/cloudtrail/aws"
  version               = "~> 2.0"
  iam_role_arn          = module.aws_config.iam_role_arn
  iam_role_external_id  = module.aws_config.external_id
  iam_role_name         = module.aws_config.iam_role_name
  use_existing_iam_role = true
}
"#;
        assert!(hcl.starts_with("terraform {\n"));
        assert!(hcl.ends_with(expected), "{}", hcl);
    }

    #[test]
    fn test_cloudtrail_only_has_no_iam_reference() {
        let hcl = AwsArgs::new(false, true)
            .with_aws_region("us-east-2")
            .with_existing_cloudtrail_bucket_arn("arn:aws:s3:::bucket")
            .with_existing_sns_topic_arn("arn:aws:sns:::topic")
            .generate()
            .unwrap();

        let expected = r#"module "main_cloudtrail" {
  source                  = "lacework/cloudtrail/aws"
  version                 = "~> 2.0"
  bucket_arn              = "arn:aws:s3:::bucket"
  sns_topic_arn           = "arn:aws:sns:::topic"
  use_existing_cloudtrail = true
  use_existing_sns_topic  = true
}
"#;
        assert!(hcl.ends_with(expected), "{}", hcl);
        assert!(!hcl.contains("module.aws_config"));
    }

    #[test]
    fn test_existing_iam_role_is_literal() {
        let hcl = AwsArgs::new(true, true)
            .with_aws_region("us-east-2")
            .with_existing_iam_role(ExistingIamRole::new("lw-role", "arn:aws:iam::123:role/lw", "abc"))
            .generate()
            .unwrap();

        assert_eq!(hcl.matches("iam_role_name         = \"lw-role\"").count(), 2);
        assert!(!hcl.contains("module.aws_config.iam_role_name"));
    }

    #[test]
    fn test_sub_accounts() {
        let hcl = AwsArgs::new(true, true)
            .with_aws_region("us-east-2")
            .with_aws_profile("main-profile")
            .with_consolidated_cloudtrail(true)
            .with_sub_accounts(vec![
                SubAccount::new("dev", "us-west-1"),
                SubAccount::new("prod-profile", "us-west-2").with_alias("prod"),
            ])
            .generate()
            .unwrap();

        assert!(hcl.contains(
            r#"provider "aws" {
  alias   = "main"
  profile = "main-profile"
  region  = "us-east-2"
}

provider "aws" {
  alias   = "dev"
  profile = "dev"
  region  = "us-west-1"
}

provider "aws" {
  alias   = "prod"
  profile = "prod-profile"
  region  = "us-west-2"
}
"#
        ));
        assert!(hcl.contains(
            r#"module "aws_config" {
  source  = "lacework/config/aws"
  version = "~> 0.5"
  providers = {
    aws = aws.main
  }
}
"#
        ));
        assert!(hcl.contains(
            r#"module "aws_config_prod" {
  source  = "lacework/config/aws"
  version = "~> 0.5"
  providers = {
    aws = aws.prod
  }
}
"#
        ));
        assert!(hcl.contains("  consolidated_trail    = true\n"));
    }

    #[test]
    fn test_organization_config() {
        let hcl = AwsArgs::new(true, true)
            .with_aws_region("us-east-2")
            .with_organization_integration(true)
            .with_organization_id("o-123")
            .with_organization_units(["ou-abc"])
            .generate()
            .unwrap();

        assert!(hcl.contains(
            r#"module "aws_org_configuration" {
  source            = "lacework/org-configuration/aws"
  version           = "~> 0.1"
  organization_id   = "o-123"
  organization_unit = ["ou-abc"]
}
"#
        ));
        assert!(hcl.contains("is_organization_trail = true"));
        assert!(!hcl.contains("module.aws_config."));
    }

    #[test]
    fn test_agentless_fan_out() {
        let hcl = AwsArgs::new(false, false)
            .with_agentless(true)
            .with_aws_region("us-east-2")
            .with_aws_profile("main")
            .with_sub_accounts(vec![SubAccount::new("dev", "us-west-1")])
            .generate()
            .unwrap();

        assert!(hcl.contains(
            r#"module "lacework_aws_agentless_scanning_global" {
  source   = "lacework/agentless-scanning/aws"
  version  = "~> 0.6"
  global   = true
  regional = true
  providers = {
    aws = aws.main
  }
}
"#
        ));
        assert!(hcl.contains(
            r#"module "lacework_aws_agentless_scanning_region_dev" {
  source                  = "lacework/agentless-scanning/aws"
  version                 = "~> 0.6"
  global_module_reference = module.lacework_aws_agentless_scanning_global
  regional                = true
  providers = {
    aws = aws.dev
  }
}
"#
        ));
    }

    #[test]
    fn test_requires_an_integration_and_region() {
        assert_eq!(
            invalid_message(&AwsArgs::new(false, false)),
            "config, cloudtrail or agentless integration must be enabled"
        );
        assert_eq!(invalid_message(&AwsArgs::new(true, false)), "an AWS region must be set");
    }

    #[test]
    fn test_organization_pair() {
        let args = AwsArgs::new(true, false)
            .with_aws_region("us-east-2")
            .with_organization_integration(true);
        assert_eq!(
            invalid_message(&args),
            "an Organization ID must be provided for an Organization Integration"
        );

        let args = AwsArgs::new(true, false)
            .with_aws_region("us-east-2")
            .with_organization_id("o-123");
        assert_eq!(
            invalid_message(&args),
            "to provide an Organization ID, Organization Integration must be true"
        );
    }

    #[test]
    fn test_sub_account_rules() {
        let base = AwsArgs::new(true, false).with_aws_region("us-east-2");

        let args = base.clone().with_sub_accounts(vec![SubAccount::new("dev", "us-west-1")]);
        assert!(invalid_message(&args).contains("main AWS profile"));

        let args = base
            .clone()
            .with_aws_profile("default")
            .with_sub_accounts(vec![SubAccount::new("dev", "")]);
        assert!(invalid_message(&args).contains("profile and a region"));

        let args = base
            .clone()
            .with_aws_profile("default")
            .with_sub_accounts(vec![SubAccount::new("main", "us-west-1")]);
        assert!(invalid_message(&args).contains("reserved"));

        let args = base.with_aws_profile("default").with_sub_accounts(vec![
            SubAccount::new("dev", "us-west-1"),
            SubAccount::new("dev", "us-west-2"),
        ]);
        assert!(invalid_message(&args).contains("more than once"));
    }

    #[test]
    fn test_cloudtrail_conflicts() {
        let args = AwsArgs::new(true, false)
            .with_aws_region("us-east-2")
            .with_consolidated_cloudtrail(true);
        assert!(invalid_message(&args).contains("consolidated"));

        let args = AwsArgs::new(false, true)
            .with_aws_region("us-east-2")
            .with_force_destroy_bucket(true)
            .with_existing_cloudtrail_bucket_arn("arn:aws:s3:::bucket");
        assert!(invalid_message(&args).contains("force destroy"));
    }

    #[test]
    fn test_empty_iam_role_is_ignored() {
        let hcl = AwsArgs::new(true, true)
            .with_aws_region("us-east-2")
            .with_existing_iam_role(ExistingIamRole::default())
            .generate()
            .unwrap();

        assert!(hcl.contains("iam_role_name         = module.aws_config.iam_role_name"));
        assert!(!hcl.contains("iam_role_name         = \"\""));
    }

    #[test]
    fn test_incomplete_iam_role() {
        let args = AwsArgs::new(true, false)
            .with_aws_region("us-east-2")
            .with_existing_iam_role(ExistingIamRole::new("role", "", "id"));
        assert!(invalid_message(&args).contains("existing IAM role"));
    }
}
