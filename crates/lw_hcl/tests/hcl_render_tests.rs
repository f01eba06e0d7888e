//! Rendering tests across the public builder API.

use std::collections::HashMap;

use lw_hcl::{
    combine, encode_inline, render, Attributes, Block, Document, HclError, Module, Provider, RawExpr,
    RequiredProvider, RequiredProviders, Resource, Traversal, Value,
};
use pretty_assertions::assert_eq;

fn sample_document() -> Document {
    let mut tags = HashMap::new();
    tags.insert("zone", "b");
    tags.insert("app", "lacework");
    tags.insert("owner.team", "security");

    let config = Module::new("aws_config", "lacework/config/aws").with_version("~> 0.5");
    let cloudtrail = Module::new("main_cloudtrail", "lacework/cloudtrail/aws")
        .with_version("~> 2.0")
        .with_attributes(
            Attributes::new()
                .with("tags", tags)
                .with("iam_role_name", config.output("iam_role_name"))
                .with("consolidated_trail", true)
                .with("retention_days", 30_i64),
        );

    Document::new()
        .add(
            RequiredProviders::new()
                .with_provider(
                    RequiredProvider::new("lacework")
                        .with_source("lacework/lacework")
                        .with_version("~> 1.0"),
                )
                .to_block()
                .unwrap(),
        )
        .add(
            Provider::new("aws")
                .with_attributes(Attributes::new().with("region", "us-east-2"))
                .to_block()
                .unwrap(),
        )
        .add(config.to_block().unwrap())
        .add(cloudtrail.to_block().unwrap())
}

#[test]
fn test_full_document() {
    let expected = r#"terraform {
  required_providers {
    lacework = {
      source  = "lacework/lacework"
      version = "~> 1.0"
    }
  }
}

provider "aws" {
  region = "us-east-2"
}

module "aws_config" {
  source  = "lacework/config/aws"
  version = "~> 0.5"
}

module "main_cloudtrail" {
  source             = "lacework/cloudtrail/aws"
  version            = "~> 2.0"
  consolidated_trail = true
  iam_role_name      = module.aws_config.iam_role_name
  retention_days     = 30
  tags = {
    app          = "lacework"
    "owner.team" = "security"
    zone         = "b"
  }
}
"#;
    assert_eq!(sample_document().render(), expected);
}

#[test]
fn test_rendered_document_parses_back() {
    let body = hcl::parse(&sample_document().render()).unwrap();
    let blocks: Vec<String> = body.blocks().map(|block| block.identifier().to_string()).collect();
    assert_eq!(blocks, ["terraform", "provider", "module", "module"]);
}

#[test]
fn test_render_is_deterministic() {
    assert_eq!(sample_document().render(), sample_document().render());
}

#[test]
fn test_attribute_insertion_order_does_not_matter() {
    let forward = Provider::new("google")
        .with_attributes(Attributes::new().with("project", "p").with("credentials", "c"))
        .to_block()
        .unwrap();
    let backward = Provider::new("google")
        .with_attributes(Attributes::new().with("credentials", "c").with("project", "p"))
        .to_block()
        .unwrap();

    assert_eq!(forward.to_string(), backward.to_string());
}

#[test]
fn test_combine_and_render() {
    let google = Provider::new("google").to_block().unwrap();
    let blocks = combine(vec![None, Some(google.clone()), None]);

    assert_eq!(blocks, vec![google]);
    assert_eq!(render(&blocks), "provider \"google\" {}\n");
}

#[test]
fn test_string_escaping() {
    let block = Resource::new("null_resource", "escape")
        .with_attributes(
            Attributes::new()
                .with("template", "${var.x} and %{if}")
                .with("quoted", "say \"hi\"\n"),
        )
        .to_block()
        .unwrap();

    let expected = r#"resource "null_resource" "escape" {
  quoted   = "say \"hi\"\n"
  template = "$${var.x} and %%{if}"
}
"#;
    assert_eq!(block.to_string(), expected);
    assert!(hcl::parse(&block.to_string()).is_ok());
}

#[test]
fn test_raw_expression_built_from_inline_list() {
    let clusters = Value::from(vec!["a", "b"]);
    let for_each = RawExpr::new(format!("toset({})", encode_inline(&clusters).unwrap()));
    assert_eq!(for_each.as_str(), "toset([\"a\", \"b\"])");
}

#[test]
fn test_invalid_names_are_rejected() {
    let err = Provider::new("google")
        .with_attributes(Attributes::new().with("bad name", true))
        .to_block()
        .unwrap_err();
    assert!(matches!(err, HclError::InvalidIdentifier(_)));

    let err = Resource::new("aws_instance", "x")
        .with_depends_on(vec![Traversal::new(Vec::<String>::new())])
        .to_block()
        .unwrap_err();
    assert!(matches!(err, HclError::InvalidTraversal(_)));

    let err = Block::new("resource", ["only_type"]).unwrap_err();
    assert!(matches!(err, HclError::InvalidLabels { .. }));
}
