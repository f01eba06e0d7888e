//! # lw_hcl
//!
//! A small HCL model for generating Terraform configuration.
//!
//! This crate covers exactly what the Lacework generators need: encoding
//! native values into HCL expressions, attribute sets with deterministic
//! ordering, builders for `terraform`, `provider`, `module` and `resource`
//! blocks, and a document composer that renders canonical text.
//!
//! ## Example
//!
//! ```rust
//! use lw_hcl::{Attributes, Document, Module, Provider, Traversal};
//!
//! let config = Module::new("gcp_project_level_config", "lacework/config/gcp")
//!     .with_version("~> 2.3");
//! let audit_log = Module::new("gcp_project_audit_log", "lacework/audit-log/gcp")
//!     .with_version("~> 3.0")
//!     .with_attributes(
//!         Attributes::new()
//!             .with("use_existing_service_account", true)
//!             .with("service_account_name", config.output("service_account_name")),
//!     );
//!
//! let document = Document::new()
//!     .add(Provider::new("google").to_block()?)
//!     .add(config.to_block()?)
//!     .add(audit_log.to_block()?);
//!
//! assert!(document
//!     .render()
//!     .contains("service_account_name         = module.gcp_project_level_config.service_account_name"));
//! # Ok::<(), lw_hcl::HclError>(())
//! ```

pub mod attributes;
pub mod block;
pub mod document;
pub mod encode;
pub mod error;
mod format;
pub mod ident;
pub mod structure;
pub mod value;

pub use attributes::Attributes;
pub use block::{Module, Provider, RequiredProvider, RequiredProviders, Resource};
pub use document::{combine, render, Document, IntoBlocks};
pub use encode::{encode, encode_inline, quote, Tokens};
pub use error::{HclError, HclResult};
pub use ident::is_identifier;
pub use structure::{Attribute, Block, Body, Structure};
pub use value::{Object, RawExpr, Traversal, Value};
