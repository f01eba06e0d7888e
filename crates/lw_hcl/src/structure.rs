//! Encoded blocks, the form the formatter renders.

use std::fmt;

use crate::attributes::Attributes;
use crate::encode::{encode, Tokens};
use crate::error::{HclError, HclResult};
use crate::format;
use crate::ident::validate_identifier;
use crate::value::Value;

/// An attribute whose value has already been encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    key: String,
    expr: Tokens,
}

impl Attribute {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn expr(&self) -> &Tokens {
        &self.expr
    }
}

/// Either an attribute or a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Structure {
    Attribute(Attribute),
    Block(Block),
}

/// Ordered contents of a block. Rendered exactly in push order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body(Vec<Structure>);

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and append a single attribute.
    pub fn push_attribute(&mut self, key: &str, value: &Value) -> HclResult<()> {
        validate_identifier(key)?;
        let expr = encode(value)?;
        self.0.push(Structure::Attribute(Attribute {
            key: key.to_string(),
            expr,
        }));
        Ok(())
    }

    /// Append every attribute of the set in ascending name order.
    pub fn push_attributes(&mut self, attributes: &Attributes) -> HclResult<()> {
        for (key, value) in attributes.sorted() {
            self.push_attribute(key, value)?;
        }
        Ok(())
    }

    pub fn push_block(&mut self, block: Block) {
        self.0.push(Structure::Block(block));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Structure> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A block such as `provider "google" { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    ident: String,
    labels: Vec<String>,
    body: Body,
}

impl Block {
    /// Create an empty block.
    ///
    /// Known Terraform block types are checked for the right number of labels.
    pub fn new<I, S>(ident: &str, labels: I) -> HclResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        validate_identifier(ident)?;
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if let Some(expected) = expected_labels(ident) {
            if labels.len() != expected {
                return Err(HclError::InvalidLabels {
                    ident: ident.to_string(),
                    expected,
                    found: labels.len(),
                });
            }
        }

        Ok(Self {
            ident: ident.to_string(),
            labels,
            body: Body::new(),
        })
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Look up a top-level attribute of this block.
    pub fn attribute(&self, key: &str) -> Option<&Tokens> {
        self.body.iter().find_map(|structure| match structure {
            Structure::Attribute(attr) if attr.key == key => Some(&attr.expr),
            _ => None,
        })
    }

    /// Nested blocks of this block.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.body.iter().filter_map(|structure| match structure {
            Structure::Block(block) => Some(block),
            Structure::Attribute(_) => None,
        })
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::render_block(self))
    }
}

fn expected_labels(ident: &str) -> Option<usize> {
    match ident {
        "terraform" | "required_providers" => Some(0),
        "provider" | "module" => Some(1),
        "resource" | "data" => Some(2),
        _ => None,
    }
}
