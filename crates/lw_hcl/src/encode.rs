//! Encoding of values into expression tokens.

use crate::error::HclResult;
use crate::ident::is_identifier;
use crate::value::Value;

/// The encoded right-hand side of an attribute, ready to follow `name = `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokens {
    /// Fits on the attribute's line.
    Inline(String),
    /// A non-empty object spanning several lines. Keys are already rendered.
    Object(Vec<(String, Tokens)>),
}

impl Tokens {
    pub fn is_inline(&self) -> bool {
        matches!(self, Tokens::Inline(_))
    }
}

/// Encode a value for use as an attribute value.
///
/// Non-empty objects stay multi-line; everything else is inline.
pub fn encode(value: &Value) -> HclResult<Tokens> {
    match value {
        Value::Object(object) if !object.is_empty() => {
            let entries = object
                .iter()
                .map(|(key, value)| Ok((object_key(key), encode(value)?)))
                .collect::<HclResult<Vec<_>>>()?;
            Ok(Tokens::Object(entries))
        }
        other => encode_inline(other).map(Tokens::Inline),
    }
}

/// Encode a value onto a single line.
pub fn encode_inline(value: &Value) -> HclResult<String> {
    let encoded = match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::List(items) => {
            let items = items
                .iter()
                .map(encode_inline)
                .collect::<HclResult<Vec<_>>>()?;
            format!("[{}]", items.join(", "))
        }
        Value::Object(object) if object.is_empty() => "{}".to_string(),
        Value::Object(object) => {
            let entries = object
                .iter()
                .map(|(key, value)| Ok(format!("{} = {}", object_key(key), encode_inline(value)?)))
                .collect::<HclResult<Vec<_>>>()?;
            format!("{{ {} }}", entries.join(", "))
        }
        Value::Traversal(traversal) => {
            traversal.validate()?;
            traversal.to_string()
        }
        Value::Raw(raw) => raw.to_string(),
    };

    Ok(encoded)
}

/// Quote and escape a string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Template sequences would otherwise be interpolated by Terraform.
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c => out.push(c),
        }
    }

    out.push('"');
    out
}

fn object_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{RawExpr, Traversal};
    use std::collections::BTreeMap;

    #[test]
    fn test_encode_primitives() {
        assert_eq!(encode_inline(&Value::from(true)).unwrap(), "true");
        assert_eq!(encode_inline(&Value::from(30_i64)).unwrap(), "30");
        assert_eq!(encode_inline(&Value::from("project-1")).unwrap(), "\"project-1\"");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote("a\\b"), r#""a\\b""#);
        assert_eq!(quote("line\nbreak"), r#""line\nbreak""#);
        assert_eq!(quote("${var.x}"), r#""$${var.x}""#);
        assert_eq!(quote("%{ if }"), r#""%%{ if }""#);
        assert_eq!(quote("cost $5"), r#""cost $5""#);
    }

    #[test]
    fn test_encode_list_keeps_order() {
        let value = Value::from(vec!["folders/2", "folders/1"]);
        assert_eq!(encode_inline(&value).unwrap(), r#"["folders/2", "folders/1"]"#);
        assert_eq!(encode_inline(&Value::List(vec![])).unwrap(), "[]");
    }

    #[test]
    fn test_encode_traversal_and_raw() {
        let traversal = Value::from(Traversal::module_output("config", "service_account_name"));
        assert_eq!(
            encode(&traversal).unwrap(),
            Tokens::Inline("module.config.service_account_name".to_string())
        );

        let raw = Value::from(RawExpr::new("\"${each.value}\""));
        assert_eq!(encode_inline(&raw).unwrap(), "\"${each.value}\"");
    }

    #[test]
    fn test_encode_invalid_traversal() {
        let traversal = Value::from(Traversal::provider("aws", "not valid"));
        assert!(encode(&traversal).is_err());
    }

    #[test]
    fn test_encode_object() {
        let mut labels = BTreeMap::new();
        labels.insert("team", "security");
        labels.insert("app.io/name", "lacework");

        let tokens = encode(&Value::from(labels)).unwrap();
        assert_eq!(
            tokens,
            Tokens::Object(vec![
                (
                    "\"app.io/name\"".to_string(),
                    Tokens::Inline("\"lacework\"".to_string())
                ),
                ("team".to_string(), Tokens::Inline("\"security\"".to_string())),
            ])
        );

        let empty = Value::Object(BTreeMap::new());
        assert_eq!(encode(&empty).unwrap(), Tokens::Inline("{}".to_string()));
    }
}
