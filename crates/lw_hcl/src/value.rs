//! Values that can be assigned to HCL attributes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use indexmap::IndexMap;

use crate::error::{HclError, HclResult};
use crate::ident::is_identifier;

/// Object entries. Keys are kept sorted so rendering is deterministic.
pub type Object = BTreeMap<String, Value>;

/// Any value an attribute can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A boolean literal.
    Bool(bool),
    /// An integer literal.
    Number(i64),
    /// A quoted string.
    String(String),
    /// An inline list, e.g. `["a", "b"]`.
    List(Vec<Value>),
    /// An object or string map, rendered one entry per line.
    Object(Object),
    /// A reference to another block's value, e.g. `module.config.name`.
    Traversal(Traversal),
    /// Pre-formatted expression text, emitted verbatim.
    Raw(RawExpr),
}

impl Value {
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A dotted identifier chain such as `module.gcp_project_level_config.service_account_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Traversal(Vec<String>);

impl Traversal {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Reference to an aliased provider configuration, `<provider>.<alias>`.
    ///
    /// The alias is kept as a single segment even if it contains dots, so a
    /// bad alias fails validation instead of silently changing meaning.
    pub fn provider(provider: &str, alias: &str) -> Self {
        Self::new([provider, alias])
    }

    /// Reference to a whole module, `module.<name>`.
    pub fn module(name: &str) -> Self {
        Self::new(["module", name])
    }

    /// Reference to a module output, `module.<name>.<output>`.
    pub fn module_output(name: &str, output: &str) -> Self {
        Self::new(["module", name, output])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check that the traversal has at least one segment and every segment is an identifier.
    pub fn validate(&self) -> HclResult<()> {
        if self.0.is_empty() {
            return Err(HclError::InvalidTraversal("empty traversal".to_string()));
        }

        match self.0.iter().find(|segment| !is_identifier(segment)) {
            Some(segment) => Err(HclError::InvalidTraversal(format!(
                "segment {:?} of `{}` is not an identifier",
                segment, self
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Expression text that bypasses quoting and escaping.
///
/// Used for syntax the other value kinds cannot express, such as
/// `"${each.value}"` templates or function calls like `toset([...])`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawExpr(String);

impl RawExpr {
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Traversal> for Value {
    fn from(traversal: Traversal) -> Self {
        Value::Traversal(traversal)
    }
}

impl From<RawExpr> for Value {
    fn from(raw: RawExpr) -> Self {
        Value::Raw(raw)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<&[T]> for Value
where
    T: Clone + Into<Value>,
{
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<K, V> From<BTreeMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Object(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> From<HashMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(map: HashMap<K, V>) -> Self {
        Value::Object(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> From<IndexMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(map: IndexMap<K, V>) -> Self {
        Value::Object(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
