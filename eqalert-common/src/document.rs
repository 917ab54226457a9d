//! Generic bulletin document tree
//!
//! Bulletins arrive as markup that has already been converted into nested
//! key/value form. Repeated sibling elements collapse into a sequence while a
//! lone element stays a single node, so the same field can appear in either
//! shape. Every traversal goes through [`Value::as_sequence`] to treat both
//! uniformly.

use std::collections::BTreeMap;

use crate::{Error, Result};

/// A field value inside a [`Node`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Scalar text content
    Text(String),
    /// Single child element
    Node(Node),
    /// Repeated child elements in document order
    Sequence(Vec<Value>),
}

impl Value {
    /// View this value as a sequence: a bare value is a one-element sequence
    pub fn as_sequence(&self) -> &[Value] {
        match self {
            Value::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Scalar text, if this value is a scalar
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Child element, if this value is a single node
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// One element of the document tree; keys are unique per level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    fields: BTreeMap<String, Value>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful for tests and parsers
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Follow a path of keys through single child nodes
    ///
    /// Returns `None` if any key is absent or an intermediate value is not a
    /// single node.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut node = self;
        for key in parents {
            node = node.get(key)?.as_node()?;
        }
        node.get(last)
    }

    /// Like [`Node::lookup`] but reports the full path when absent
    pub fn require(&self, path: &[&str]) -> Result<&Value> {
        self.lookup(path).ok_or_else(|| Error::missing(path))
    }

    /// Scalar text at `path`, or `None` if absent or not a scalar
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path).and_then(Value::as_text)
    }

    /// Scalar text at `path`, failing with `MissingField` if absent
    pub fn require_text(&self, path: &[&str]) -> Result<&str> {
        self.text_at(path).ok_or_else(|| Error::missing(path))
    }

    /// Child node at `path`, failing with `MissingField` if absent
    pub fn require_node(&self, path: &[&str]) -> Result<&Node> {
        self.require(path)?
            .as_node()
            .ok_or_else(|| Error::missing(path))
    }
}

/// Turns raw bulletin text into a [`Node`] tree
///
/// Implementations own the markup format; normalizers only ever see the
/// resulting tree.
pub trait DocumentParser {
    fn parse(&self, text: &str) -> Result<Node>;
}

/// Parser for bulletins already converted to dict-style JSON
///
/// Attributes (`@name`) and element text (`#text`) are ordinary keys. Numbers
/// and booleans become text and `null` fields are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentParser;

impl DocumentParser for JsonDocumentParser {
    fn parse(&self, text: &str) -> Result<Node> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        match from_json(json) {
            Some(Value::Node(node)) => Ok(node),
            _ => Err(Error::Parse("document root must be an object".to_string())),
        }
    }
}

/// Convert a JSON value into a tree value; `null` yields `None`
pub fn from_json(json: serde_json::Value) -> Option<Value> {
    use serde_json::Value as Json;

    match json {
        Json::Null => None,
        Json::Bool(b) => Some(Value::Text(b.to_string())),
        Json::Number(n) => Some(Value::Text(n.to_string())),
        Json::String(s) => Some(Value::Text(s)),
        Json::Array(items) => Some(Value::Sequence(
            items.into_iter().filter_map(from_json).collect(),
        )),
        Json::Object(map) => {
            let mut node = Node::new();
            for (key, value) in map {
                if let Some(value) = from_json(value) {
                    node.insert(key, value);
                }
            }
            Some(Value::Node(node))
        }
    }
}
