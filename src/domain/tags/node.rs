//! Renderable node tree
//!
//! The transformer's output unit: a tree of named elements with validated
//! attributes, plus plain text leaves. Serialized as JSON for the renderer
//! (text nodes serialize as bare strings, elements as objects).

use serde::Serialize;
use std::collections::BTreeMap;

/// An attribute value on a renderable element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<AttrValue>),
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    pub fn str(s: impl Into<String>) -> Self {
        AttrValue::String(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable type name, used in validation error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::String(_) => "string",
            AttrValue::Int(_) => "integer",
            AttrValue::Float(_) => "float",
            AttrValue::Bool(_) => "boolean",
            AttrValue::List(_) => "list",
            AttrValue::Map(_) => "object",
        }
    }
}

/// Attribute map. Ordered so serialized output is deterministic.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A named element in the renderable tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}

/// A node in the renderable tree: a named element or a plain text leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderNode {
    Text(String),
    Element(Element),
}

impl RenderNode {
    pub fn text(s: impl Into<String>) -> Self {
        RenderNode::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            RenderNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderNode::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Element> for RenderNode {
    fn from(el: Element) -> Self {
        RenderNode::Element(el)
    }
}
