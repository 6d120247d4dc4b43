//! Tag schema registry
//!
//! A read-only table mapping custom tag names to a render target, a typed
//! attribute schema, and (for a few tags) a structural transform that runs
//! after the node's children have been transformed. Built once at startup
//! and passed by reference into the transformer, so tests can substitute
//! fabricated registries.

use crate::domain::tags::node::{AttrValue, Attributes, Element};
use crate::error::{DocweaveError, Result};
use std::collections::BTreeMap;

/// Expected type of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Int,
    Bool,
    Array,
}

impl AttributeType {
    fn accepts(&self, value: &AttrValue) -> bool {
        matches!(
            (self, value),
            (AttributeType::String, AttrValue::String(_))
                | (AttributeType::Int, AttrValue::Int(_))
                | (AttributeType::Bool, AttrValue::Bool(_))
                | (AttributeType::Array, AttrValue::List(_))
        )
    }

    fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int => "integer",
            AttributeType::Bool => "boolean",
            AttributeType::Array => "array",
        }
    }
}

/// Schema for one declared attribute of a tag.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub ty: AttributeType,
    pub required: bool,
    pub default: Option<AttrValue>,
    /// Enumerated allowed values (string attributes only). An out-of-range
    /// value is rejected at transform time, not passed through.
    pub allowed: Option<&'static [&'static str]>,
}

impl AttributeSpec {
    pub fn of(ty: AttributeType) -> Self {
        AttributeSpec {
            ty,
            required: false,
            default: None,
            allowed: None,
        }
    }

    pub fn string() -> Self {
        Self::of(AttributeType::String)
    }

    pub fn array() -> Self {
        Self::of(AttributeType::Array)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_str(mut self, value: &str) -> Self {
        self.default = Some(AttrValue::str(value));
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }
}

/// Pure post-processing hook: element with already-transformed children in,
/// possibly-modified element out.
pub type StructuralTransform = fn(Element) -> Result<Element>;

/// Definition of one custom tag.
#[derive(Debug, Clone)]
pub struct TagDefinition {
    /// Component name emitted for nodes of this tag.
    pub render: &'static str,
    pub attributes: BTreeMap<&'static str, AttributeSpec>,
    /// Self-closing tags may not have children.
    pub self_closing: bool,
    pub transform: Option<StructuralTransform>,
}

impl TagDefinition {
    pub fn new(render: &'static str) -> Self {
        TagDefinition {
            render,
            attributes: BTreeMap::new(),
            self_closing: false,
            transform: None,
        }
    }

    pub fn attr(mut self, name: &'static str, spec: AttributeSpec) -> Self {
        self.attributes.insert(name, spec);
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    pub fn with_transform(mut self, transform: StructuralTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Validate supplied attributes against this schema: type-check and
    /// enum-check what was supplied, substitute defaults, fail on missing
    /// required attributes. Unknown attributes pass through untouched.
    pub fn validate_attributes(&self, tag: &str, mut attrs: Attributes) -> Result<Attributes> {
        for (&name, spec) in &self.attributes {
            match attrs.get(name) {
                Some(value) => {
                    if !spec.ty.accepts(value) {
                        return Err(DocweaveError::InvalidAttribute {
                            tag: tag.to_string(),
                            attribute: name.to_string(),
                            reason: format!(
                                "expected {}, got {}",
                                spec.ty.name(),
                                value.type_name()
                            ),
                        });
                    }
                    if let (Some(allowed), Some(s)) = (spec.allowed, value.as_str()) {
                        if !allowed.contains(&s) {
                            return Err(DocweaveError::InvalidAttribute {
                                tag: tag.to_string(),
                                attribute: name.to_string(),
                                reason: format!(
                                    "'{}' is not one of: {}",
                                    s,
                                    allowed.join(", ")
                                ),
                            });
                        }
                    }
                }
                None => {
                    if let Some(default) = &spec.default {
                        attrs.insert(name.to_string(), default.clone());
                    } else if spec.required {
                        return Err(DocweaveError::MissingAttribute {
                            tag: tag.to_string(),
                            attribute: name.to_string(),
                        });
                    }
                }
            }
        }
        Ok(attrs)
    }
}

/// The process-wide tag table. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: BTreeMap<String, TagDefinition>,
}

impl TagRegistry {
    /// Empty registry, for tests that fabricate their own tag set.
    pub fn empty() -> Self {
        TagRegistry::default()
    }

    pub fn define(&mut self, name: &str, definition: TagDefinition) {
        self.tags.insert(name.to_string(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name)
    }

    /// The standard documentation tag set.
    pub fn standard() -> Self {
        let mut registry = TagRegistry::empty();

        registry.define(
            "callout",
            TagDefinition::new("Callout")
                .attr(
                    "type",
                    AttributeSpec::string()
                        .default_str("note")
                        .one_of(&["note", "warning", "info", "tip", "danger"]),
                )
                .attr("title", AttributeSpec::string()),
        );

        registry.define(
            "tabs",
            TagDefinition::new("Tabs")
                .attr("labels", AttributeSpec::array())
                .with_transform(derive_tab_labels),
        );

        registry.define(
            "tab",
            TagDefinition::new("Tab").attr("label", AttributeSpec::string().required()),
        );

        registry.define("table", TagDefinition::new("Table"));

        registry.define(
            "api-code",
            TagDefinition::new("ApiCodeBlock")
                .attr("endpoint", AttributeSpec::string())
                .attr("method", AttributeSpec::string().default_str("GET"))
                .attr("title", AttributeSpec::string())
                .attr("description", AttributeSpec::string())
                .attr("response", AttributeSpec::string())
                .attr("samples", AttributeSpec::array())
                .with_transform(derive_api_samples),
        );

        registry.define(
            "integration-flow",
            TagDefinition::new("IntegrationFlowDiagram").self_closing(),
        );

        registry.define(
            "sequence-diagram",
            TagDefinition::new("SequenceDiagram")
                .attr("title", AttributeSpec::string().required())
                .attr("participants", AttributeSpec::array())
                .attr("steps", AttributeSpec::array()),
        );

        registry
    }
}

/// Derive the `labels` attribute of a tabs node from the `label` of each
/// transformed child, in child order. Always overwrites an author-supplied
/// value so the tab strip cannot drift from the tab bodies.
fn derive_tab_labels(mut element: Element) -> Result<Element> {
    let labels: Vec<AttrValue> = element
        .children
        .iter()
        .filter_map(|child| child.as_element())
        .filter(|el| el.name == "Tab")
        .filter_map(|el| el.get_attr("label").cloned())
        .collect();

    element
        .attributes
        .insert("labels".to_string(), AttrValue::List(labels));
    Ok(element)
}

/// Derive `samples` for an api-code node from its child code blocks unless
/// the author supplied a samples array. The render target needs at least one
/// sample, so an empty result is a validation error.
fn derive_api_samples(mut element: Element) -> Result<Element> {
    let authored = element
        .get_attr("samples")
        .and_then(AttrValue::as_list)
        .is_some_and(|items| !items.is_empty());

    if !authored {
        let samples: Vec<AttrValue> = element
            .children
            .iter()
            .filter_map(|child| child.as_element())
            .filter(|el| el.name == "CodeBlock")
            .map(|el| {
                let language = el
                    .get_attr("language")
                    .and_then(AttrValue::as_str)
                    .unwrap_or("")
                    .to_string();
                let code = el
                    .get_attr("content")
                    .and_then(AttrValue::as_str)
                    .unwrap_or("")
                    .to_string();
                let mut sample = BTreeMap::new();
                sample.insert("language".to_string(), AttrValue::String(language.clone()));
                sample.insert("label".to_string(), AttrValue::String(language));
                sample.insert("code".to_string(), AttrValue::String(code));
                AttrValue::Map(sample)
            })
            .collect();

        if samples.is_empty() {
            return Err(DocweaveError::InvalidAttribute {
                tag: "api-code".to_string(),
                attribute: "samples".to_string(),
                reason: "requires at least one code sample (nested fence or samples attribute)"
                    .to_string(),
            });
        }

        element
            .attributes
            .insert("samples".to_string(), AttrValue::List(samples));
        // Sample sources are folded into the attribute; the rendered node
        // carries no separate children.
        element.children.clear();
    }

    Ok(element)
}
