//! Content transform
//!
//! Turns a raw document body into a renderable node tree. Tag blocks are
//! validated against the registry and transformed depth-first (children
//! before parent, so structural transforms see resolved children); plain
//! markdown runs are parsed with pulldown-cmark and mapped to default
//! element names. Pure: no I/O, deterministic for a given body and registry.

use crate::domain::tags::node::{AttrValue, Attributes, Element, RenderNode};
use crate::domain::tags::parser::{parse_blocks, Block};
use crate::domain::tags::registry::TagRegistry;
use crate::error::{DocweaveError, Result};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as MdParser, Tag};

/// Transforms document bodies using a shared tag registry.
pub struct Transformer<'a> {
    registry: &'a TagRegistry,
}

impl<'a> Transformer<'a> {
    pub fn new(registry: &'a TagRegistry) -> Self {
        Transformer { registry }
    }

    /// Transform a raw body into a renderable tree rooted at a `Document`
    /// element.
    pub fn transform(&self, body: &str) -> Result<RenderNode> {
        let blocks = parse_blocks(body)?;
        let mut document = Element::new("Document");
        document.children = self.transform_blocks(blocks)?;
        Ok(document.into())
    }

    fn transform_blocks(&self, blocks: Vec<Block>) -> Result<Vec<RenderNode>> {
        let mut nodes = Vec::new();
        for block in blocks {
            match block {
                Block::Markdown(text) => nodes.extend(markdown_nodes(&text)),
                Block::Tag {
                    name,
                    attributes,
                    children,
                } => nodes.push(self.transform_tag(&name, attributes, children)?),
            }
        }
        Ok(nodes)
    }

    fn transform_tag(
        &self,
        name: &str,
        attributes: Attributes,
        children: Vec<Block>,
    ) -> Result<RenderNode> {
        let children = self.transform_blocks(children)?;

        let Some(definition) = self.registry.get(name) else {
            // Unknown tag: inert fallback block so an authoring typo does not
            // take down the rest of the page.
            let mut element = Element::new("Fallback");
            element.attributes = attributes;
            element
                .attributes
                .insert("tag".to_string(), AttrValue::str(name));
            element.children = children;
            return Ok(element.into());
        };

        if definition.self_closing && !children.is_empty() {
            return Err(DocweaveError::MalformedTag(format!(
                "'{}' is self-closing and cannot have children",
                name
            )));
        }

        let attributes = definition.validate_attributes(name, attributes)?;
        let mut element = Element::new(definition.render);
        element.attributes = attributes;
        element.children = children;

        match definition.transform {
            Some(transform) => Ok(transform(element)?.into()),
            None => Ok(element.into()),
        }
    }
}

/// Parse one markdown run into renderable nodes with default element names.
fn markdown_nodes(text: &str) -> Vec<RenderNode> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = MdParser::new_ext(text, options);

    let mut root: Vec<RenderNode> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    let push = |node: RenderNode, stack: &mut Vec<Element>, root: &mut Vec<RenderNode>| {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => root.push(node),
        }
    };

    for event in parser {
        match event {
            Event::Start(tag) => stack.push(element_for(&tag)),
            Event::End(_) => {
                if let Some(mut element) = stack.pop() {
                    // Fences carry their text as a content attribute, not as
                    // child nodes.
                    if element.name == "CodeBlock" {
                        let content: String = element
                            .children
                            .iter()
                            .filter_map(RenderNode::as_text)
                            .collect();
                        element.children.clear();
                        element
                            .attributes
                            .insert("content".to_string(), AttrValue::String(content));
                    }
                    push(element.into(), &mut stack, &mut root);
                }
            }
            Event::Text(text) => push(RenderNode::text(text.to_string()), &mut stack, &mut root),
            Event::Code(code) => push(
                Element::new("InlineCode")
                    .with_attr("content", AttrValue::str(code.to_string()))
                    .into(),
                &mut stack,
                &mut root,
            ),
            Event::SoftBreak => push(RenderNode::text(" "), &mut stack, &mut root),
            Event::HardBreak => push(Element::new("LineBreak").into(), &mut stack, &mut root),
            Event::Rule => push(Element::new("HorizontalRule").into(), &mut stack, &mut root),
            Event::Html(html) | Event::InlineHtml(html) => {
                push(RenderNode::text(html.to_string()), &mut stack, &mut root)
            }
            _ => {}
        }
    }

    root
}

fn element_for(tag: &Tag) -> Element {
    match tag {
        Tag::Heading { level, .. } => {
            Element::new("Heading").with_attr("level", AttrValue::Int(*level as i64))
        }
        Tag::Paragraph => Element::new("Paragraph"),
        Tag::BlockQuote(_) => Element::new("Blockquote"),
        Tag::CodeBlock(kind) => {
            let language = match kind {
                CodeBlockKind::Fenced(lang) => lang.to_string(),
                CodeBlockKind::Indented => String::new(),
            };
            Element::new("CodeBlock").with_attr("language", AttrValue::String(language))
        }
        Tag::List(Some(start)) => Element::new("List")
            .with_attr("ordered", AttrValue::Bool(true))
            .with_attr("start", AttrValue::Int(*start as i64)),
        Tag::List(None) => Element::new("List").with_attr("ordered", AttrValue::Bool(false)),
        Tag::Item => Element::new("Item"),
        Tag::Emphasis => Element::new("Emphasis"),
        Tag::Strong => Element::new("Strong"),
        Tag::Strikethrough => Element::new("Strikethrough"),
        Tag::Link {
            dest_url, title, ..
        } => {
            let mut el = Element::new("Link").with_attr("href", AttrValue::str(dest_url.to_string()));
            if !title.is_empty() {
                el = el.with_attr("title", AttrValue::str(title.to_string()));
            }
            el
        }
        Tag::Image {
            dest_url, title, ..
        } => {
            let mut el = Element::new("Image").with_attr("src", AttrValue::str(dest_url.to_string()));
            if !title.is_empty() {
                el = el.with_attr("title", AttrValue::str(title.to_string()));
            }
            el
        }
        Tag::Table(_) => Element::new("Table"),
        Tag::TableHead => Element::new("TableHead"),
        Tag::TableRow => Element::new("TableRow"),
        Tag::TableCell => Element::new("TableCell"),
        _ => Element::new("Block"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tags::registry::{AttributeSpec, TagDefinition};

    fn transform(body: &str) -> Result<RenderNode> {
        let registry = TagRegistry::standard();
        Transformer::new(&registry).transform(body)
    }

    fn children(node: &RenderNode) -> &[RenderNode] {
        &node.as_element().unwrap().children
    }

    #[test]
    fn test_heading_and_paragraph() {
        let tree = transform("# Title\n\nSome text.\n").unwrap();
        let kids = children(&tree);
        assert_eq!(kids.len(), 2);
        let heading = kids[0].as_element().unwrap();
        assert_eq!(heading.name, "Heading");
        assert_eq!(heading.get_attr("level"), Some(&AttrValue::Int(1)));
        assert_eq!(heading.children[0].as_text(), Some("Title"));
        assert_eq!(kids[1].as_element().unwrap().name, "Paragraph");
    }

    #[test]
    fn test_fence_maps_to_code_block() {
        let tree = transform("```rust\nfn main() {}\n```\n").unwrap();
        let code = children(&tree)[0].as_element().unwrap();
        assert_eq!(code.name, "CodeBlock");
        assert_eq!(code.get_attr("language"), Some(&AttrValue::str("rust")));
        assert_eq!(
            code.get_attr("content"),
            Some(&AttrValue::str("fn main() {}\n"))
        );
        assert!(code.children.is_empty());
    }

    #[test]
    fn test_callout_default_type() {
        let tree = transform("{% callout %}\nRemember this.\n{% /callout %}\n").unwrap();
        let callout = children(&tree)[0].as_element().unwrap();
        assert_eq!(callout.name, "Callout");
        assert_eq!(callout.get_attr("type"), Some(&AttrValue::str("note")));
    }

    #[test]
    fn test_callout_bad_type_rejected() {
        let err = transform("{% callout type=\"scary\" %}\nx\n{% /callout %}\n").unwrap_err();
        assert!(matches!(err, DocweaveError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_tabs_labels_derived_from_children() {
        let body = "{% tabs labels=[\"stale\"] %}\n\
            {% tab label=\"A\" %}\nfirst\n{% /tab %}\n\
            {% tab label=\"B\" %}\nsecond\n{% /tab %}\n\
            {% tab label=\"C\" %}\nthird\n{% /tab %}\n\
            {% /tabs %}\n";
        let tree = transform(body).unwrap();
        let tabs = children(&tree)[0].as_element().unwrap();
        assert_eq!(tabs.name, "Tabs");
        let labels: Vec<_> = tabs
            .get_attr("labels")
            .unwrap()
            .as_list()
            .unwrap()
            .iter()
            .filter_map(AttrValue::as_str)
            .collect();
        assert_eq!(labels, ["A", "B", "C"]);
        assert_eq!(tabs.children.len(), 3);
    }

    #[test]
    fn test_tab_missing_label_fails_document() {
        let body = "{% tabs %}\n{% tab %}\nno label\n{% /tab %}\n{% /tabs %}\n";
        let err = transform(body).unwrap_err();
        assert!(
            matches!(err, DocweaveError::MissingAttribute { ref attribute, .. } if attribute == "label")
        );
    }

    #[test]
    fn test_unknown_tag_renders_fallback() {
        let body = "before\n\n{% mystery x=1 %}\ninner\n{% /mystery %}\n\nafter\n";
        let tree = transform(body).unwrap();
        let kids = children(&tree);
        assert_eq!(kids.len(), 3);
        let fallback = kids[1].as_element().unwrap();
        assert_eq!(fallback.name, "Fallback");
        assert_eq!(fallback.get_attr("tag"), Some(&AttrValue::str("mystery")));
        // Children of the unknown tag still transformed
        assert_eq!(fallback.children[0].as_element().unwrap().name, "Paragraph");
        // Surrounding content unaffected
        assert_eq!(kids[0].as_element().unwrap().name, "Paragraph");
        assert_eq!(kids[2].as_element().unwrap().name, "Paragraph");
    }

    #[test]
    fn test_api_code_samples_from_fences() {
        let body = "{% api-code endpoint=\"/v1/arrivals\" method=\"POST\" %}\n\
            ```curl\ncurl -X POST https://api.example.com/v1/arrivals\n```\n\
            ```python\nclient.arrivals.create()\n```\n\
            {% /api-code %}\n";
        let tree = transform(body).unwrap();
        let api = children(&tree)[0].as_element().unwrap();
        assert_eq!(api.name, "ApiCodeBlock");
        assert_eq!(api.get_attr("method"), Some(&AttrValue::str("POST")));
        let samples = api.get_attr("samples").unwrap().as_list().unwrap();
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_api_code_without_samples_fails() {
        let body = "{% api-code endpoint=\"/v1/x\" %}\nprose only\n{% /api-code %}\n";
        let err = transform(body).unwrap_err();
        assert!(matches!(err, DocweaveError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_integration_flow_self_closing() {
        let tree = transform("{% integration-flow /%}\n").unwrap();
        let flow = children(&tree)[0].as_element().unwrap();
        assert_eq!(flow.name, "IntegrationFlowDiagram");
        assert!(flow.children.is_empty());
    }

    #[test]
    fn test_integration_flow_rejects_children() {
        let body = "{% integration-flow %}\nbody\n{% /integration-flow %}\n";
        let err = transform(body).unwrap_err();
        assert!(matches!(err, DocweaveError::MalformedTag(_)));
    }

    #[test]
    fn test_sequence_diagram_requires_title() {
        let err = transform("{% sequence-diagram /%}\n").unwrap_err();
        assert!(
            matches!(err, DocweaveError::MissingAttribute { ref tag, .. } if tag == "sequence-diagram")
        );
    }

    #[test]
    fn test_transform_is_deterministic() {
        let body = "# A\n\n{% callout %}\nx\n{% /callout %}\n\n- one\n- two\n";
        let a = transform(body).unwrap();
        let b = transform(body).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_markdown_list_mapping() {
        let tree = transform("1. one\n2. two\n").unwrap();
        let list = children(&tree)[0].as_element().unwrap();
        assert_eq!(list.name, "List");
        assert_eq!(list.get_attr("ordered"), Some(&AttrValue::Bool(true)));
        assert_eq!(list.get_attr("start"), Some(&AttrValue::Int(1)));
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.children[0].as_element().unwrap().name, "Item");
    }

    #[test]
    fn test_fabricated_registry_injection() {
        let mut registry = TagRegistry::empty();
        registry.define(
            "hint",
            TagDefinition::new("Hint").attr("level", AttributeSpec::string().default_str("low")),
        );
        let transformer = Transformer::new(&registry);
        let tree = transformer
            .transform("{% hint %}\nhello\n{% /hint %}\n")
            .unwrap();
        let hint = children(&tree)[0].as_element().unwrap();
        assert_eq!(hint.name, "Hint");
        assert_eq!(hint.get_attr("level"), Some(&AttrValue::str("low")));

        // callout is unknown to this registry, so it falls back
        let tree = transformer
            .transform("{% callout %}\nx\n{% /callout %}\n")
            .unwrap();
        assert_eq!(
            children(&tree)[0].as_element().unwrap().name,
            "Fallback"
        );
    }
}
