//! Tag-marker scanning
//!
//! Custom tags are authored as Markdoc-style markers on their own lines:
//!
//! ```text
//! {% callout type="warning" title="Heads up" %}
//! Body markdown...
//! {% /callout %}
//!
//! {% integration-flow /%}
//! ```
//!
//! This stage splits a document body into a block tree: tag blocks (name,
//! attribute literals, children) over runs of plain markdown text. It knows
//! nothing about the tag registry; unknown names parse like any other tag and
//! are handled downstream. Marker lines inside fenced code blocks are left
//! alone.

use crate::domain::tags::node::{AttrValue, Attributes};
use crate::error::{DocweaveError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// One block of a document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A run of plain markdown lines.
    Markdown(String),
    /// A custom tag with its attribute literals and nested blocks.
    Tag {
        name: String,
        attributes: Attributes,
        children: Vec<Block>,
    },
}

fn marker_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\s*\{%.*%\}\s*$").unwrap())
}

fn close_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\s*\{%\s*/([a-zA-Z][a-zA-Z0-9_-]*)\s*%\}\s*$").unwrap())
}

fn open_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // The attribute segment is captured permissively (quoted values may
        // contain any character, including %); parse_attributes does the
        // actual lexing.
        Regex::new(r"^\s*\{%\s*([a-zA-Z][a-zA-Z0-9_-]*)(.*?)\s*(/)?%\}\s*$").unwrap()
    })
}

/// Matches one `key=value` attribute literal: quoted string, JSON array,
/// boolean, number, or bare word.
fn attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r#"([a-zA-Z_][a-zA-Z0-9_-]*)\s*=\s*("(?:[^"\\]|\\.)*"|\[[^\]]*\]|true|false|-?\d+(?:\.\d+)?|[^\s]+)"#,
        )
        .unwrap()
    })
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn parse_value(literal: &str) -> Result<AttrValue> {
    if let Some(rest) = literal.strip_prefix('"') {
        // An unterminated quote falls through the quoted-string alternative
        // of attribute_regex and arrives here as a bare word; reject it
        // rather than guessing at the author's intent.
        let Some(inner) = rest.strip_suffix('"') else {
            return Err(DocweaveError::MalformedTag(format!(
                "unterminated string literal: {}",
                literal
            )));
        };
        return Ok(AttrValue::String(unescape(inner)));
    }
    if literal.starts_with('[') {
        let json: serde_json::Value = serde_json::from_str(literal)
            .map_err(|e| DocweaveError::MalformedTag(format!("bad array literal: {}", e)))?;
        return Ok(json_to_attr(json));
    }
    match literal {
        "true" => return Ok(AttrValue::Bool(true)),
        "false" => return Ok(AttrValue::Bool(false)),
        _ => {}
    }
    if let Ok(i) = literal.parse::<i64>() {
        return Ok(AttrValue::Int(i));
    }
    if let Ok(f) = literal.parse::<f64>() {
        return Ok(AttrValue::Float(f));
    }
    Ok(AttrValue::String(literal.to_string()))
}

fn json_to_attr(value: serde_json::Value) -> AttrValue {
    match value {
        serde_json::Value::Null => AttrValue::String(String::new()),
        serde_json::Value::Bool(b) => AttrValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttrValue::Int(i)
            } else {
                AttrValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => AttrValue::String(s),
        serde_json::Value::Array(items) => {
            AttrValue::List(items.into_iter().map(json_to_attr).collect())
        }
        serde_json::Value::Object(map) => AttrValue::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_attr(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

fn parse_attributes(text: &str) -> Result<Attributes> {
    let mut attrs = Attributes::new();
    for caps in attribute_regex().captures_iter(text) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let literal = caps.get(2).map_or("", |m| m.as_str());
        attrs.insert(name.to_string(), parse_value(literal)?);
    }
    Ok(attrs)
}

struct Frame {
    name: String,
    attributes: Attributes,
    children: Vec<Block>,
}

fn flush_markdown(markdown: &mut String, stack: &mut [Frame], root: &mut Vec<Block>) {
    if markdown.trim().is_empty() {
        markdown.clear();
        return;
    }
    let block = Block::Markdown(std::mem::take(markdown));
    match stack.last_mut() {
        Some(frame) => frame.children.push(block),
        None => root.push(block),
    }
}

/// Returns the fence marker (character and run length) if the line opens a
/// fenced code block.
fn fence_marker(trimmed: &str) -> Option<(char, usize)> {
    let ch = trimmed.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}

/// Parse a document body into a block tree. Unbalanced or malformed markers
/// are fatal for the document.
pub fn parse_blocks(body: &str) -> Result<Vec<Block>> {
    let mut root: Vec<Block> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut markdown = String::new();
    // Fence character and marker length of the open fenced code block, if any.
    let mut fence: Option<(char, usize)> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();
        if let Some((ch, len)) = fence {
            // Only a run of the same character at least as long as the
            // opening marker, with nothing after it, closes the fence.
            let run = trimmed.chars().take_while(|&c| c == ch).count();
            if run >= len && trimmed[run..].trim().is_empty() {
                fence = None;
            }
            markdown.push_str(line);
            markdown.push('\n');
            continue;
        }
        if let Some(marker) = fence_marker(trimmed) {
            fence = Some(marker);
            markdown.push_str(line);
            markdown.push('\n');
            continue;
        }

        if !marker_regex().is_match(line) {
            markdown.push_str(line);
            markdown.push('\n');
            continue;
        }

        flush_markdown(&mut markdown, &mut stack, &mut root);

        if let Some(caps) = close_regex().captures(line) {
            let name = caps[1].to_string();
            let frame = stack
                .pop()
                .ok_or_else(|| DocweaveError::UnexpectedClose(name.clone()))?;
            if frame.name != name {
                return Err(DocweaveError::MismatchedTag {
                    expected: frame.name,
                    found: name,
                });
            }
            let block = Block::Tag {
                name: frame.name,
                attributes: frame.attributes,
                children: frame.children,
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push(block),
                None => root.push(block),
            }
        } else if let Some(caps) = open_regex().captures(line) {
            let name = caps[1].to_string();
            let attributes = parse_attributes(caps.get(2).map_or("", |m| m.as_str()))?;
            let self_closing = caps.get(3).is_some();
            if self_closing {
                let block = Block::Tag {
                    name,
                    attributes,
                    children: Vec::new(),
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(block),
                    None => root.push(block),
                }
            } else {
                stack.push(Frame {
                    name,
                    attributes,
                    children: Vec::new(),
                });
            }
        } else {
            return Err(DocweaveError::MalformedTag(line.trim().to_string()));
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(DocweaveError::UnclosedTag(frame.name));
    }

    flush_markdown(&mut markdown, &mut stack, &mut root);
    Ok(root)
}
