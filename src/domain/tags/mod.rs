//! Tag system: registry of custom content tags and the body transformer

pub mod node;
pub mod parser;
pub mod registry;
pub mod transform;

pub use node::{AttrValue, Attributes, Element, RenderNode};
pub use registry::{AttributeSpec, AttributeType, TagDefinition, TagRegistry};
pub use transform::Transformer;
