//! Consumers of the decode event stream.
//!
//! Renderers must not assume that a `#<id>` reference resolves to an item
//! that was already emitted.

mod document;
mod xml;

pub use document::{build_nodes, ArrayNode, Document, InstanceNode, MemberNode, MemberValue, Node, StructNode};
pub use xml::XmlRenderer;
