use serde::Serialize;

use crate::decode::{DecodeEvent, DecodedInstance};
use crate::error::{AdfError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub instances: Vec<InstanceNode>,
}

impl Document {
    pub fn from_instances(instances: &[DecodedInstance]) -> Result<Self> {
        let instances = instances
            .iter()
            .map(|instance| {
                Ok(InstanceNode {
                    root: instance.name.clone(),
                    items: build_nodes(&instance.events)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { instances })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceNode {
    pub root: String,
    /// Top-level items in id order.
    pub items: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Struct(StructNode),
    Array(ArrayNode),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructNode {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub members: Vec<MemberNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberNode {
    pub name: String,
    pub value: MemberValue,
}

/// Scalars and `#<id>` references are text; structure members nest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MemberValue {
    Text(String),
    Struct(StructNode),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<StructNode>,
}

enum Frame {
    Struct(StructNode),
    Member {
        name: String,
        value: Option<StructNode>,
    },
    Array(ArrayNode),
}

fn invalid(msg: &str) -> AdfError {
    AdfError::InvalidEventStream(msg.to_string())
}

/// Fold a balanced event sequence into top-level nodes.
pub fn build_nodes(events: &[DecodeEvent]) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for event in events {
        match event {
            DecodeEvent::StructStart {
                type_name,
                name,
                ref_id,
            } => {
                stack.push(Frame::Struct(StructNode {
                    type_name: type_name.clone(),
                    name: name.clone(),
                    id: ref_id.map(|id| id.to_string()),
                    members: Vec::new(),
                }));
            }
            DecodeEvent::StructEnd => {
                let node = match stack.pop() {
                    Some(Frame::Struct(node)) => node,
                    _ => return Err(invalid("struct end without struct start")),
                };
                match stack.last_mut() {
                    None => nodes.push(Node::Struct(node)),
                    Some(Frame::Member { value, .. }) if value.is_none() => *value = Some(node),
                    Some(Frame::Array(array)) => array.elements.push(node),
                    Some(_) => return Err(invalid("struct nested directly in a struct")),
                }
            }
            DecodeEvent::Member { name, value } => match stack.last_mut() {
                Some(Frame::Struct(parent)) => parent.members.push(MemberNode {
                    name: name.clone(),
                    value: MemberValue::Text(value.clone()),
                }),
                _ => return Err(invalid("member outside of a struct")),
            },
            DecodeEvent::MemberStart { name } => {
                if !matches!(stack.last(), Some(Frame::Struct(_))) {
                    return Err(invalid("member outside of a struct"));
                }
                stack.push(Frame::Member {
                    name: name.clone(),
                    value: None,
                });
            }
            DecodeEvent::MemberEnd => {
                let (name, value) = match stack.pop() {
                    Some(Frame::Member {
                        name,
                        value: Some(value),
                    }) => (name, value),
                    _ => return Err(invalid("member end without a nested struct")),
                };
                if let Some(Frame::Struct(parent)) = stack.last_mut() {
                    parent.members.push(MemberNode {
                        name,
                        value: MemberValue::Struct(value),
                    });
                }
            }
            DecodeEvent::ArrayStart { ref_id } => {
                stack.push(Frame::Array(ArrayNode {
                    id: ref_id.map(|id| id.to_string()),
                    values: None,
                    elements: Vec::new(),
                }));
            }
            DecodeEvent::ArrayValues(text) => match stack.last_mut() {
                Some(Frame::Array(array)) => array.values = Some(text.clone()),
                _ => return Err(invalid("array values outside of an array")),
            },
            DecodeEvent::ArrayEnd => {
                let array = match stack.pop() {
                    Some(Frame::Array(array)) => array,
                    _ => return Err(invalid("array end without array start")),
                };
                if !stack.is_empty() {
                    return Err(invalid("arrays are only emitted at the top level"));
                }
                nodes.push(Node::Array(array));
            }
        }
    }

    if !stack.is_empty() {
        return Err(invalid("unterminated element at end of stream"));
    }
    Ok(nodes)
}
