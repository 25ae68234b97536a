use std::fmt;

/// Identifier of a queued decode item. Rendered as `#<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefId(pub u64);

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One step of a decoded instance, in output order.
///
/// Every `*Start` is matched by its `*End`. A `Member` carries a scalar or a
/// `#<id>` reference as text; a member whose type is a structure is instead
/// wrapped in `MemberStart`/`MemberEnd` around the nested structure events.
/// References may point forward to items that are emitted later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    StructStart {
        type_name: String,
        name: Option<String>,
        ref_id: Option<RefId>,
    },
    StructEnd,
    Member {
        name: String,
        value: String,
    },
    MemberStart {
        name: String,
    },
    MemberEnd,
    ArrayStart {
        ref_id: Option<RefId>,
    },
    /// Space-terminated scalar values of a primitive array.
    ArrayValues(String),
    ArrayEnd,
}

/// The events of one root instance, as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstance {
    pub name: String,
    pub events: Vec<DecodeEvent>,
}
