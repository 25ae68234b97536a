use num_derive::FromPrimitive;
use strum::Display;

/// On-disk discriminant of a type definition.
///
/// Only [`TypeKind::Structure`] and [`TypeKind::Array`] can be decoded;
/// the rest are parsed so that reaching them fails with a precise error.
#[derive(FromPrimitive, Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive = 0,
    Structure = 1,
    Pointer = 2,
    Array = 3,
    InlineArray = 4,
    String = 5,
    BitField = 7,
    Enumeration = 8,
    StringHash = 9,
}

/// One schema entry of a type library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub kind: TypeKind,
    /// Byte size of one instance. Trusted, never recomputed from members.
    pub size: u32,
    pub alignment: u32,
    pub name_hash: u32,
    pub name: String,
    pub flags: u32,
    /// Element type of `Array` kinds.
    pub element_type_hash: u32,
    pub element_length: u32,
    /// Declaration order, which is also output order.
    pub members: Vec<MemberDefinition>,
    pub enum_members: Vec<EnumMember>,
}

impl TypeDefinition {
    pub fn structure(name: &str, name_hash: u32, size: u32, members: Vec<MemberDefinition>) -> Self {
        Self {
            kind: TypeKind::Structure,
            size,
            alignment: 4,
            name_hash,
            name: name.to_string(),
            flags: 0,
            element_type_hash: 0,
            element_length: 0,
            members,
            enum_members: Vec::new(),
        }
    }

    /// Arrays are stored out of line, so the in-structure part is always
    /// the 16-byte `(data_offset, count)` header.
    pub fn array(name: &str, name_hash: u32, element_type_hash: u32) -> Self {
        Self {
            kind: TypeKind::Array,
            size: 16,
            alignment: 8,
            name_hash,
            name: name.to_string(),
            flags: 0,
            element_type_hash,
            element_length: 0,
            members: Vec::new(),
            enum_members: Vec::new(),
        }
    }

    #[inline]
    pub fn is_decodable(&self) -> bool {
        matches!(self.kind, TypeKind::Structure | TypeKind::Array)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDefinition {
    pub name: String,
    pub type_hash: u32,
    pub size: u32,
    /// Relative to the owning structure's base, not to the buffer.
    pub offset: u64,
    pub unknown14: u32,
    pub unknown18: u32,
}

impl MemberDefinition {
    pub fn new(name: &str, type_hash: u32, size: u32, offset: u64) -> Self {
        Self {
            name: name.to_string(),
            type_hash,
            size,
            offset,
            unknown14: 0,
            unknown18: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: u32,
}

/// A named, typed root object exposed by a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    pub name_hash: u32,
    pub type_hash: u32,
    /// Absolute offset of the instance region in the container.
    pub offset: u32,
    pub size: u32,
    pub name: String,
}
