//! Fixed-layout on-disk records. Endianness is supplied at read time.

use binrw::{BinRead, NullString};

/// Header fields following the 4-byte magic.
#[derive(BinRead, Debug, Clone)]
pub(crate) struct RawHeader {
    pub version: u32,
    pub instance_count: u32,
    pub instance_offset: u32,
    pub typedef_count: u32,
    pub typedef_offset: u32,
    pub unknown18_count: u32,
    pub unknown1c_offset: u32,
    pub name_count: u32,
    pub name_offset: u32,
    pub total_size: u32,
    pub reserved: [u32; 5],
    pub comment: NullString,
}

#[derive(BinRead, Debug, Clone)]
pub(crate) struct RawTypeDefinition {
    pub kind: u32,
    pub size: u32,
    pub alignment: u32,
    pub name_hash: u32,
    pub name_index: i64,
    pub flags: u32,
    pub element_type_hash: u32,
    pub element_length: u32,
    pub member_count: u32,
}

/// 32 bytes.
#[derive(BinRead, Debug, Clone)]
pub(crate) struct RawMemberDefinition {
    pub name_index: i64,
    pub type_hash: u32,
    pub size: u32,
    pub offset: i64,
    pub unknown14: u32,
    pub unknown18: u32,
}

/// 12 bytes.
#[derive(BinRead, Debug, Clone)]
pub(crate) struct RawEnumMember {
    pub name_index: i64,
    pub value: u32,
}

#[derive(BinRead, Debug, Clone)]
pub(crate) struct RawInstanceInfo {
    pub name_hash: u32,
    pub type_hash: u32,
    pub offset: u32,
    pub size: u32,
    pub name_index: i64,
}
