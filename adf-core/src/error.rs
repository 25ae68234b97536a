use thiserror::Error;

use crate::format::TypeKind;

#[derive(Debug, Error)]
pub enum AdfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("binary read error: {0}")]
    BinRead(#[from] binrw::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("bad magic 0x{0:08X}, not an ADF container")]
    BadMagic(u32),

    #[error("unsupported container version: {0}")]
    UnsupportedVersion(u32),

    #[error("malformed container: {0}")]
    MalformedContainer(String),

    #[error("unknown type 0x{0:08X}")]
    UnknownType(u32),

    #[error("conflicting definitions for type 0x{hash:08X} ({name})")]
    ConflictingType { hash: u32, name: String },

    #[error("cannot decode {kind} type '{name}' as a root instance")]
    UnsupportedKind { kind: TypeKind, name: String },

    #[error("member '{member}' has type '{type_name}' of unsupported kind {kind}")]
    UnsupportedMemberType {
        member: String,
        type_name: String,
        kind: TypeKind,
    },

    #[error("array element type '{type_name}' is {kind}, only structures are supported")]
    UnsupportedElementType { type_name: String, kind: TypeKind },

    #[error("range 0x{offset:X}+0x{len:X} is outside the buffer (len=0x{buffer_len:X})")]
    OutOfRange {
        offset: u64,
        len: u64,
        buffer_len: u64,
    },

    #[error("decoding needs more than {0} work items, array references form a cycle")]
    WorkBudgetExceeded(u64),

    #[error("structure nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("type library contains {0} instance(s)")]
    UnexpectedInstances(usize),

    #[error("instance container carries {0} type definition(s), load them as a type library")]
    UnexpectedTypeDefinitions(usize),

    #[error("invalid event stream: {0}")]
    InvalidEventStream(String),
}

pub type Result<T> = std::result::Result<T, AdfError>;
