//! adf-core
//!
//! Reads ADF containers (a name table, type definitions and typed root
//! instances) and decodes instance bytes by walking them with the type
//! metadata. Decoding produces a flat sequence of [`DecodeEvent`]s that the
//! [`render`] module turns into the tagged XML tree or a serde document.
//!
//! Type definitions normally live in separate "type library" containers,
//! which are merged into a [`TypeCatalog`] before any instance is decoded.

pub mod catalog;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod format;
pub mod primitive;
pub mod render;

pub use binrw::Endian;

pub use catalog::{MergePolicy, TypeCatalog};
pub use cursor::ByteCursor;
pub use decode::{DecodeEvent, DecodedInstance, Decoder, RefId, Root};
pub use error::{AdfError, Result};
pub use format::{
    AdfFile, EnumMember, InstanceInfo, MemberDefinition, NameTable, TypeDefinition, TypeKind,
    TypeLibrary,
};
pub use primitive::Primitive;
pub use render::{Document, XmlRenderer};
