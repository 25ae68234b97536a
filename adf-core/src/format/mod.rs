//! ADF container parsing.
//!
//! The envelope is a fixed header followed by three tables located by
//! offset: names, type definitions and instance descriptors. Every record is
//! read with the endianness implied by the magic.

mod container;
mod library;
mod names;
mod raw;
mod types;

pub use container::{AdfFile, SIGNATURE, VERSION};
pub use library::TypeLibrary;
pub use names::NameTable;
pub use types::{EnumMember, InstanceInfo, MemberDefinition, TypeDefinition, TypeKind};
