use std::io::Cursor;
use std::path::Path;

use binrw::{BinRead, BinReaderExt, Endian};
use bytes::Bytes;
use num_traits::FromPrimitive;

use super::names::NameTable;
use super::raw::{RawEnumMember, RawHeader, RawInstanceInfo, RawMemberDefinition, RawTypeDefinition};
use super::types::{EnumMember, InstanceInfo, MemberDefinition, TypeDefinition, TypeKind};
use crate::error::{AdfError, Result};

/// 'ADF ' read as a little-endian u32.
pub const SIGNATURE: u32 = 0x4144_4620;
pub const VERSION: u32 = 4;

/// A parsed ADF container together with its raw bytes.
#[derive(Debug, Clone)]
pub struct AdfFile {
    pub endian: Endian,
    pub comment: String,
    pub type_definitions: Vec<TypeDefinition>,
    pub instance_infos: Vec<InstanceInfo>,
    data: Bytes,
}

impl AdfFile {
    /// we assume that modern systems have enough memory to load the whole file into memory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("read {} bytes from {:?}", data.len(), path.as_ref());
        Self::parse(data)
    }

    pub fn parse(data: impl Into<Bytes>) -> Result<Self> {
        let data: Bytes = data.into();
        let mut reader = Cursor::new(&data[..]);

        let magic: u32 = reader.read_le()?;
        let endian = if magic == SIGNATURE {
            Endian::Little
        } else if magic.swap_bytes() == SIGNATURE {
            Endian::Big
        } else {
            return Err(AdfError::BadMagic(magic));
        };

        let header = RawHeader::read_options(&mut reader, endian, ())?;
        if header.version != VERSION {
            return Err(AdfError::UnsupportedVersion(header.version));
        }
        if header.unknown18_count > 0 || header.unknown1c_offset != 0 {
            return Err(AdfError::MalformedContainer(format!(
                "unexpected table at 0x18: count={} offset=0x{:X}",
                header.unknown18_count, header.unknown1c_offset
            )));
        }
        if header.reserved.iter().any(|&v| v != 0) {
            return Err(AdfError::MalformedContainer(format!(
                "reserved header fields are not zero: {:?}",
                header.reserved
            )));
        }
        if header.total_size as usize > data.len() {
            return Err(AdfError::OutOfRange {
                offset: 0,
                len: header.total_size as u64,
                buffer_len: data.len() as u64,
            });
        }

        let names = NameTable::read(
            &data,
            header.name_offset as usize,
            header.name_count as usize,
        )?;

        let mut type_definitions = Vec::new();
        reader.set_position(header.typedef_offset as u64);
        for _ in 0..header.typedef_count {
            type_definitions.push(read_type_definition(&mut reader, endian, &names)?);
        }

        let mut instance_infos = Vec::new();
        reader.set_position(header.instance_offset as u64);
        for _ in 0..header.instance_count {
            let raw = RawInstanceInfo::read_options(&mut reader, endian, ())?;
            instance_infos.push(InstanceInfo {
                name_hash: raw.name_hash,
                type_hash: raw.type_hash,
                offset: raw.offset,
                size: raw.size,
                name: names.get(raw.name_index)?.to_string(),
            });
        }

        let comment = String::from_utf8_lossy(&header.comment.0).into_owned();
        log::debug!(
            "ADF v{} ({:?}): {} type(s), {} instance(s), {} name(s), comment={:?}",
            header.version,
            endian,
            type_definitions.len(),
            instance_infos.len(),
            names.len(),
            comment
        );

        Ok(Self {
            endian,
            comment,
            type_definitions,
            instance_infos,
            data,
        })
    }

    /// The `[offset, offset + size)` region of an instance, without copying.
    pub fn instance_data(&self, instance: &InstanceInfo) -> Result<Bytes> {
        let start = instance.offset as usize;
        let end = start + instance.size as usize;
        if end > self.data.len() {
            return Err(AdfError::OutOfRange {
                offset: instance.offset as u64,
                len: instance.size as u64,
                buffer_len: self.data.len() as u64,
            });
        }
        Ok(self.data.slice(start..end))
    }

    /// Instance containers take their schema from type libraries only.
    pub fn ensure_no_type_definitions(&self) -> Result<()> {
        if self.type_definitions.is_empty() {
            Ok(())
        } else {
            Err(AdfError::UnexpectedTypeDefinitions(self.type_definitions.len()))
        }
    }
}

fn read_type_definition(
    reader: &mut Cursor<&[u8]>,
    endian: Endian,
    names: &NameTable,
) -> Result<TypeDefinition> {
    let raw = RawTypeDefinition::read_options(reader, endian, ())?;
    let kind = TypeKind::from_u32(raw.kind).ok_or_else(|| {
        AdfError::MalformedContainer(format!(
            "unknown type kind {} for type 0x{:08X}",
            raw.kind, raw.name_hash
        ))
    })?;
    let name = names.get(raw.name_index)?.to_string();

    let mut members = Vec::new();
    let mut enum_members = Vec::new();
    match kind {
        TypeKind::Structure => {
            for _ in 0..raw.member_count {
                let m = RawMemberDefinition::read_options(reader, endian, ())?;
                let offset = u64::try_from(m.offset).map_err(|_| {
                    AdfError::MalformedContainer(format!(
                        "negative member offset {} in '{}'",
                        m.offset, name
                    ))
                })?;
                members.push(MemberDefinition {
                    name: names.get(m.name_index)?.to_string(),
                    type_hash: m.type_hash,
                    size: m.size,
                    offset,
                    unknown14: m.unknown14,
                    unknown18: m.unknown18,
                });
            }
        }
        TypeKind::Enumeration => {
            for _ in 0..raw.member_count {
                let e = RawEnumMember::read_options(reader, endian, ())?;
                enum_members.push(EnumMember {
                    name: names.get(e.name_index)?.to_string(),
                    value: e.value,
                });
            }
        }
        _ if raw.member_count != 0 => {
            return Err(AdfError::MalformedContainer(format!(
                "{} type '{}' declares {} member(s)",
                kind, name, raw.member_count
            )));
        }
        _ => {}
    }

    Ok(TypeDefinition {
        kind,
        size: raw.size,
        alignment: raw.alignment,
        name_hash: raw.name_hash,
        name,
        flags: raw.flags,
        element_type_hash: raw.element_type_hash,
        element_length: raw.element_length,
        members,
        enum_members,
    })
}
