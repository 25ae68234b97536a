//! Built-in scalar types.
//!
//! Primitives never appear as type definitions in a container; members and
//! array elements refer to them through a reserved set of type hashes, which
//! are decoded here without consulting the catalog.

use strum::Display;

use crate::cursor::ByteCursor;
use crate::error::Result;

pub mod hashes {
    pub const UINT8: u32 = 0x0CA2_821D;
    pub const INT8: u32 = 0x580D_0A62;
    pub const UINT16: u32 = 0x86D1_52BD;
    pub const INT16: u32 = 0xD13F_CF93;
    pub const UINT32: u32 = 0x075E_4E4F;
    pub const INT32: u32 = 0x192F_E633;
    pub const UINT64: u32 = 0xA139_E01F;
    pub const INT64: u32 = 0xAF41_354F;
    pub const FLOAT32: u32 = 0x7515_A207;
    pub const FLOAT64: u32 = 0xC609_F663;
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float32,
    Float64,
}

impl Primitive {
    pub const ALL: [Primitive; 10] = [
        Primitive::UInt8,
        Primitive::Int8,
        Primitive::UInt16,
        Primitive::Int16,
        Primitive::UInt32,
        Primitive::Int32,
        Primitive::UInt64,
        Primitive::Int64,
        Primitive::Float32,
        Primitive::Float64,
    ];

    pub fn from_type_hash(hash: u32) -> Option<Self> {
        Some(match hash {
            hashes::UINT8 => Primitive::UInt8,
            hashes::INT8 => Primitive::Int8,
            hashes::UINT16 => Primitive::UInt16,
            hashes::INT16 => Primitive::Int16,
            hashes::UINT32 => Primitive::UInt32,
            hashes::INT32 => Primitive::Int32,
            hashes::UINT64 => Primitive::UInt64,
            hashes::INT64 => Primitive::Int64,
            hashes::FLOAT32 => Primitive::Float32,
            hashes::FLOAT64 => Primitive::Float64,
            _ => return None,
        })
    }

    pub fn type_hash(self) -> u32 {
        match self {
            Primitive::UInt8 => hashes::UINT8,
            Primitive::Int8 => hashes::INT8,
            Primitive::UInt16 => hashes::UINT16,
            Primitive::Int16 => hashes::INT16,
            Primitive::UInt32 => hashes::UINT32,
            Primitive::Int32 => hashes::INT32,
            Primitive::UInt64 => hashes::UINT64,
            Primitive::Int64 => hashes::INT64,
            Primitive::Float32 => hashes::FLOAT32,
            Primitive::Float64 => hashes::FLOAT64,
        }
    }

    /// Width in bytes.
    pub fn width(self) -> u64 {
        match self {
            Primitive::UInt8 | Primitive::Int8 => 1,
            Primitive::UInt16 | Primitive::Int16 => 2,
            Primitive::UInt32 | Primitive::Int32 | Primitive::Float32 => 4,
            Primitive::UInt64 | Primitive::Int64 | Primitive::Float64 => 8,
        }
    }

    /// Read one value at the cursor and append its base-10 text to `out`.
    pub fn write_text(self, cursor: &mut ByteCursor<'_>, out: &mut String) -> Result<()> {
        let text = match self {
            Primitive::UInt8 => cursor.read_u8()?.to_string(),
            Primitive::Int8 => cursor.read_i8()?.to_string(),
            Primitive::UInt16 => cursor.read_u16()?.to_string(),
            Primitive::Int16 => cursor.read_i16()?.to_string(),
            Primitive::UInt32 => cursor.read_u32()?.to_string(),
            Primitive::Int32 => cursor.read_i32()?.to_string(),
            Primitive::UInt64 => cursor.read_u64()?.to_string(),
            Primitive::Int64 => cursor.read_i64()?.to_string(),
            Primitive::Float32 => cursor.read_f32()?.to_string(),
            Primitive::Float64 => cursor.read_f64()?.to_string(),
        };
        out.push_str(&text);
        Ok(())
    }

    pub fn read_text(self, cursor: &mut ByteCursor<'_>) -> Result<String> {
        let mut out = String::new();
        self.write_text(cursor, &mut out)?;
        Ok(out)
    }
}
