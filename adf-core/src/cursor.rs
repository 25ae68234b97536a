//! Bounds-checked, randomly seekable reader over an in-memory buffer.

use binrw::Endian;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{AdfError, Result};

macro_rules! read_endian {
    ($($name:ident => $ty:ty, $width:expr;)*) => {
        $(
            #[inline]
            pub fn $name(&mut self) -> Result<$ty> {
                let bytes = self.take($width)?;
                Ok(match self.endian {
                    Endian::Little => LittleEndian::$name(bytes),
                    Endian::Big => BigEndian::$name(bytes),
                })
            }
        )*
    };
}

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: u64,
    endian: Endian,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            endian,
        }
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Seeking to the end of the buffer is allowed; past it is not.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        self.ensure_range(pos, 0)?;
        self.pos = pos;
        Ok(())
    }

    /// Fails unless `[offset, offset + len)` lies inside the buffer.
    pub fn ensure_range(&self, offset: u64, len: u64) -> Result<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(AdfError::OutOfRange {
                offset,
                len,
                buffer_len: self.len(),
            }),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure_range(self.pos, n as u64)?;
        let data = self.data;
        let start = self.pos as usize;
        self.pos += n as u64;
        Ok(&data[start..start + n])
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    read_endian! {
        read_u16 => u16, 2;
        read_i16 => i16, 2;
        read_u32 => u32, 4;
        read_i32 => i32, 4;
        read_u64 => u64, 8;
        read_i64 => i64, 8;
        read_f32 => f32, 4;
        read_f64 => f64, 8;
    }
}
