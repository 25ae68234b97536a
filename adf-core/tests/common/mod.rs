#![allow(dead_code)]

use adf_core::{InstanceInfo, TypeDefinition};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Little helper for laying out instance bytes at fixed offsets.
pub struct Blob {
    pub bytes: Vec<u8>,
    big: bool,
}

impl Blob {
    pub fn new(big: bool) -> Self {
        Self {
            bytes: Vec::new(),
            big,
        }
    }

    pub fn le() -> Self {
        Self::new(false)
    }

    fn slot(&mut self, offset: usize, len: usize) -> &mut [u8] {
        if self.bytes.len() < offset + len {
            self.bytes.resize(offset + len, 0);
        }
        &mut self.bytes[offset..offset + len]
    }

    pub fn u8(&mut self, offset: usize, v: u8) -> &mut Self {
        self.slot(offset, 1)[0] = v;
        self
    }

    pub fn u16(&mut self, offset: usize, v: u16) -> &mut Self {
        let big = self.big;
        let slot = self.slot(offset, 2);
        if big {
            BigEndian::write_u16(slot, v)
        } else {
            LittleEndian::write_u16(slot, v)
        }
        self
    }

    pub fn u32(&mut self, offset: usize, v: u32) -> &mut Self {
        let big = self.big;
        let slot = self.slot(offset, 4);
        if big {
            BigEndian::write_u32(slot, v)
        } else {
            LittleEndian::write_u32(slot, v)
        }
        self
    }

    pub fn u64(&mut self, offset: usize, v: u64) -> &mut Self {
        let big = self.big;
        let slot = self.slot(offset, 8);
        if big {
            BigEndian::write_u64(slot, v)
        } else {
            LittleEndian::write_u64(slot, v)
        }
        self
    }

    /// Array header: `(data_offset, count)`.
    pub fn array_header(&mut self, offset: usize, data_offset: u64, count: u64) -> &mut Self {
        self.u64(offset, data_offset).u64(offset + 8, count)
    }

    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        self.slot(len, 0);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

pub struct PendingInstance {
    pub name: String,
    pub name_hash: u32,
    pub type_hash: u32,
    pub data: Vec<u8>,
}

/// Writes complete ADF v4 containers.
pub struct ContainerBuilder {
    big: bool,
    comment: String,
    types: Vec<TypeDefinition>,
    instances: Vec<PendingInstance>,
}

impl ContainerBuilder {
    pub fn new(big: bool) -> Self {
        Self {
            big,
            comment: String::new(),
            types: Vec::new(),
            instances: Vec::new(),
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn types(mut self, types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        self.types.extend(types);
        self
    }

    pub fn instance(mut self, name: &str, type_hash: u32, data: Vec<u8>) -> Self {
        self.instances.push(PendingInstance {
            name: name.to_string(),
            name_hash: 0x1000 + self.instances.len() as u32,
            type_hash,
            data,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut names: Vec<String> = Vec::new();
        let mut intern = |name: &str| -> i64 {
            if let Some(i) = names.iter().position(|n| n == name) {
                return i as i64;
            }
            names.push(name.to_string());
            (names.len() - 1) as i64
        };

        let mut out = Out {
            buf: Vec::new(),
            big: self.big,
        };

        // magic, version, then 14 header words patched below
        out.u32(0x4144_4620);
        out.u32(4);
        for _ in 0..14 {
            out.u32(0);
        }
        out.buf.extend_from_slice(self.comment.as_bytes());
        out.buf.push(0);
        out.align(8);

        // type definitions
        let typedef_offset = out.buf.len();
        for def in &self.types {
            out.u32(def.kind as u32);
            out.u32(def.size);
            out.u32(def.alignment);
            out.u32(def.name_hash);
            out.i64(intern(&def.name));
            out.u32(def.flags);
            out.u32(def.element_type_hash);
            out.u32(def.element_length);
            out.u32((def.members.len() + def.enum_members.len()) as u32);
            for m in &def.members {
                out.i64(intern(&m.name));
                out.u32(m.type_hash);
                out.u32(m.size);
                out.i64(m.offset as i64);
                out.u32(m.unknown14);
                out.u32(m.unknown18);
            }
            for e in &def.enum_members {
                out.i64(intern(&e.name));
                out.u32(e.value);
            }
        }

        // instance payloads
        let mut infos = Vec::new();
        for pending in &self.instances {
            out.align(16);
            infos.push(InstanceInfo {
                name_hash: pending.name_hash,
                type_hash: pending.type_hash,
                offset: out.buf.len() as u32,
                size: pending.data.len() as u32,
                name: pending.name.clone(),
            });
            out.buf.extend_from_slice(&pending.data);
        }

        out.align(8);
        let instance_offset = out.buf.len();
        for info in &infos {
            out.u32(info.name_hash);
            out.u32(info.type_hash);
            out.u32(info.offset);
            out.u32(info.size);
            out.i64(intern(&info.name));
        }

        let name_offset = out.buf.len();
        for name in &names {
            out.buf.push(name.len() as u8);
        }
        for name in &names {
            out.buf.extend_from_slice(name.as_bytes());
            out.buf.push(0);
        }

        let total_size = out.buf.len();
        out.patch(0x08, infos.len() as u32);
        out.patch(0x0C, instance_offset as u32);
        out.patch(0x10, self.types.len() as u32);
        out.patch(0x14, typedef_offset as u32);
        out.patch(0x20, names.len() as u32);
        out.patch(0x24, name_offset as u32);
        out.patch(0x28, total_size as u32);
        out.buf
    }
}

struct Out {
    buf: Vec<u8>,
    big: bool,
}

impl Out {
    fn u32(&mut self, v: u32) {
        let mut b = [0u8; 4];
        if self.big {
            BigEndian::write_u32(&mut b, v)
        } else {
            LittleEndian::write_u32(&mut b, v)
        }
        self.buf.extend_from_slice(&b);
    }

    fn i64(&mut self, v: i64) {
        let mut b = [0u8; 8];
        if self.big {
            BigEndian::write_i64(&mut b, v)
        } else {
            LittleEndian::write_i64(&mut b, v)
        }
        self.buf.extend_from_slice(&b);
    }

    fn patch(&mut self, at: usize, v: u32) {
        let slot = &mut self.buf[at..at + 4];
        if self.big {
            BigEndian::write_u32(slot, v)
        } else {
            LittleEndian::write_u32(slot, v)
        }
    }

    fn align(&mut self, to: usize) {
        while self.buf.len() % to != 0 {
            self.buf.push(0);
        }
    }
}
