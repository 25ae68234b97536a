//! Schema-driven instance decoding.
//!
//! Structures are decoded inline, member by member, at `base + offset`.
//! Arrays reached through a member are never decoded in place: they get the
//! next reference id, go to the back of a FIFO work queue, and the member
//! value becomes `#<id>`. Draining the queue until it is empty yields a flat
//! forest of top-level items linked by ids, and native recursion only
//! follows structure nesting.

mod event;
mod queue;

pub use event::{DecodeEvent, DecodedInstance, RefId};

use binrw::Endian;

use crate::catalog::TypeCatalog;
use crate::cursor::ByteCursor;
use crate::error::{AdfError, Result};
use crate::format::{AdfFile, InstanceInfo, MemberDefinition, TypeDefinition, TypeKind};
use crate::primitive::Primitive;
use queue::WorkQueue;

/// Inline structure nesting limit. Only reachable with self-containing
/// schemas.
pub const MAX_STRUCT_DEPTH: usize = 256;

/// A named, typed entry point into a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub name: String,
    pub type_hash: u32,
    pub offset: u64,
}

impl Root {
    pub fn new(name: impl Into<String>, type_hash: u32, offset: u64) -> Self {
        Self {
            name: name.into(),
            type_hash,
            offset,
        }
    }
}

/// Decodes buffers against a read-only catalog. Each call starts with a
/// fresh work queue and reference counter.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'c> {
    catalog: &'c TypeCatalog,
}

impl<'c> Decoder<'c> {
    pub fn new(catalog: &'c TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Decode several roots sharing one queue. Root `i` gets id `i`; arrays
    /// found along the way continue the numbering. All offsets, including
    /// array data offsets, are absolute in `buffer`.
    pub fn decode_roots(
        &self,
        buffer: &[u8],
        endian: Endian,
        roots: &[Root],
    ) -> Result<Vec<DecodeEvent>> {
        let budget = (buffer.len() as u64).saturating_add(roots.len() as u64);
        let mut run = DecodeRun {
            catalog: self.catalog,
            cursor: ByteCursor::new(buffer, endian),
            queue: WorkQueue::new(),
            events: Vec::new(),
            depth: 0,
            budget,
            remaining: budget,
        };

        for root in roots {
            let def = self.catalog.resolve(root.type_hash)?;
            if !def.is_decodable() {
                return Err(AdfError::UnsupportedKind {
                    kind: def.kind,
                    name: def.name.clone(),
                });
            }
            run.queue.push(Some(root.name.clone()), def, root.offset);
        }
        run.drain()?;

        Ok(run.events)
    }

    /// Decode one instance of a container the way the converter does: the
    /// instance region is its own buffer, the root sits at offset 0 and
    /// array data offsets are relative to the region.
    ///
    /// Fails if the container carries its own type definitions; schemas come
    /// from type libraries merged into the catalog.
    pub fn decode_instance(&self, file: &AdfFile, instance: &InstanceInfo) -> Result<DecodedInstance> {
        file.ensure_no_type_definitions()?;
        let data = file.instance_data(instance)?;
        let root = Root::new(instance.name.clone(), instance.type_hash, 0);
        let events = self.decode_roots(&data, file.endian, std::slice::from_ref(&root))?;
        Ok(DecodedInstance {
            name: instance.name.clone(),
            events,
        })
    }

    pub fn decode_file(&self, file: &AdfFile) -> Result<Vec<DecodedInstance>> {
        file.ensure_no_type_definitions()?;
        file.instance_infos
            .iter()
            .map(|instance| self.decode_instance(file, instance))
            .collect()
    }
}

struct DecodeRun<'c, 'b> {
    catalog: &'c TypeCatalog,
    cursor: ByteCursor<'b>,
    queue: WorkQueue<'c>,
    events: Vec<DecodeEvent>,
    depth: usize,
    /// Dequeued items plus structure elements allowed in one run. Every
    /// deferred array owns a distinct 16-byte header and every element at
    /// least one byte, so well-formed data stays below the buffer length.
    budget: u64,
    remaining: u64,
}

impl<'c, 'b> DecodeRun<'c, 'b> {
    fn drain(&mut self) -> Result<()> {
        while let Some(item) = self.queue.pop() {
            self.spend(1)?;
            log::trace!(
                "{} {} '{}' at 0x{:X} ({} pending)",
                item.id,
                item.def.kind,
                item.def.name,
                item.offset,
                self.queue.len()
            );

            match item.def.kind {
                TypeKind::Structure => {
                    self.structure(item.def, Some(item.id), item.name, item.offset)?;
                }
                TypeKind::Array => {
                    self.cursor.seek(item.offset)?;
                    self.array(item.def, Some(item.id))?;
                }
                TypeKind::Primitive
                | TypeKind::Pointer
                | TypeKind::InlineArray
                | TypeKind::String
                | TypeKind::BitField
                | TypeKind::Enumeration
                | TypeKind::StringHash => {
                    return Err(AdfError::UnsupportedKind {
                        kind: item.def.kind,
                        name: item.def.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn structure(
        &mut self,
        def: &'c TypeDefinition,
        ref_id: Option<RefId>,
        name: Option<String>,
        base: u64,
    ) -> Result<()> {
        if self.depth >= MAX_STRUCT_DEPTH {
            return Err(AdfError::NestingTooDeep(MAX_STRUCT_DEPTH));
        }
        self.depth += 1;

        self.events.push(DecodeEvent::StructStart {
            type_name: def.name.clone(),
            name,
            ref_id,
        });

        for member in &def.members {
            let pos = base.checked_add(member.offset).ok_or(AdfError::OutOfRange {
                offset: base,
                len: member.offset,
                buffer_len: self.cursor.len(),
            })?;
            self.cursor.seek(pos)?;
            self.member(member)?;
        }

        self.events.push(DecodeEvent::StructEnd);
        self.depth -= 1;
        Ok(())
    }

    fn member(&mut self, member: &'c MemberDefinition) -> Result<()> {
        if let Some(primitive) = Primitive::from_type_hash(member.type_hash) {
            let value = primitive.read_text(&mut self.cursor)?;
            self.events.push(DecodeEvent::Member {
                name: member.name.clone(),
                value,
            });
            return Ok(());
        }

        let catalog = self.catalog;
        let def = catalog.resolve(member.type_hash)?;
        match def.kind {
            TypeKind::Structure => {
                self.events.push(DecodeEvent::MemberStart {
                    name: member.name.clone(),
                });
                let base = self.cursor.position();
                self.structure(def, None, None, base)?;
                self.events.push(DecodeEvent::MemberEnd);
            }
            TypeKind::Array => {
                let id = self.queue.push(None, def, self.cursor.position());
                self.events.push(DecodeEvent::Member {
                    name: member.name.clone(),
                    value: id.to_string(),
                });
            }
            TypeKind::Primitive
            | TypeKind::Pointer
            | TypeKind::InlineArray
            | TypeKind::String
            | TypeKind::BitField
            | TypeKind::Enumeration
            | TypeKind::StringHash => {
                return Err(AdfError::UnsupportedMemberType {
                    member: member.name.clone(),
                    type_name: def.name.clone(),
                    kind: def.kind,
                });
            }
        }
        Ok(())
    }

    /// The cursor sits on the array header: `(data_offset: u64, count: u64)`.
    fn array(&mut self, def: &'c TypeDefinition, ref_id: Option<RefId>) -> Result<()> {
        let data_offset = self.cursor.read_u64()?;
        let count = self.cursor.read_u64()?;

        self.events.push(DecodeEvent::ArrayStart { ref_id });

        if let Some(primitive) = Primitive::from_type_hash(def.element_type_hash) {
            let mut text = String::new();
            if count > 0 {
                self.ensure_run(data_offset, count, primitive.width())?;
                self.cursor.seek(data_offset)?;

                for _ in 0..count {
                    primitive.write_text(&mut self.cursor, &mut text)?;
                    text.push(' ');
                }
            }
            self.events.push(DecodeEvent::ArrayValues(text));
        } else {
            let catalog = self.catalog;
            let element = catalog.resolve(def.element_type_hash)?;
            match element.kind {
                TypeKind::Structure => {
                    if count > 0 {
                        self.ensure_run(data_offset, count, u64::from(element.size.max(1)))?;
                        self.spend(count)?;
                    }
                    let size = u64::from(element.size);
                    for i in 0..count {
                        self.structure(element, None, None, data_offset + i * size)?;
                    }
                }
                TypeKind::Primitive
                | TypeKind::Pointer
                | TypeKind::Array
                | TypeKind::InlineArray
                | TypeKind::String
                | TypeKind::BitField
                | TypeKind::Enumeration
                | TypeKind::StringHash => {
                    return Err(AdfError::UnsupportedElementType {
                        type_name: element.name.clone(),
                        kind: element.kind,
                    });
                }
            }
        }

        self.events.push(DecodeEvent::ArrayEnd);
        Ok(())
    }

    fn spend(&mut self, units: u64) -> Result<()> {
        self.remaining = self
            .remaining
            .checked_sub(units)
            .ok_or(AdfError::WorkBudgetExceeded(self.budget))?;
        Ok(())
    }

    /// Reject element runs that cannot fit in the buffer before doing any
    /// per-element work.
    fn ensure_run(&self, offset: u64, count: u64, stride: u64) -> Result<()> {
        let len = count.checked_mul(stride).ok_or(AdfError::OutOfRange {
            offset,
            len: u64::MAX,
            buffer_len: self.cursor.len(),
        })?;
        self.cursor.ensure_range(offset, len)
    }
}
