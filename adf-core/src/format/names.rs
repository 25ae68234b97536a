use crate::error::{AdfError, Result};

/// The container's name table, indexed by the 64-bit name indices stored in
/// type, member and instance records.
///
/// On disk: `count` u8 lengths, then each name's bytes followed by one NUL.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn read(bytes: &[u8], offset: usize, count: usize) -> Result<Self> {
        let out_of_range = |off: usize, len: usize| AdfError::OutOfRange {
            offset: off as u64,
            len: len as u64,
            buffer_len: bytes.len() as u64,
        };

        let lengths = offset
            .checked_add(count)
            .and_then(|end| bytes.get(offset..end))
            .ok_or_else(|| out_of_range(offset, count))?;

        let mut pos = offset + count;
        let mut names = Vec::with_capacity(count);
        for &len in lengths {
            let len = len as usize;
            let raw = bytes
                .get(pos..pos + len)
                .ok_or_else(|| out_of_range(pos, len))?;
            names.push(String::from_utf8_lossy(raw).into_owned());
            // skip the terminator
            pos += len + 1;
        }

        Ok(Self { names })
    }

    pub fn get(&self, index: i64) -> Result<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
            .ok_or_else(|| {
                AdfError::MalformedContainer(format!(
                    "name index {} out of range (table has {} names)",
                    index,
                    self.names.len()
                ))
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
