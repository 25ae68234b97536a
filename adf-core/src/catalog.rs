use std::collections::HashMap;

use crate::error::{AdfError, Result};
use crate::format::TypeDefinition;

/// What to do when a source redefines a known type hash with different
/// content. Identical redefinitions are always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    #[default]
    Reject,
    /// Last writer wins.
    Replace,
}

/// Append-only index of type definitions keyed by name hash.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    policy: MergePolicy,
    index: HashMap<u32, usize>,
    entries: Vec<TypeDefinition>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MergePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Ingest the definitions of one source and return how many hashes were
    /// new. Under [`MergePolicy::Reject`] the whole batch is checked before
    /// anything is inserted, so a conflicting source leaves the catalog
    /// untouched.
    pub fn add<I>(&mut self, definitions: I) -> Result<usize>
    where
        I: IntoIterator<Item = TypeDefinition>,
    {
        let definitions: Vec<TypeDefinition> = definitions.into_iter().collect();

        if self.policy == MergePolicy::Reject {
            let mut batch: HashMap<u32, &TypeDefinition> = HashMap::new();
            for def in &definitions {
                let known = batch
                    .get(&def.name_hash)
                    .copied()
                    .or_else(|| self.get(def.name_hash));
                if let Some(known) = known {
                    if known != def {
                        return Err(AdfError::ConflictingType {
                            hash: def.name_hash,
                            name: def.name.clone(),
                        });
                    }
                }
                batch.insert(def.name_hash, def);
            }
        }

        let mut added = 0;
        for def in definitions {
            match self.index.get(&def.name_hash) {
                Some(&slot) => {
                    if self.entries[slot] != def {
                        log::warn!(
                            "type 0x{:08X} '{}' replaced by a later definition",
                            def.name_hash,
                            def.name
                        );
                        self.entries[slot] = def;
                    }
                }
                None => {
                    self.index.insert(def.name_hash, self.entries.len());
                    self.entries.push(def);
                    added += 1;
                }
            }
        }

        log::debug!("catalog: {} new type(s), {} total", added, self.entries.len());
        Ok(added)
    }

    pub fn get(&self, hash: u32) -> Option<&TypeDefinition> {
        self.index.get(&hash).map(|&slot| &self.entries[slot])
    }

    pub fn resolve(&self, hash: u32) -> Result<&TypeDefinition> {
        self.get(hash).ok_or(AdfError::UnknownType(hash))
    }

    #[inline]
    pub fn contains(&self, hash: u32) -> bool {
        self.index.contains_key(&hash)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.entries.iter()
    }
}
