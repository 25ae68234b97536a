use std::collections::VecDeque;

use super::event::RefId;
use crate::format::TypeDefinition;

#[derive(Debug, Clone)]
pub(crate) struct WorkItem<'c> {
    pub id: RefId,
    /// Only roots are named.
    pub name: Option<String>,
    pub def: &'c TypeDefinition,
    pub offset: u64,
}

/// FIFO of pending top-level items. Ids are handed out at enqueue time, so
/// they increase in discovery order regardless of when an item is drained.
#[derive(Debug)]
pub(crate) struct WorkQueue<'c> {
    items: VecDeque<WorkItem<'c>>,
    next_id: u64,
}

impl<'c> WorkQueue<'c> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn push(&mut self, name: Option<String>, def: &'c TypeDefinition, offset: u64) -> RefId {
        let id = RefId(self.next_id);
        self.next_id += 1;
        self.items.push_back(WorkItem {
            id,
            name,
            def,
            offset,
        });
        id
    }

    #[inline]
    pub fn pop(&mut self) -> Option<WorkItem<'c>> {
        self.items.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
