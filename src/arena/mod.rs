/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::fmt::Display;

pub(crate) use error::description;

const MIN_SLOTS: usize = 16;

/// A stable handle to a node inside a [Document](crate::Document).
///
/// Handles are small copyable values. They stay valid while the
/// node lives in the arena; once the node is deleted the slot's
/// generation changes and the old handle no longer resolves.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// Memory usage counters of an arena.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArenaStats {
    /// Number of live values.
    pub nr_live: usize,
    /// Number of slots ever allocated, live or free.
    pub nr_slots: usize,
    /// Number of slots waiting for reuse.
    pub nr_free: usize,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A generation checked slot arena.
///
/// The arena is the only owner of the values. Links between values
/// are plain [NodeId] handles with no ownership of their own, so
/// cyclic structures such as doubly linked sibling chains are fine.
/// Removing a value bumps the generation of its slot and puts the
/// slot on the free list.
///
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    nr_live: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Arena<T> {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Arena<T> {
        Arena {
            slots: Vec::with_capacity(capacity.max(MIN_SLOTS)),
            free: Vec::new(),
            nr_live: 0,
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> NodeId {
        self.nr_live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = match u32::try_from(self.slots.len()) {
            Ok(index) => index,
            Err(_) => panic!("{}", description::TOO_MANY_NODES),
        };
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.nr_live -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.index as usize) {
            Some(slot) if slot.generation == id.generation => slot.value.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation => slot.value.as_mut(),
            _ => None,
        }
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.nr_live
    }

    pub(crate) fn stats(&self) -> ArenaStats {
        ArenaStats {
            nr_live: self.nr_live,
            nr_slots: self.slots.len(),
            nr_free: self.free.len(),
        }
    }
}

impl<T> std::ops::Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("{} ({})", description::STALE_HANDLE, id),
        }
    }
}

impl<T> std::ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("{} ({})", description::STALE_HANDLE, id),
        }
    }
}
