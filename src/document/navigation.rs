/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::arena::NodeId;

use super::Document;
use super::DomError;
use super::description;

// Builds the "get or fail" flavor of a lookup.
macro_rules! checked {
    ($checked:ident => $lookup:ident($($arg:ident: $ty:ty),*), $what:expr) => {
        pub fn $checked(&self, id: NodeId $(, $arg: $ty)*) -> Result<NodeId, DomError> {
            self.$lookup(id $(, $arg)*).ok_or(DomError::CheckFailed($what))
        }
    };
}

impl Document {
    fn element_or_next(&self, mut current: Option<NodeId>) -> Option<NodeId> {
        while let Some(id) = current {
            if self.node(id).is_element() {
                return Some(id);
            }
            current = self.node(id).next;
        }
        None
    }

    fn element_or_previous(&self, mut current: Option<NodeId>) -> Option<NodeId> {
        while let Some(id) = current {
            if self.node(id).is_element() {
                return Some(id);
            }
            current = self.node(id).previous;
        }
        None
    }

    fn named_or_next(&self, mut current: Option<NodeId>, name: &str) -> Option<NodeId> {
        while let Some(id) = self.element_or_next(current) {
            if self.element_names_match(self.name(id), name) {
                return Some(id);
            }
            current = self.node(id).next;
        }
        None
    }

    fn named_or_previous(&self, mut current: Option<NodeId>, name: &str) -> Option<NodeId> {
        while let Some(id) = self.element_or_previous(current) {
            if self.element_names_match(self.name(id), name) {
                return Some(id);
            }
            current = self.node(id).previous;
        }
        None
    }

    //
    // Any node type
    //

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Topmost ancestor, or the node itself when detached.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).previous
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    /// First node of the sibling chain this node is in.
    pub fn first_sibling(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(previous) = self.node(current).previous {
            current = previous;
        }
        current
    }

    /// Last node of the sibling chain this node is in.
    pub fn last_sibling(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(next) = self.node(current).next {
            current = next;
        }
        current
    }

    //
    // Elements only
    //

    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .parent
            .filter(|parent| self.node(*parent).is_element())
    }

    /// The outermost element above or at this node. For a node under
    /// a document node, this is the document's first element.
    pub fn root_element(&self, id: NodeId) -> Option<NodeId> {
        let root = self.root_of(id);
        if self.node(root).is_element() {
            Some(root)
        } else {
            self.first_child_element(root)
        }
    }

    pub fn first_child_element(&self, id: NodeId) -> Option<NodeId> {
        self.element_or_next(self.node(id).first_child)
    }

    pub fn last_child_element(&self, id: NodeId) -> Option<NodeId> {
        self.element_or_previous(self.node(id).last_child)
    }

    pub fn first_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        self.element_or_next(Some(self.first_sibling(id)))
    }

    pub fn last_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        self.element_or_previous(Some(self.last_sibling(id)))
    }

    pub fn previous_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        self.element_or_previous(self.node(id).previous)
    }

    pub fn next_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        self.element_or_next(self.node(id).next)
    }

    pub fn find_first_child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.named_or_next(self.node(id).first_child, name)
    }

    pub fn find_last_child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.named_or_previous(self.node(id).last_child, name)
    }

    pub fn find_previous_sibling_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.named_or_previous(self.node(id).previous, name)
    }

    pub fn find_next_sibling_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.named_or_next(self.node(id).next, name)
    }

    //
    // Lookups which fail with an error
    //

    checked!(parent_checked => parent(), description::NO_PARENT);
    checked!(first_child_checked => first_child(), description::NO_CHILD);
    checked!(last_child_checked => last_child(), description::NO_CHILD);
    checked!(previous_sibling_checked => previous_sibling(), description::NO_SIBLING);
    checked!(next_sibling_checked => next_sibling(), description::NO_SIBLING);
    checked!(parent_element_checked => parent_element(), description::NO_PARENT);
    checked!(root_element_checked => root_element(), description::NO_ELEMENT);
    checked!(first_child_element_checked => first_child_element(), description::NO_ELEMENT);
    checked!(last_child_element_checked => last_child_element(), description::NO_ELEMENT);
    checked!(first_sibling_element_checked => first_sibling_element(), description::NO_ELEMENT);
    checked!(last_sibling_element_checked => last_sibling_element(), description::NO_ELEMENT);
    checked!(previous_sibling_element_checked => previous_sibling_element(), description::NO_ELEMENT);
    checked!(next_sibling_element_checked => next_sibling_element(), description::NO_ELEMENT);
    checked!(find_first_child_element_checked => find_first_child_element(name: &str), description::NO_ELEMENT);
    checked!(find_last_child_element_checked => find_last_child_element(name: &str), description::NO_ELEMENT);
    checked!(find_previous_sibling_element_checked => find_previous_sibling_element(name: &str), description::NO_ELEMENT);
    checked!(find_next_sibling_element_checked => find_next_sibling_element(name: &str), description::NO_ELEMENT);
}
