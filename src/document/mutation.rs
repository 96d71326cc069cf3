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
use super::Node;
use super::NodeType;
use super::description;

// Attributes live in their own chain on the owner, every other node
// in the child chain. The `attributes` flag selects the chain.
impl Node {
    fn chain_first(&self, attributes: bool) -> Option<NodeId> {
        if attributes {
            self.first_attribute
        } else {
            self.first_child
        }
    }

    fn chain_last(&self, attributes: bool) -> Option<NodeId> {
        if attributes {
            self.last_attribute
        } else {
            self.last_child
        }
    }

    fn set_chain_first(&mut self, attributes: bool, id: Option<NodeId>) {
        if attributes {
            self.first_attribute = id;
        } else {
            self.first_child = id;
        }
    }

    fn set_chain_last(&mut self, attributes: bool, id: Option<NodeId>) {
        if attributes {
            self.last_attribute = id;
        } else {
            self.last_child = id;
        }
    }
}

impl Document {
    fn is_ancestor_or_self(&self, candidate: NodeId, id: NodeId) -> bool {
        if candidate != id && self.node(candidate).first_child.is_none() {
            return false;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.node(node).parent;
        }
        false
    }

    fn check_child_adoption(&self, parent: NodeId, child: NodeId) -> bool {
        let attribute = self.node(child).is_attribute();
        match self.node_type(parent) {
            NodeType::Attribute | NodeType::Text | NodeType::Comment | NodeType::Unknown => {
                panic!("{}", description::LEAF_CHILDREN)
            }
            NodeType::Declaration if !attribute => panic!("{}", description::DECLARATION_CHILDREN),
            NodeType::Document if attribute => panic!("{}", description::DOCUMENT_ATTRIBUTES),
            _ => {}
        }
        if self.node_type(child) == NodeType::Document {
            panic!("{}", description::ADOPT_DOCUMENT);
        }
        if self.is_ancestor_or_self(child, parent) {
            panic!("{}", description::ADOPT_ANCESTOR);
        }
        attribute
    }

    fn check_sibling_adoption(&self, anchor: NodeId, node: NodeId) -> NodeId {
        let Some(parent) = self.node(anchor).parent else {
            panic!("{}", description::PARENTLESS_SIBLING);
        };
        if self.node_type(node) == NodeType::Document {
            panic!("{}", description::ADOPT_DOCUMENT);
        }
        if self.node(anchor).is_attribute() != self.node(node).is_attribute() {
            panic!("{}", description::MIXED_SIBLINGS);
        }
        if self.is_ancestor_or_self(node, anchor) {
            panic!("{}", description::ADOPT_ANCESTOR);
        }
        parent
    }

    // Attribute names are unique per owner, the newcomer wins.
    fn remove_duplicate_attributes(&mut self, attribute: NodeId) {
        let Some(owner) = self.node(attribute).parent else {
            return;
        };
        let mut current = self.node(owner).first_attribute;
        while let Some(other) = current {
            current = self.node(other).next;
            if other != attribute && self.attribute_names_match(self.name(other), self.name(attribute))
            {
                self.delete(other);
            }
        }
    }

    /// Appends without any checks. Only for freshly created nodes.
    pub(crate) fn link_last(&mut self, parent: NodeId, child: NodeId, attributes: bool) {
        let last = self.node(parent).chain_last(attributes);
        let node = self.node_mut(child);
        node.parent = Some(parent);
        node.previous = last;
        match last {
            Some(last) => self.node_mut(last).next = Some(child),
            None => self.node_mut(parent).set_chain_first(attributes, Some(child)),
        }
        self.node_mut(parent).set_chain_last(attributes, Some(child));
    }

    /// Links detached `node` right before `anchor`, a child of `parent`,
    /// without any checks.
    pub(crate) fn link_before(&mut self, parent: NodeId, anchor: NodeId, node: NodeId, attributes: bool) {
        let previous = self.node(anchor).previous;
        let moved = self.node_mut(node);
        moved.parent = Some(parent);
        moved.previous = previous;
        moved.next = Some(anchor);
        self.node_mut(anchor).previous = Some(node);
        match previous {
            Some(previous) => self.node_mut(previous).next = Some(node),
            None => self.node_mut(parent).set_chain_first(attributes, Some(node)),
        }
    }

    /// Links detached `node` right after `anchor`, a child of `parent`,
    /// without any checks.
    pub(crate) fn link_after(&mut self, parent: NodeId, anchor: NodeId, node: NodeId, attributes: bool) {
        let next = self.node(anchor).next;
        let moved = self.node_mut(node);
        moved.parent = Some(parent);
        moved.previous = Some(anchor);
        moved.next = next;
        self.node_mut(anchor).next = Some(node);
        match next {
            Some(next) => self.node_mut(next).previous = Some(node),
            None => self.node_mut(parent).set_chain_last(attributes, Some(node)),
        }
    }

    /// Detaches a node from its parent and siblings.
    ///
    /// The neighbors are linked to each other and the node keeps its
    /// own children and attributes. Orphaning a detached node does
    /// nothing.
    pub fn orphan(&mut self, id: NodeId) {
        let node = self.node(id);
        let parent = node.parent;
        let previous = node.previous;
        let next = node.next;
        let attributes = node.is_attribute();

        if let Some(parent) = parent {
            let parent = self.node_mut(parent);
            if parent.chain_first(attributes) == Some(id) {
                parent.set_chain_first(attributes, next);
            }
            if parent.chain_last(attributes) == Some(id) {
                parent.set_chain_last(attributes, previous);
            }
        }
        if let Some(next) = next {
            self.node_mut(next).previous = previous;
        }
        if let Some(previous) = previous {
            self.node_mut(previous).next = next;
        }

        let node = self.node_mut(id);
        node.parent = None;
        node.previous = None;
        node.next = None;
    }

    /// Moves `child` to the front of `parent`'s children.
    ///
    /// Attribute nodes go to the front of the attribute list instead,
    /// replacing any attribute with the same name.
    ///
    /// # Panics
    ///
    /// If `parent` cannot have such a child: text, comment, unknown
    /// and attribute nodes have no children, declarations only take
    /// attributes, and documents take no attributes. Also if `child`
    /// is a document or an ancestor of `parent`.
    pub fn adopt_as_first_child(&mut self, parent: NodeId, child: NodeId) {
        let attributes = self.check_child_adoption(parent, child);
        self.orphan(child);

        let first = self.node(parent).chain_first(attributes);
        let node = self.node_mut(child);
        node.parent = Some(parent);
        node.next = first;
        match first {
            Some(first) => self.node_mut(first).previous = Some(child),
            None => self.node_mut(parent).set_chain_last(attributes, Some(child)),
        }
        self.node_mut(parent).set_chain_first(attributes, Some(child));

        if attributes {
            self.remove_duplicate_attributes(child);
        }
    }

    /// Moves `child` to the end of `parent`'s children.
    ///
    /// Same rules as [adopt_as_first_child()](Document::adopt_as_first_child).
    pub fn adopt_as_last_child(&mut self, parent: NodeId, child: NodeId) {
        let attributes = self.check_child_adoption(parent, child);
        self.orphan(child);
        self.link_last(parent, child, attributes);

        if attributes {
            self.remove_duplicate_attributes(child);
        }
    }

    /// Moves `node` right before `anchor`, under the same parent.
    ///
    /// # Panics
    ///
    /// If `anchor` has no parent, if only one of them is an attribute,
    /// or if `node` is a document or an ancestor of `anchor`.
    pub fn adopt_as_previous_sibling(&mut self, anchor: NodeId, node: NodeId) {
        if anchor == node {
            return;
        }
        let parent = self.check_sibling_adoption(anchor, node);
        let attributes = self.node(node).is_attribute();
        self.orphan(node);
        self.link_before(parent, anchor, node, attributes);

        if attributes {
            self.remove_duplicate_attributes(node);
        }
    }

    /// Moves `node` right after `anchor`, under the same parent.
    ///
    /// Same rules as [adopt_as_previous_sibling()](Document::adopt_as_previous_sibling).
    pub fn adopt_as_next_sibling(&mut self, anchor: NodeId, node: NodeId) {
        if anchor == node {
            return;
        }
        let parent = self.check_sibling_adoption(anchor, node);
        let attributes = self.node(node).is_attribute();
        self.orphan(node);
        self.link_after(parent, anchor, node, attributes);

        if attributes {
            self.remove_duplicate_attributes(node);
        }
    }
}
