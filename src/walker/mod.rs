/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::ops::BitOr;

use crate::Document;
use crate::NodeId;
use crate::NodeType;

/// Set of node types a walk reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeFilter(u32);

impl NodeFilter {
    pub const NONE: NodeFilter = NodeFilter(0);
    pub const DOCUMENT: NodeFilter = NodeFilter(0x01);
    pub const ELEMENT: NodeFilter = NodeFilter(0x02);
    pub const ATTRIBUTE: NodeFilter = NodeFilter(0x04);
    pub const TEXT: NodeFilter = NodeFilter(0x08);
    pub const COMMENT: NodeFilter = NodeFilter(0x10);
    pub const DECLARATION: NodeFilter = NodeFilter(0x20);
    pub const UNKNOWN: NodeFilter = NodeFilter(0x40);
    pub const ALL: NodeFilter = NodeFilter(0x7f);

    pub fn of(node_type: NodeType) -> NodeFilter {
        match node_type {
            NodeType::Document => NodeFilter::DOCUMENT,
            NodeType::Element => NodeFilter::ELEMENT,
            NodeType::Attribute => NodeFilter::ATTRIBUTE,
            NodeType::Text => NodeFilter::TEXT,
            NodeType::Comment => NodeFilter::COMMENT,
            NodeType::Declaration => NodeFilter::DECLARATION,
            NodeType::Unknown => NodeFilter::UNKNOWN,
        }
    }

    pub fn contains(self, node_type: NodeType) -> bool {
        self.0 & NodeFilter::of(node_type).0 != 0
    }
}

impl Default for NodeFilter {
    fn default() -> Self {
        NodeFilter::ALL
    }
}

impl BitOr for NodeFilter {
    type Output = NodeFilter;

    fn bitor(self, other: NodeFilter) -> NodeFilter {
        NodeFilter(self.0 | other.0)
    }
}

/// Callbacks of [Document::walk].
///
/// Every method returns true to stop the whole walk. The defaults do
/// nothing and keep walking. Callbacks get the document mutably and
/// may restructure the tree; a node that was moved away by its own
/// enter callback is not descended into.
#[allow(unused_variables)]
pub trait WalkSink {
    fn on_document_enter(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_document_exit(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_element_enter(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_element_exit(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_attribute(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_text(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_comment(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_declaration_enter(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_declaration_exit(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }

    fn on_unknown(&mut self, document: &mut Document, node: NodeId) -> bool {
        false
    }
}

fn enter<S: WalkSink + ?Sized>(
    sink: &mut S,
    document: &mut Document,
    node: NodeId,
    node_type: NodeType,
) -> bool {
    match node_type {
        NodeType::Document => sink.on_document_enter(document, node),
        NodeType::Element => sink.on_element_enter(document, node),
        NodeType::Attribute => sink.on_attribute(document, node),
        NodeType::Text => sink.on_text(document, node),
        NodeType::Comment => sink.on_comment(document, node),
        NodeType::Declaration => sink.on_declaration_enter(document, node),
        NodeType::Unknown => sink.on_unknown(document, node),
    }
}

fn exit<S: WalkSink + ?Sized>(
    sink: &mut S,
    document: &mut Document,
    node: NodeId,
    node_type: NodeType,
) -> bool {
    match node_type {
        NodeType::Document => sink.on_document_exit(document, node),
        NodeType::Element => sink.on_element_exit(document, node),
        NodeType::Declaration => sink.on_declaration_exit(document, node),
        _ => false,
    }
}

impl Document {
    fn live(&self, id: Option<NodeId>) -> Option<NodeId> {
        id.filter(|id| self.contains(*id))
    }

    /// Visits `start` and its subtree in document order without
    /// recursion.
    ///
    /// Documents, elements and declarations get enter and exit calls,
    /// other nodes a single call, as long as their type is in
    /// `filter`. Attributes are reported right after their owner's
    /// enter call. The walk never leaves the subtree of `start`.
    ///
    /// Returns true if a callback stopped the walk.
    pub fn walk<S: WalkSink + ?Sized>(
        &mut self,
        start: NodeId,
        sink: &mut S,
        filter: NodeFilter,
    ) -> bool {
        let mut current = start;
        let mut allow_children = true;

        loop {
            let next_sibling = self.next_sibling(current);
            let parent = self.parent(current);
            let node_type = self.node_type(current);
            let mut descend = None;

            if allow_children {
                'visit: {
                    if filter.contains(node_type) {
                        if enter(sink, self, current, node_type) {
                            return true;
                        }
                        if !self.contains(current)
                            || self.next_sibling(current) != next_sibling
                            || self.parent(current) != parent
                        {
                            // Moved by the callback, its subtree is not ours anymore
                            break 'visit;
                        }
                    }

                    if filter.contains(NodeType::Attribute) {
                        let mut attribute = self.first_attribute(current);
                        while let Some(id) = self.live(attribute) {
                            attribute = self.next_sibling(id);
                            if sink.on_attribute(self, id) {
                                return true;
                            }
                        }
                    }

                    if self.contains(current) {
                        descend = self.first_child(current);
                    }
                }
            }

            if let Some(child) = descend {
                current = child;
                allow_children = true;
                continue;
            }

            if self.contains(current)
                && filter.contains(node_type)
                && exit(sink, self, current, node_type)
            {
                return true;
            }

            if current == start {
                break;
            }
            if let Some(next) = self.live(next_sibling) {
                current = next;
                allow_children = true;
                continue;
            }
            match self.live(parent) {
                Some(parent) => {
                    current = parent;
                    allow_children = false;
                }
                None => break,
            }
        }

        false
    }
}
