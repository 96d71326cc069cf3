/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Deterministic ordering of children and attributes.
//!
//! Canonicalization reorders every element of a subtree in place:
//!
//! * The first child, of any type, stays first.
//! * Every later element is inserted before the first already placed
//!   element with a greater name. Equal names keep their order.
//! * Every later non-element node goes right after the node placed
//!   before it.
//! * Attributes are sorted by name the same way.
//!
//! Applying it again does not change the result, so two trees with
//! the same content in different orders serialize to the same text.

use crate::Document;
use crate::NodeFilter;
use crate::NodeId;
use crate::NodeType;
use crate::WalkSink;
use crate::generator::Generator;

struct Canonicalizer;

impl WalkSink for Canonicalizer {
    fn on_element_enter(&mut self, document: &mut Document, element: NodeId) -> bool {
        sort_children(document, element);
        sort_attributes(document, element);
        false
    }
}

// First placed element sorting after `child`, if any.
fn insertion_point(document: &Document, element: NodeId, child: NodeId) -> Option<NodeId> {
    let name = document.name(child);
    document
        .children(element)
        .find(|&placed| document.node_type(placed) == NodeType::Element && document.name(placed) > name)
}

fn sort_children(document: &mut Document, element: NodeId) {
    let children: Vec<NodeId> = document.children(element).collect();
    if children.len() < 2 {
        return;
    }
    for &child in &children {
        document.orphan(child);
    }

    // The children are detached and none of them is an ancestor of
    // `element`, so they are linked back without the adoption checks.
    let mut last_insert: Option<NodeId> = None;
    for child in children {
        match last_insert {
            None => document.link_last(element, child, false),
            Some(previous) if document.node_type(child) != NodeType::Element => {
                document.link_after(element, previous, child, false);
            }
            Some(_) => match insertion_point(document, element, child) {
                Some(anchor) => document.link_before(element, anchor, child, false),
                None => document.link_last(element, child, false),
            },
        }
        last_insert = Some(child);
    }
}

fn sort_attributes(document: &mut Document, element: NodeId) {
    let mut attributes = Vec::new();
    let mut current = document.first_attribute(element);
    while let Some(attribute) = current {
        current = document.next_sibling(attribute);
        attributes.push(attribute);
    }
    if attributes.len() < 2 {
        return;
    }
    for &attribute in &attributes {
        document.orphan(attribute);
    }

    for attribute in attributes {
        let mut anchor = document.first_attribute(element);
        while let Some(placed) = anchor {
            if document.name(placed) > document.name(attribute) {
                break;
            }
            anchor = document.next_sibling(placed);
        }
        match anchor {
            Some(anchor) => document.link_before(element, anchor, attribute, true),
            None => document.link_last(element, attribute, true),
        }
    }
}

/// Reorders the children and attributes of `element` and all of its
/// descendant elements into canonical order.
///
/// ```
/// use dualdom::{Document, canonicalize};
///
/// let mut doc = Document::from_xml("<r z='1' y='2'><b/>text<a/></r>");
/// let r = doc.first_child_element(doc.root()).unwrap();
/// canonicalize(&mut doc, r);
/// assert_eq!(doc.to_string(), "<r y=\"2\" z=\"1\"><a/><b/>text</r>");
/// ```
pub fn canonicalize(document: &mut Document, element: NodeId) {
    document.walk(element, &mut Canonicalizer, NodeFilter::ELEMENT);
}

/// Canonicalized deep copy of `element`. The copy is detached, the
/// original subtree is not modified.
pub fn clone_as_canonical_json(document: &mut Document, element: NodeId) -> NodeId {
    let copy = document.clone_node(element);
    if tracing::enabled!(tracing::Level::TRACE) {
        let json = Generator::json().write(document, copy);
        tracing::trace!(%json, "before canonicalization");
    }
    canonicalize(document, copy);
    if tracing::enabled!(tracing::Level::TRACE) {
        let json = Generator::json().write(document, copy);
        tracing::trace!(%json, "after canonicalization");
    }
    copy
}
