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
mod iterators;
mod mutation;
mod navigation;

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt::Debug;
use std::str::FromStr;

use crate::arena::Arena;
use crate::arena::ArenaStats;
use crate::arena::NodeId;
use crate::generator::Generator;
use crate::parser::Parser;
use crate::text;
use crate::text::TextFormat;

pub(crate) use error::description;
pub use error::DomError;
pub use iterators::Attributes;
pub use iterators::Children;
pub use iterators::DescendantOrSelf;

/// Variant of a node, without its data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeType {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
    Declaration,
    Unknown,
}

/// Borrowed view of a node's variant and data, for pattern matching.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind<'a> {
    Document,
    Element {
        name: &'a str,
    },
    Attribute {
        name: &'a str,
        value: &'a str,
    },
    Text {
        value: &'a str,
        format: TextFormat,
        output_format: TextFormat,
    },
    Comment {
        value: &'a str,
    },
    Declaration,
    Unknown {
        value: &'a str,
    },
}

#[derive(Clone, Debug)]
pub(crate) enum NodePayload {
    Document,
    Element {
        name: String,
    },
    Attribute {
        name: String,
        value: String,
        quoted: bool,
    },
    Text {
        value: String,
        format: TextFormat,
        output_format: TextFormat,
    },
    Comment {
        value: String,
    },
    Declaration,
    Unknown {
        value: String,
    },
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) first_attribute: Option<NodeId>,
    pub(crate) last_attribute: Option<NodeId>,
    pub(crate) user_data: usize,
    pub(crate) payload: NodePayload,
}

impl Node {
    fn new(payload: NodePayload) -> Node {
        Node {
            parent: None,
            previous: None,
            next: None,
            first_child: None,
            last_child: None,
            first_attribute: None,
            last_attribute: None,
            user_data: 0,
            payload,
        }
    }

    pub(crate) fn node_type(&self) -> NodeType {
        match self.payload {
            NodePayload::Document => NodeType::Document,
            NodePayload::Element { .. } => NodeType::Element,
            NodePayload::Attribute { .. } => NodeType::Attribute,
            NodePayload::Text { .. } => NodeType::Text,
            NodePayload::Comment { .. } => NodeType::Comment,
            NodePayload::Declaration => NodeType::Declaration,
            NodePayload::Unknown { .. } => NodeType::Unknown,
        }
    }

    pub(crate) fn is_attribute(&self) -> bool {
        matches!(self.payload, NodePayload::Attribute { .. })
    }

    pub(crate) fn is_element(&self) -> bool {
        matches!(self.payload, NodePayload::Element { .. })
    }
}

/// An XML or JSON document tree.
///
/// The document owns every node in an arena and hands out [NodeId]
/// handles. It always has a root node of [NodeType::Document]. New
/// nodes are created detached and get attached with the adopt
/// methods; a detached node stays alive until it is deleted or the
/// document is dropped.
///
/// ```
/// use dualdom::Document;
///
/// let mut doc = Document::new();
/// let root = doc.create_element("root");
/// doc.adopt_as_last_child(doc.root(), root);
/// let x = doc.create_element("x");
/// doc.adopt_as_last_child(root, x);
/// let text = doc.create_text("1 < 2");
/// doc.adopt_as_last_child(x, text);
/// assert_eq!(doc.to_string(), "<root><x>1 &lt; 2</x></root>");
/// ```
pub struct Document {
    nodes: Arena<Node>,
    root: NodeId,
    element_names_case_sensitive: bool,
    attribute_names_case_sensitive: bool,
}

impl Document {
    pub fn new() -> Document {
        Self::with_case_sensitivity(true, true)
    }

    /// Creates an empty document with the given name matching rules
    /// for element and attribute lookups.
    pub fn with_case_sensitivity(elements: bool, attributes: bool) -> Document {
        let mut nodes = Arena::new();
        let root = nodes.insert(Node::new(NodePayload::Document));
        Document {
            nodes,
            root,
            element_names_case_sensitive: elements,
            attribute_names_case_sensitive: attributes,
        }
    }

    /// Parses XML text, ignoring any parse warnings.
    pub fn from_xml(text: &str) -> Document {
        Parser::new().parse_xml(text)
    }

    /// Parses JSON text, ignoring any parse warnings.
    pub fn from_json(text: &str) -> Document {
        Parser::new().parse_json(text)
    }

    /// Handle of the Document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn element_names_case_sensitive(&self) -> bool {
        self.element_names_case_sensitive
    }

    pub fn attribute_names_case_sensitive(&self) -> bool {
        self.attribute_names_case_sensitive
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.nodes.stats()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub(crate) fn element_names_match(&self, a: &str, b: &str) -> bool {
        names_match(a, b, self.element_names_case_sensitive)
    }

    pub(crate) fn attribute_names_match(&self, a: &str, b: &str) -> bool {
        names_match(a, b, self.attribute_names_case_sensitive)
    }

    //
    // Node creation
    //

    fn alloc(&mut self, payload: NodePayload) -> NodeId {
        self.nodes.insert(Node::new(payload))
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodePayload::Element {
            name: name.to_string(),
        })
    }

    /// Creates an attribute. `value` is plain text.
    pub fn create_attribute(&mut self, name: &str, value: &str) -> NodeId {
        self.alloc(NodePayload::Attribute {
            name: name.to_string(),
            value: value.to_string(),
            quoted: true,
        })
    }

    /// Creates a text node from plain text, stored entity encoded.
    pub fn create_text(&mut self, plain: &str) -> NodeId {
        let value = text::convert(plain, TextFormat::Cdata, TextFormat::EntityEncoded);
        self.create_text_with_format(&value, TextFormat::EntityEncoded)
    }

    /// Creates a text node from an already encoded value.
    pub fn create_text_with_format(&mut self, value: &str, format: TextFormat) -> NodeId {
        self.alloc(NodePayload::Text {
            value: value.to_string(),
            format,
            output_format: format,
        })
    }

    pub fn create_comment(&mut self, value: &str) -> NodeId {
        self.alloc(NodePayload::Comment {
            value: value.to_string(),
        })
    }

    pub fn create_declaration(&mut self) -> NodeId {
        self.alloc(NodePayload::Declaration)
    }

    /// Creates an unknown markup node. `value` is the markup without
    /// the surrounding `<` and `>`.
    pub fn create_unknown(&mut self, value: &str) -> NodeId {
        self.alloc(NodePayload::Unknown {
            value: value.to_string(),
        })
    }

    //
    // Node properties
    //

    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.node(id).node_type()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind<'_> {
        match &self.node(id).payload {
            NodePayload::Document => NodeKind::Document,
            NodePayload::Element { name } => NodeKind::Element { name },
            NodePayload::Attribute { name, value, .. } => NodeKind::Attribute { name, value },
            NodePayload::Text {
                value,
                format,
                output_format,
            } => NodeKind::Text {
                value,
                format: *format,
                output_format: *output_format,
            },
            NodePayload::Comment { value } => NodeKind::Comment { value },
            NodePayload::Declaration => NodeKind::Declaration,
            NodePayload::Unknown { value } => NodeKind::Unknown { value },
        }
    }

    /// Name of an element or attribute, empty for other nodes.
    pub fn name(&self, id: NodeId) -> &str {
        match &self.node(id).payload {
            NodePayload::Element { name } | NodePayload::Attribute { name, .. } => name,
            _ => "",
        }
    }

    /// Element name, attribute value, or the stored text of a text,
    /// comment or unknown node. Documents and declarations have no value.
    pub fn value(&self, id: NodeId) -> &str {
        match &self.node(id).payload {
            NodePayload::Element { name } => name,
            NodePayload::Attribute { value, .. }
            | NodePayload::Text { value, .. }
            | NodePayload::Comment { value }
            | NodePayload::Unknown { value } => value,
            NodePayload::Document | NodePayload::Declaration => "",
        }
    }

    /// Renames an element or attribute.
    pub fn set_name(&mut self, id: NodeId, new_name: &str) {
        match &mut self.node_mut(id).payload {
            NodePayload::Element { name } | NodePayload::Attribute { name, .. } => {
                new_name.clone_into(name);
            }
            _ => panic!("{}", description::NO_NAME),
        }
    }

    /// Replaces the value as returned by [value()](Document::value).
    ///
    /// Text nodes keep their formats, so `new_value` must already be
    /// encoded in the storage format.
    pub fn set_value(&mut self, id: NodeId, new_value: &str) {
        match &mut self.node_mut(id).payload {
            NodePayload::Element { name: value }
            | NodePayload::Attribute { value, .. }
            | NodePayload::Text { value, .. }
            | NodePayload::Comment { value }
            | NodePayload::Unknown { value } => new_value.clone_into(value),
            NodePayload::Document | NodePayload::Declaration => {
                panic!("{}", description::NO_VALUE)
            }
        }
    }

    /// Whether the JSON form of an attribute value is a string. An
    /// unquoted value is written as a bare JSON literal, such as a
    /// number or a boolean. XML output always quotes.
    pub fn is_quoted(&self, attribute: NodeId) -> bool {
        match &self.node(attribute).payload {
            NodePayload::Attribute { quoted, .. } => *quoted,
            _ => panic!("{}", description::NOT_ATTRIBUTE),
        }
    }

    pub fn set_quoted(&mut self, attribute: NodeId, new_quoted: bool) {
        match &mut self.node_mut(attribute).payload {
            NodePayload::Attribute { quoted, .. } => *quoted = new_quoted,
            _ => panic!("{}", description::NOT_ATTRIBUTE),
        }
    }

    pub fn user_data(&self, id: NodeId) -> usize {
        self.node(id).user_data
    }

    /// Attaches an opaque caller value to the node. The tree never
    /// looks at it.
    pub fn set_user_data(&mut self, id: NodeId, data: usize) {
        self.node_mut(id).user_data = data;
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).first_child.is_some()
    }

    pub fn has_attributes(&self, id: NodeId) -> bool {
        self.node(id).first_attribute.is_some()
    }

    //
    // Text nodes
    //

    fn text_parts(&self, id: NodeId) -> (&str, TextFormat, TextFormat) {
        match &self.node(id).payload {
            NodePayload::Text {
                value,
                format,
                output_format,
            } => (value, *format, *output_format),
            _ => panic!("{}", description::NOT_TEXT),
        }
    }

    pub fn text_format(&self, id: NodeId) -> TextFormat {
        self.text_parts(id).1
    }

    pub fn text_output_format(&self, id: NodeId) -> TextFormat {
        self.text_parts(id).2
    }

    /// Stores an encoded value and makes its format both the storage
    /// and the output format.
    pub fn set_text_value(&mut self, id: NodeId, new_value: &str, new_format: TextFormat) {
        match &mut self.node_mut(id).payload {
            NodePayload::Text {
                value,
                format,
                output_format,
            } => {
                new_value.clone_into(value);
                *format = new_format;
                *output_format = new_format;
            }
            _ => panic!("{}", description::NOT_TEXT),
        }
    }

    pub fn set_text_value_and_entity_encode(&mut self, id: NodeId, plain: &str) {
        let value = text::convert(plain, TextFormat::Cdata, TextFormat::EntityEncoded);
        self.set_text_value(id, &value, TextFormat::EntityEncoded);
    }

    pub fn set_text_value_and_json_encode(&mut self, id: NodeId, plain: &str) {
        let value = text::convert(plain, TextFormat::Cdata, TextFormat::JsonStringEncoded);
        self.set_text_value(id, &value, TextFormat::JsonStringEncoded);
    }

    /// Changes how the text is written without touching the stored value.
    pub fn set_text_output_format(&mut self, id: NodeId, new_format: TextFormat) {
        match &mut self.node_mut(id).payload {
            NodePayload::Text { output_format, .. } => *output_format = new_format,
            _ => panic!("{}", description::NOT_TEXT),
        }
    }

    pub fn text_value_in_format(
        &self,
        id: NodeId,
        output: TextFormat,
        normalize: bool,
        encode_cr: bool,
    ) -> Cow<'_, str> {
        let (value, format, _) = self.text_parts(id);
        text::value_in_format(value, format, output, normalize, encode_cr)
    }

    /// Plain characters of a text node.
    pub fn text_value_decoded(&self, id: NodeId) -> Cow<'_, str> {
        let (value, format, _) = self.text_parts(id);
        text::convert(value, format, TextFormat::Cdata)
    }

    /// Stored values of the direct text children, concatenated.
    pub fn text(&self, element: NodeId) -> String {
        let mut buf = String::new();
        for child in self.children(element) {
            if let NodePayload::Text { value, .. } = &self.node(child).payload {
                buf.push_str(value);
            }
        }
        buf
    }

    /// Plain characters of the direct text children, concatenated.
    pub fn text_decoded(&self, element: NodeId) -> String {
        let mut buf = String::new();
        for child in self.children(element) {
            if let NodePayload::Text { value, format, .. } = &self.node(child).payload {
                buf.push_str(&text::convert(value, *format, TextFormat::Cdata));
            }
        }
        buf
    }

    //
    // Attributes of elements and declarations
    //

    pub fn first_attribute(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_attribute
    }

    pub fn last_attribute(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_attribute
    }

    pub fn last_attribute_checked(&self, id: NodeId) -> Result<NodeId, DomError> {
        self.last_attribute(id)
            .ok_or(DomError::CheckFailed(description::NO_ATTRIBUTE))
    }

    pub fn find_attribute(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut attribute = self.node(id).first_attribute;
        while let Some(current) = attribute {
            if self.attribute_names_match(self.name(current), name) {
                return Some(current);
            }
            attribute = self.node(current).next;
        }
        None
    }

    pub fn attribute_value(&self, id: NodeId, name: &str) -> Option<&str> {
        self.find_attribute(id, name)
            .map(|attribute| self.value(attribute))
    }

    pub fn attribute_value_checked(&self, id: NodeId, name: &str) -> Result<&str, DomError> {
        self.attribute_value(id, name)
            .ok_or(DomError::CheckFailed(description::NO_ATTRIBUTE))
    }

    /// Sets an attribute, updating it in place if the name is already
    /// used. Returns true if an existing attribute was changed.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        if let Some(existing) = self.find_attribute(id, name) {
            self.set_value(existing, value);
            return true;
        }
        let attribute = self.create_attribute(name, value);
        self.adopt_as_last_child(id, attribute);
        false
    }

    /// Adopts an attribute node as the last attribute, deleting any
    /// attribute with the same name. Returns true if one was deleted.
    pub fn set_attribute_node(&mut self, id: NodeId, attribute: NodeId) -> bool {
        let replaced = match self.find_attribute(id, self.name(attribute)) {
            Some(existing) => existing != attribute,
            None => false,
        };
        self.adopt_as_last_child(id, attribute);
        replaced
    }

    pub fn delete_attribute(&mut self, id: NodeId, name: &str) -> bool {
        match self.find_attribute(id, name) {
            Some(attribute) => {
                self.delete(attribute);
                true
            }
            None => false,
        }
    }

    //
    // Lifecycle
    //

    fn free_subtrees(&mut self, mut pending: Vec<NodeId>) {
        while let Some(id) = pending.pop() {
            let Some(node) = self.nodes.remove(id) else {
                continue;
            };
            let mut child = node.first_child;
            while let Some(current) = child {
                child = self.nodes[current].next;
                pending.push(current);
            }
            let mut attribute = node.first_attribute;
            while let Some(current) = attribute {
                attribute = self.nodes[current].next;
                pending.push(current);
            }
        }
    }

    /// Deletes all children. Attributes are kept.
    pub fn remove_children(&mut self, id: NodeId) {
        let mut pending = Vec::new();
        let node = self.node_mut(id);
        let mut child = node.first_child.take();
        node.last_child = None;
        while let Some(current) = child {
            child = self.node(current).next;
            pending.push(current);
        }
        self.free_subtrees(pending);
    }

    /// Deletes children and attributes, clears the user data, and
    /// empties the value of text, comment and unknown nodes.
    pub fn clear(&mut self, id: NodeId) {
        self.remove_children(id);
        let mut pending = Vec::new();
        let node = self.node_mut(id);
        let mut attribute = node.first_attribute.take();
        node.last_attribute = None;
        node.user_data = 0;
        match &mut node.payload {
            NodePayload::Text { value, .. }
            | NodePayload::Comment { value }
            | NodePayload::Unknown { value } => value.clear(),
            _ => {}
        }
        while let Some(current) = attribute {
            attribute = self.node(current).next;
            pending.push(current);
        }
        self.free_subtrees(pending);
    }

    /// Detaches a node and deletes it with its whole subtree.
    pub fn delete(&mut self, id: NodeId) {
        if id == self.root {
            panic!("{}", description::DELETE_ROOT);
        }
        self.orphan(id);
        self.free_subtrees(vec![id]);
    }

    fn clone_single(&mut self, id: NodeId) -> NodeId {
        let payload = self.node(id).payload.clone();
        let copy = self.alloc(payload);
        let mut attribute = self.node(id).first_attribute;
        while let Some(current) = attribute {
            let payload = self.node(current).payload.clone();
            let attribute_copy = self.alloc(payload);
            self.link_last(copy, attribute_copy, true);
            attribute = self.node(current).next;
        }
        copy
    }

    /// Deep copy of a node and its subtree. The copy is detached.
    pub fn clone_node(&mut self, id: NodeId) -> NodeId {
        let top = self.clone_single(id);

        let mut source = self.node(id).first_child;
        let mut target_parent = top;
        while let Some(current) = source {
            let copy = self.clone_single(current);
            self.link_last(target_parent, copy, false);
            if let Some(child) = self.node(current).first_child {
                source = Some(child);
                target_parent = copy;
                continue;
            }
            let mut climb = current;
            source = loop {
                if let Some(next) = self.node(climb).next {
                    break Some(next);
                }
                match self.node(climb).parent {
                    Some(parent) if parent != id => {
                        climb = parent;
                        match self.node(target_parent).parent {
                            Some(up) => target_parent = up,
                            None => break None,
                        }
                    }
                    _ => break None,
                }
            };
        }

        top
    }

    //
    // Views
    //

    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { document: self, id }
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children::new(self, self.node(id).first_child)
    }

    /// Name and value pairs of the attributes.
    pub fn attributes(&self, id: NodeId) -> Attributes<'_> {
        Attributes::new(self, self.node(id).first_attribute)
    }

    /// The node followed by its descendants in document order.
    pub fn descendant_or_self(&self, id: NodeId) -> DescendantOrSelf<'_> {
        DescendantOrSelf::new(self, id)
    }

    /// Byte length of the XML text of the whole document.
    pub fn str_size(&self) -> usize {
        Generator::xml().measure(self, self.root)
    }

    #[allow(
        clippy::inherent_to_string_shadow_display,
        reason = "prereserving exact capacity makes this function significantly faster"
    )]
    pub fn to_string(&self) -> String {
        Generator::xml().write(self, self.root)
    }
}

fn names_match(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("stats", &self.arena_stats())
            .finish()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.node_ref(self.root), f)
    }
}

impl FromStr for Document {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Document::from_xml(s))
    }
}

/// A read only handle to a node, borrowing its document.
///
/// Useful for chaining navigation calls and for printing a subtree
/// as XML with `format!`.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn wrap(self, id: Option<NodeId>) -> Option<NodeRef<'a>> {
        id.map(|id| NodeRef {
            document: self.document,
            id,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn kind(&self) -> NodeKind<'a> {
        self.document.kind(self.id)
    }

    pub fn name(&self) -> &'a str {
        self.document.name(self.id)
    }

    pub fn value(&self) -> &'a str {
        self.document.value(self.id)
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.document.attribute_value(self.id, name)
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.wrap(self.document.parent(self.id))
    }

    pub fn first_child(self) -> Option<NodeRef<'a>> {
        self.wrap(self.document.first_child(self.id))
    }

    pub fn last_child(self) -> Option<NodeRef<'a>> {
        self.wrap(self.document.last_child(self.id))
    }

    pub fn next_sibling(self) -> Option<NodeRef<'a>> {
        self.wrap(self.document.next_sibling(self.id))
    }

    pub fn previous_sibling(self) -> Option<NodeRef<'a>> {
        self.wrap(self.document.previous_sibling(self.id))
    }

    pub fn first_child_element(self) -> Option<NodeRef<'a>> {
        self.wrap(self.document.first_child_element(self.id))
    }

    pub fn next_sibling_element(self) -> Option<NodeRef<'a>> {
        self.wrap(self.document.next_sibling_element(self.id))
    }

    pub fn find_first_child_element(self, name: &str) -> Option<NodeRef<'a>> {
        self.wrap(self.document.find_first_child_element(self.id, name))
    }

    pub fn children(self) -> Children<'a> {
        self.document.children(self.id)
    }

    pub fn str_size(&self) -> usize {
        Generator::xml().measure(self.document, self.id)
    }
}

impl Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeRef ({})", self.id)
    }
}

impl std::fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&Generator::xml().write(self.document, self.id))
    }
}

#[cfg(test)]
mod tests;

mod nocompile;
