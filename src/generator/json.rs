/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! JSON mapping of the tree.
//!
//! A document is an object of its members. An element is written as
//! a member named after it, with a value depending on its content:
//!
//! - an object when it has attributes or child elements, holding
//!   `"$name"` members for attributes (bare literals when the
//!   attribute is not quoted), members for child elements and
//!   `"#text"` members for runs of text,
//! - `""` when it has no text at all,
//! - the bare literal when its only text is a JSON number,
//! - a string of its concatenated texts otherwise.
//!
//! Consecutive elements with the same name become one member with an
//! array value. Comments, declarations, unknowns and empty texts are
//! not written.

use std::iter::successors;

use crate::Document;
use crate::NodeId;
use crate::NodeKind;
use crate::NodeType;
use crate::text;
use crate::text::TextFormat;
use crate::text::json_escape;
use crate::text::json_escaped_size;

use super::Generator;
use super::Step;
use super::Visitor;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Value {
    Object,
    Empty,
    Raw(NodeId),
    Str,
}

// Where a member sits among the members of its container
#[derive(Clone, Copy, Debug, Default)]
struct Layout {
    separator: bool,
    key: bool,
    open_array: bool,
    close_array: bool,
}

fn non_empty_text(document: &Document, id: NodeId) -> bool {
    matches!(document.kind(id), NodeKind::Text { value, .. } if !value.is_empty())
}

fn is_member(document: &Document, id: NodeId) -> bool {
    document.node_type(id) == NodeType::Element || non_empty_text(document, id)
}

fn next_member(document: &Document, id: NodeId) -> Option<NodeId> {
    successors(document.next_sibling(id), |id| document.next_sibling(*id))
        .find(|id| is_member(document, *id))
}

fn previous_member(document: &Document, id: NodeId) -> Option<NodeId> {
    successors(document.previous_sibling(id), |id| document.previous_sibling(*id))
        .find(|id| is_member(document, *id))
}

fn same_element(document: &Document, id: NodeId, other: Option<NodeId>) -> bool {
    match other {
        Some(other) => {
            document.node_type(other) == NodeType::Element && document.name(other) == document.name(id)
        }
        None => false,
    }
}

fn is_text(document: &Document, id: Option<NodeId>) -> bool {
    id.is_some_and(|id| document.node_type(id) == NodeType::Text)
}

fn element_value(document: &Document, element: NodeId) -> Value {
    if document.has_attributes(element) {
        return Value::Object;
    }
    let mut texts = 0;
    let mut last_text = None;
    for child in document.children(element) {
        match document.kind(child) {
            NodeKind::Element { .. } => return Value::Object,
            NodeKind::Text { value, .. } if !value.is_empty() => {
                texts += 1;
                last_text = Some(child);
            }
            _ => {}
        }
    }
    match last_text {
        None => Value::Empty,
        Some(text) if texts == 1 && is_number(document, text) => Value::Raw(text),
        Some(_) => Value::Str,
    }
}

fn is_number(document: &Document, id: NodeId) -> bool {
    document.text_output_format(id) == TextFormat::JsonNumberEncoded
}

fn member_layout(document: &Document, id: NodeId) -> Layout {
    let previous = previous_member(document, id);
    let next = next_member(document, id);
    let separator = previous.is_some()
        || document
            .parent(id)
            .is_some_and(|parent| document.has_attributes(parent));

    if document.node_type(id) == NodeType::Text {
        // Only the first text of a run is written, for the whole run
        return Layout {
            separator,
            key: !is_text(document, previous),
            ..Default::default()
        };
    }

    let previous_same = same_element(document, id, previous);
    let next_same = same_element(document, id, next);
    Layout {
        separator,
        key: !previous_same,
        open_array: !previous_same && next_same,
        close_array: previous_same && !next_same,
    }
}

// Texts written together as a single "#text" member
fn text_run(document: &Document, first: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    successors(Some(first), |id| {
        next_member(document, *id).filter(|next| document.node_type(*next) == NodeType::Text)
    })
}

fn text_parts(document: &Document, id: NodeId) -> (&str, TextFormat) {
    match document.kind(id) {
        NodeKind::Text { value, format, .. } => (value, format),
        _ => ("", TextFormat::Cdata),
    }
}

fn string_size(document: &Document, texts: impl Iterator<Item = NodeId>) -> usize {
    let mut size = 2; // quotes
    for id in texts {
        let (value, format) = text_parts(document, id);
        size += text::value_in_format_size(value, format, TextFormat::JsonStringEncoded, false, false);
    }
    size
}

fn string_write(document: &Document, texts: impl Iterator<Item = NodeId>, buf: &mut String) {
    buf.push('"');
    for id in texts {
        let (value, format) = text_parts(document, id);
        buf.push_str(&text::value_in_format(
            value,
            format,
            TextFormat::JsonStringEncoded,
            false,
            false,
        ));
    }
    buf.push('"');
}

fn raw_size(document: &Document, id: NodeId) -> usize {
    let (value, format) = text_parts(document, id);
    text::value_in_format_size(value, format, TextFormat::JsonNumberEncoded, false, false)
}

fn raw_write(document: &Document, id: NodeId, buf: &mut String) {
    let (value, format) = text_parts(document, id);
    buf.push_str(&text::value_in_format(
        value,
        format,
        TextFormat::JsonNumberEncoded,
        false,
        false,
    ));
}

fn scalar_size(document: &Document, id: NodeId) -> usize {
    if is_number(document, id) {
        raw_size(document, id)
    } else {
        string_size(document, std::iter::once(id))
    }
}

fn scalar_write(document: &Document, id: NodeId, buf: &mut String) {
    if is_number(document, id) {
        raw_write(document, id, buf);
    } else {
        string_write(document, std::iter::once(id), buf);
    }
}

fn run_size(document: &Document, first: NodeId) -> usize {
    let mut run = text_run(document, first);
    match (run.next(), run.next()) {
        (Some(only), None) => scalar_size(document, only),
        _ => string_size(document, text_run(document, first)),
    }
}

fn run_write(document: &Document, first: NodeId, buf: &mut String) {
    let mut run = text_run(document, first);
    match (run.next(), run.next()) {
        (Some(only), None) => scalar_write(document, only, buf),
        _ => string_write(document, text_run(document, first), buf),
    }
}

fn attribute_ids(document: &Document, element: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    successors(document.first_attribute(element), |id| document.next_sibling(*id))
}

// Unquoted attributes hold a JSON literal which is written as is
fn is_literal(document: &Document, attribute: NodeId) -> bool {
    !document.is_quoted(attribute) && !document.value(attribute).is_empty()
}

fn attribute_value_size(document: &Document, attribute: NodeId) -> usize {
    let value = document.value(attribute);
    if is_literal(document, attribute) {
        value.len()
    } else {
        2 + json_escaped_size(value)
    }
}

fn attribute_value_write(document: &Document, attribute: NodeId, buf: &mut String) {
    let value = document.value(attribute);
    if is_literal(document, attribute) {
        buf.push_str(value);
    } else {
        buf.push('"');
        json_escape(value, buf);
        buf.push('"');
    }
}

fn element_texts(document: &Document, element: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    document
        .children(element)
        .filter(move |id| non_empty_text(document, *id))
}

impl Generator {
    fn json_key_size(&self, prefix: bool, name: &str) -> usize {
        let mut size = 3; // quotes and colon
        if prefix {
            let mut tmp = [0u8; 4];
            size += json_escaped_size(self.json_attribute_prefix.encode_utf8(&mut tmp));
        }
        size + json_escaped_size(name)
    }

    fn json_key_write(&self, prefix: bool, name: &str, buf: &mut String) {
        buf.push('"');
        if prefix {
            let mut tmp = [0u8; 4];
            json_escape(self.json_attribute_prefix.encode_utf8(&mut tmp), buf);
        }
        json_escape(name, buf);
        buf.push_str("\":");
    }

    fn json_attributes_size(&self, document: &Document, id: NodeId) -> usize {
        let mut size = 0;
        for (i, attribute) in attribute_ids(document, id).enumerate() {
            if i > 0 {
                size += 1;
            }
            size += self.json_key_size(true, document.name(attribute));
            size += attribute_value_size(document, attribute);
        }
        size
    }

    fn json_attributes_write(&self, document: &Document, id: NodeId, buf: &mut String) {
        for (i, attribute) in attribute_ids(document, id).enumerate() {
            if i > 0 {
                buf.push(',');
            }
            self.json_key_write(true, document.name(attribute), buf);
            attribute_value_write(document, attribute, buf);
        }
    }

    // Opens the value of an element. Returns true if the value is
    // complete, false if the children follow and End closes it.
    fn json_value_size(
        &self,
        document: &Document,
        id: NodeId,
        visitor: &mut Visitor<'_>,
        size: &mut usize,
    ) -> bool {
        match element_value(document, id) {
            Value::Object => {
                *size += 1;
                *size += self.json_attributes_size(document, id);
                if document.has_children(id) {
                    return false;
                }
                *size += 1;
            }
            Value::Empty => *size += 2,
            Value::Raw(text) => *size += raw_size(document, text),
            Value::Str => *size += string_size(document, element_texts(document, id)),
        }
        visitor.skip_children();
        true
    }

    fn json_value_write(
        &self,
        document: &Document,
        id: NodeId,
        visitor: &mut Visitor<'_>,
        buf: &mut String,
    ) -> bool {
        match element_value(document, id) {
            Value::Object => {
                buf.push('{');
                self.json_attributes_write(document, id, buf);
                if document.has_children(id) {
                    return false;
                }
                buf.push('}');
            }
            Value::Empty => buf.push_str("\"\""),
            Value::Raw(text) => raw_write(document, text, buf),
            Value::Str => string_write(document, element_texts(document, id), buf),
        }
        visitor.skip_children();
        true
    }

    pub(super) fn json_measure(&self, document: &Document, start: NodeId) -> usize {
        let mut size = 0;

        let mut visitor = Visitor::new(document, start);
        while let Some(step) = visitor.next() {
            match step {
                Step::Start(id) if id == start => match document.kind(id) {
                    NodeKind::Document => {
                        size += 1;
                        if !document.has_children(id) {
                            size += 1;
                        }
                    }
                    NodeKind::Element { name } => {
                        size += 1;
                        size += self.json_key_size(false, name);
                        if self.json_value_size(document, id, &mut visitor, &mut size) {
                            size += 1;
                        }
                    }
                    NodeKind::Attribute { name, .. } => {
                        size += 2; // braces
                        size += self.json_key_size(true, name);
                        size += attribute_value_size(document, id);
                    }
                    NodeKind::Text { .. } => size += scalar_size(document, id),
                    _ => {}
                },
                Step::Start(id) => match document.kind(id) {
                    NodeKind::Element { name } => {
                        let layout = member_layout(document, id);
                        if layout.separator {
                            size += 1;
                        }
                        if layout.key {
                            size += self.json_key_size(false, name);
                        }
                        if layout.open_array {
                            size += 1;
                        }
                        if self.json_value_size(document, id, &mut visitor, &mut size)
                            && layout.close_array
                        {
                            size += 1;
                        }
                    }
                    NodeKind::Text { value, .. } if !value.is_empty() => {
                        let layout = member_layout(document, id);
                        if layout.key {
                            if layout.separator {
                                size += 1;
                            }
                            size += self.json_key_size(false, &self.json_text_key);
                            size += run_size(document, id);
                        }
                    }
                    _ => {}
                },
                Step::End(id) => match document.node_type(id) {
                    NodeType::Document => size += 1,
                    NodeType::Element => {
                        size += 1;
                        if id == start || member_layout(document, id).close_array {
                            size += 1;
                        }
                    }
                    _ => {}
                },
            }
        }

        size
    }

    pub(super) fn json_write(&self, document: &Document, start: NodeId, buf: &mut String) {
        let mut visitor = Visitor::new(document, start);
        while let Some(step) = visitor.next() {
            match step {
                Step::Start(id) if id == start => match document.kind(id) {
                    NodeKind::Document => {
                        buf.push('{');
                        if !document.has_children(id) {
                            buf.push('}');
                        }
                    }
                    NodeKind::Element { name } => {
                        buf.push('{');
                        self.json_key_write(false, name, buf);
                        if self.json_value_write(document, id, &mut visitor, buf) {
                            buf.push('}');
                        }
                    }
                    NodeKind::Attribute { name, .. } => {
                        buf.push('{');
                        self.json_key_write(true, name, buf);
                        attribute_value_write(document, id, buf);
                        buf.push('}');
                    }
                    NodeKind::Text { .. } => scalar_write(document, id, buf),
                    _ => {}
                },
                Step::Start(id) => match document.kind(id) {
                    NodeKind::Element { name } => {
                        let layout = member_layout(document, id);
                        if layout.separator {
                            buf.push(',');
                        }
                        if layout.key {
                            self.json_key_write(false, name, buf);
                        }
                        if layout.open_array {
                            buf.push('[');
                        }
                        if self.json_value_write(document, id, &mut visitor, buf)
                            && layout.close_array
                        {
                            buf.push(']');
                        }
                    }
                    NodeKind::Text { value, .. } if !value.is_empty() => {
                        let layout = member_layout(document, id);
                        if layout.key {
                            if layout.separator {
                                buf.push(',');
                            }
                            self.json_key_write(false, &self.json_text_key, buf);
                            run_write(document, id, buf);
                        }
                    }
                    _ => {}
                },
                Step::End(id) => match document.node_type(id) {
                    NodeType::Document => buf.push('}'),
                    NodeType::Element => {
                        buf.push('}');
                        if id == start {
                            buf.push('}');
                        } else if member_layout(document, id).close_array {
                            buf.push(']');
                        }
                    }
                    _ => {}
                },
            }
        }
    }
}
