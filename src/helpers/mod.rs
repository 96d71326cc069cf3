/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod scalar;

use std::time::SystemTime;

use crate::Document;
use crate::DomError;
use crate::NodeId;
use crate::generator::Generator;
use crate::text::TextFormat;

pub use scalar::Hours;
pub use scalar::Micros;
pub use scalar::Millis;
pub use scalar::Minutes;
pub use scalar::Nanos;
pub use scalar::ScalarValue;
pub use scalar::Seconds;

impl Document {
    fn read_scalar<T: ScalarValue>(&self, element: NodeId, name: &str) -> Option<T> {
        let child = self.find_first_child_element(element, name)?;
        let text = self.text_decoded(child);
        if T::IS_NUMBER && text.is_empty() {
            return None;
        }
        let value = T::parse_text(&text);
        if value.is_none() {
            tracing::warn!(element = name, value = %text, "value out of range");
        }
        value
    }

    /// Reads the text of the first child element named `name` into
    /// `value`.
    ///
    /// `value` is left untouched if there is no such child, if a
    /// number has no text, or if the text does not parse. The last
    /// case is logged as a warning. Returns true if `value` was set.
    ///
    /// ```
    /// use dualdom::Document;
    ///
    /// let doc = Document::from_xml("<root><x>1</x></root>");
    /// let root = doc.first_child_element(doc.root()).unwrap();
    /// let mut x = 0i32;
    /// assert!(doc.element_value(root, "x", &mut x));
    /// assert_eq!(x, 1);
    /// let mut y: Option<i32> = None;
    /// assert!(!doc.optional_element_value(root, "y", &mut y));
    /// assert_eq!(y, None);
    /// ```
    pub fn element_value<T: ScalarValue>(&self, element: NodeId, name: &str, value: &mut T) -> bool {
        match self.read_scalar(element, name) {
            Some(read) => {
                *value = read;
                true
            }
            None => false,
        }
    }

    /// Same as [element_value()](Document::element_value), but only
    /// sets `value` when the child is present and readable.
    pub fn optional_element_value<T: ScalarValue>(
        &self,
        element: NodeId,
        name: &str,
        value: &mut Option<T>,
    ) -> bool {
        match self.read_scalar(element, name) {
            Some(read) => {
                *value = Some(read);
                true
            }
            None => false,
        }
    }

    fn create_scalar_element<T: ScalarValue>(&mut self, name: &str, value: &T) -> NodeId {
        if T::IS_NUMBER {
            self.create_element_with_number(name, &value.to_text())
        } else {
            self.create_element_with_text_and_json_encode(name, &value.to_text())
        }
    }

    /// Appends a child element named `name` holding `value`.
    ///
    /// Empty strings, zero durations and epoch times are left out,
    /// zero numbers and false are not.
    pub fn adopt_element_value<T: ScalarValue>(&mut self, element: NodeId, name: &str, value: &T) {
        self.adopt_element_value_with(element, name, value, !T::OMIT_EMPTY);
    }

    /// Appends a child element named `name` holding `value`, leaving
    /// out empty values unless `adopt_empty` is set.
    pub fn adopt_element_value_with<T: ScalarValue>(
        &mut self,
        element: NodeId,
        name: &str,
        value: &T,
        adopt_empty: bool,
    ) {
        if !value.is_representable() {
            tracing::warn!(element = name, value = %value.to_text(), "value has no JSON form");
            return;
        }
        if !adopt_empty && value.is_empty_value() {
            return;
        }
        let child = self.create_scalar_element(name, value);
        self.adopt_as_last_child(element, child);
    }

    /// Appends a child element for a present value, even an empty one.
    pub fn adopt_optional_element_value<T: ScalarValue>(
        &mut self,
        element: NodeId,
        name: &str,
        value: Option<&T>,
    ) {
        if let Some(value) = value {
            self.adopt_element_value_with(element, name, value, true);
        }
    }

    //
    // Building diagnostic trees
    //

    /// Appends a leaf element named `name` holding `value`. Empty
    /// values are skipped if `ignore_empty` is set.
    pub fn debug_append<T: ScalarValue>(
        &mut self,
        parent: NodeId,
        name: &str,
        value: &T,
        ignore_empty: bool,
    ) {
        self.adopt_element_value_with(parent, name, value, !ignore_empty);
    }

    pub fn debug_append_child(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(child) = child {
            self.adopt_as_last_child(parent, child);
        }
    }

    /// Appends `child` wrapped in a new element named `name`.
    pub fn debug_append_named(&mut self, parent: NodeId, name: &str, child: Option<NodeId>) {
        let Some(child) = child else {
            return;
        };
        let wrapper = self.create_element(name);
        self.adopt_as_last_child(wrapper, child);
        self.adopt_as_last_child(parent, wrapper);
    }

    //
    // Element creation
    //

    /// Creates an element with a text child holding an already JSON
    /// encoded string. An empty value gives an empty element.
    pub fn create_element_with_text(&mut self, name: &str, json_text: &str) -> NodeId {
        let element = self.create_element(name);
        if !json_text.is_empty() {
            let text = self.create_text_with_format(json_text, TextFormat::JsonStringEncoded);
            self.adopt_as_first_child(element, text);
        }
        element
    }

    /// Creates an element with a text child holding plain characters.
    pub fn create_element_with_text_and_json_encode(&mut self, name: &str, plain: &str) -> NodeId {
        let element = self.create_element(name);
        if !plain.is_empty() {
            let text = self.create_text_with_format("", TextFormat::JsonStringEncoded);
            self.set_text_value_and_json_encode(text, plain);
            self.adopt_as_first_child(element, text);
        }
        element
    }

    /// Creates an element with a JSON number text child. An empty
    /// number is written as zero.
    pub fn create_element_with_number(&mut self, name: &str, number: &str) -> NodeId {
        let element = self.create_element(name);
        let number = if number.is_empty() { "0" } else { number };
        let text = self.create_text_with_format(number, TextFormat::JsonNumberEncoded);
        self.adopt_as_first_child(element, text);
        element
    }

    /// Creates an element holding a time as seconds since the epoch.
    pub fn create_element_with_time(&mut self, name: &str, time: SystemTime) -> NodeId {
        self.create_element_with_number(name, &time_to_string(time))
    }

    /// Creates an element with a quoted `id` attribute, unless `id` is
    /// empty.
    pub fn create_element_with_text_id(&mut self, name: &str, id: &str) -> NodeId {
        let element = self.create_element(name);
        self.set_attribute_id_with_text(element, id);
        element
    }

    /// Creates an element with an unquoted `id` attribute, unless `id`
    /// is empty.
    pub fn create_element_with_number_id(&mut self, name: &str, id: &str) -> NodeId {
        let element = self.create_element(name);
        self.set_attribute_id_with_number(element, id);
        element
    }

    //
    // Attributes
    //

    pub fn attribute_id(&self, element: NodeId) -> Option<&str> {
        self.attribute_value(element, "id")
    }

    pub fn set_attribute_id_with_text(&mut self, element: NodeId, value: &str) {
        self.set_attribute_with_text(element, "id", value);
    }

    pub fn set_attribute_id_with_number(&mut self, element: NodeId, value: &str) {
        self.set_attribute_with_number(element, "id", value);
    }

    /// Sets an attribute written as a JSON string. An empty value
    /// leaves the element untouched.
    pub fn set_attribute_with_text(&mut self, element: NodeId, name: &str, value: &str) {
        self.set_attribute_quoted(element, name, value, true);
    }

    /// Sets an attribute written as a bare JSON literal, so `value`
    /// must be a JSON number, `true` or `false`. An empty value leaves
    /// the element untouched.
    ///
    /// ```
    /// use dualdom::{Document, to_string};
    ///
    /// let mut doc = Document::new();
    /// let a = doc.create_element("a");
    /// doc.set_attribute_with_number(a, "n", "5");
    /// doc.set_attribute_with_text(a, "s", "5");
    /// assert_eq!(to_string(&doc, a, true), r#"{"a":{"$n":5,"$s":"5"}}"#);
    /// assert_eq!(to_string(&doc, a, false), r#"<a n="5" s="5"/>"#);
    /// ```
    pub fn set_attribute_with_number(&mut self, element: NodeId, name: &str, value: &str) {
        self.set_attribute_quoted(element, name, value, false);
    }

    fn set_attribute_quoted(&mut self, element: NodeId, name: &str, value: &str, quoted: bool) {
        if value.is_empty() {
            return;
        }
        let attribute = self.create_attribute(name, value);
        self.set_quoted(attribute, quoted);
        self.set_attribute_node(element, attribute);
    }
}

/// Seconds since the Unix epoch, or an empty string for the epoch
/// itself.
pub fn time_to_string(time: SystemTime) -> String {
    if time == SystemTime::UNIX_EPOCH {
        return String::new();
    }
    scalar::epoch_seconds(time).to_string()
}

/// Parses seconds since the Unix epoch. Empty, zero and unreadable
/// text give the epoch; the last one is logged as a warning.
pub fn string_to_time(text: &str) -> SystemTime {
    if text.is_empty() || text == "0" {
        return SystemTime::UNIX_EPOCH;
    }
    SystemTime::parse_text(text).unwrap_or_else(|| {
        tracing::warn!(value = text, "unable to convert value to time");
        SystemTime::UNIX_EPOCH
    })
}

/// XML or JSON text of `node` and its subtree.
pub fn to_string(document: &Document, node: NodeId, json: bool) -> String {
    let generator = if json {
        Generator::json()
    } else {
        Generator::xml()
    };
    generator.write(document, node)
}

fn first_element(mut document: Document) -> Result<(Document, NodeId), DomError> {
    let element = document
        .first_child_element_checked(document.root())
        .inspect_err(|_| tracing::warn!("parsed text has no element"))?;
    document.orphan(element);
    Ok((document, element))
}

/// Parses XML text and returns its first element, detached from the
/// document node.
///
/// ```
/// use dualdom::to_xml;
///
/// let (doc, element) = to_xml("<?xml version='1.0'?><a>1</a>").unwrap();
/// assert_eq!(doc.name(element), "a");
/// assert_eq!(doc.parent(element), None);
/// assert!(to_xml("no elements").is_err());
/// ```
pub fn to_xml(text: &str) -> Result<(Document, NodeId), DomError> {
    first_element(Document::from_xml(text))
}

/// Parses JSON text and returns its first element, detached from the
/// document node.
pub fn to_json(text: &str) -> Result<(Document, NodeId), DomError> {
    first_element(Document::from_json(text))
}
