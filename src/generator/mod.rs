/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod json;
mod xml;

use std::borrow::Cow;
use std::ops::BitOr;

use crate::Document;
use crate::NodeId;
use crate::parser::DEFAULT_JSON_ATTRIBUTE_PREFIX;
use crate::parser::DEFAULT_JSON_TEXT_KEY;

/// Options of the XML output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct XmlWriteFlags(u32);

impl XmlWriteFlags {
    pub const NONE: XmlWriteFlags = XmlWriteFlags(0);
    /// Writes CDATA texts entity encoded, so equal texts always
    /// produce equal output.
    pub const NORMALIZE_CDATA: XmlWriteFlags = XmlWriteFlags(0x01);
    /// Writes carriage returns as `&#xD;`. Implies normalization,
    /// since a CDATA section cannot protect them.
    pub const ENTITY_ENCODE_CR: XmlWriteFlags = XmlWriteFlags(0x02);

    pub fn contains(self, other: XmlWriteFlags) -> bool {
        self.0 & other.0 == other.0
    }

    fn normalize(self) -> bool {
        self.contains(XmlWriteFlags::NORMALIZE_CDATA) || self.encode_cr()
    }

    fn encode_cr(self) -> bool {
        self.contains(XmlWriteFlags::ENTITY_ENCODE_CR)
    }
}

impl BitOr for XmlWriteFlags {
    type Output = XmlWriteFlags;

    fn bitor(self, other: XmlWriteFlags) -> XmlWriteFlags {
        XmlWriteFlags(self.0 | other.0)
    }
}

/// Text syntax produced by a [Generator].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Dialect {
    Xml,
    Json,
}

/// Serializes a node and its subtree.
///
/// Output is produced in two passes. [measure()](Generator::measure)
/// computes the exact byte length, then [write()](Generator::write)
/// fills a buffer allocated with that capacity, so the buffer never
/// grows while writing. Neither pass recurses, any depth of tree can
/// be written.
///
/// ```
/// use dualdom::{Document, Generator};
///
/// let doc = Document::from_xml("<a x='1'><b>2</b><b>3</b></a>");
/// let root = doc.root();
/// assert_eq!(Generator::xml().write(&doc, root), "<a x=\"1\"><b>2</b><b>3</b></a>");
/// assert_eq!(Generator::json().write(&doc, root), r#"{"a":{"$x":"1","b":["2","3"]}}"#);
/// ```
#[derive(Clone, Debug)]
pub struct Generator {
    dialect: Dialect,
    xml_flags: XmlWriteFlags,
    json_attribute_prefix: char,
    json_text_key: Cow<'static, str>,
}

impl Generator {
    pub fn new(dialect: Dialect) -> Generator {
        Generator {
            dialect,
            xml_flags: XmlWriteFlags::NONE,
            json_attribute_prefix: DEFAULT_JSON_ATTRIBUTE_PREFIX,
            json_text_key: Cow::Borrowed(DEFAULT_JSON_TEXT_KEY),
        }
    }

    pub fn xml() -> Generator {
        Self::new(Dialect::Xml)
    }

    pub fn json() -> Generator {
        Self::new(Dialect::Json)
    }

    pub fn with_xml_flags(mut self, flags: XmlWriteFlags) -> Self {
        self.xml_flags = flags;
        self
    }

    pub fn with_json_attribute_prefix(mut self, prefix: char) -> Self {
        self.json_attribute_prefix = prefix;
        self
    }

    pub fn with_json_text_key(mut self, key: &str) -> Self {
        self.json_text_key = Cow::Owned(key.to_string());
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn xml_flags(&self) -> XmlWriteFlags {
        self.xml_flags
    }

    /// Byte length of the output for `node`.
    pub fn measure(&self, document: &Document, node: NodeId) -> usize {
        match self.dialect {
            Dialect::Xml => self.xml_measure(document, node),
            Dialect::Json => self.json_measure(document, node),
        }
    }

    /// Appends the output for `node` to `buf`.
    pub fn write_into(&self, document: &Document, node: NodeId, buf: &mut String) {
        match self.dialect {
            Dialect::Xml => self.xml_write(document, node, buf),
            Dialect::Json => self.json_write(document, node, buf),
        }
    }

    pub fn write(&self, document: &Document, node: NodeId) -> String {
        let size = self.measure(document, node);
        let mut buf = String::with_capacity(size);
        self.write_into(document, node, &mut buf);
        debug_assert_eq!(buf.len(), size);
        buf
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Step {
    Start(NodeId),
    // Only for nodes which had their children visited
    End(NodeId),
}

// Walks a subtree in document order over the child links. Attributes
// are not visited, the writers handle them with their owner.
struct Visitor<'a> {
    document: &'a Document,
    start: NodeId,
    current: Option<NodeId>,
    going_down: bool,
    started: bool,
    skip_children: bool,
}

impl<'a> Visitor<'a> {
    fn new(document: &'a Document, start: NodeId) -> Visitor<'a> {
        Visitor {
            document,
            start,
            current: Some(start),
            going_down: true,
            started: false,
            skip_children: false,
        }
    }

    /// Do not descend into the node of the last Start step.
    fn skip_children(&mut self) {
        self.skip_children = true;
    }

    fn step(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        let node = self.document.node(current);
        let skip = std::mem::take(&mut self.skip_children);
        if self.going_down
            && !skip
            && let Some(child) = node.first_child
        {
            self.current = Some(child);
            return;
        }
        if current == self.start {
            self.current = None;
            return;
        }
        match node.next {
            Some(next) => {
                self.current = Some(next);
                self.going_down = true;
            }
            None => {
                self.current = node.parent;
                self.going_down = false;
            }
        }
    }

    fn next(&mut self) -> Option<Step> {
        if self.started {
            self.step();
        } else {
            self.started = true;
        }
        let current = self.current?;
        if self.going_down {
            Some(Step::Start(current))
        } else {
            Some(Step::End(current))
        }
    }
}
