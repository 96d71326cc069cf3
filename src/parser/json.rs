/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::Document;
use crate::NodeId;
use crate::NodeType;
use crate::text;
use crate::text::TextFormat;

use super::Parser;
use super::ParserPos;
use super::WarningKind;
use super::skip_white_space;

/// A JSON value which maps to a single text node, still encoded.
enum Scalar<'a> {
    String(&'a str),
    Literal(&'a str),
    Null,
}

fn is_number_char(c: u8) -> bool {
    matches!(c, b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9')
}

fn new_element(document: &mut Document, parent: NodeId, name: &str) -> NodeId {
    let element = document.create_element(name);
    document.adopt_as_last_child(parent, element);
    element
}

impl Parser {
    pub(super) fn parse_json_document(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
    ) {
        skip_white_space(pos);
        if pos.is_eof() {
            return;
        }
        if pos.current() != b'{' {
            self.warn(WarningKind::JsonUnexpectedCharacter, pos);
            return;
        }
        let root = document.root();
        self.parse_json_object(document, pos, root);
        skip_white_space(pos);
        if !pos.is_eof() {
            self.warn(WarningKind::JsonContentAfterDocument, pos);
        }
    }

    fn parse_json_object(&mut self, document: &mut Document, pos: &mut ParserPos<'_>, parent: NodeId) {
        if !self.enter(pos) {
            return;
        }
        self.parse_json_members(document, pos, parent);
        self.leave();
    }

    fn parse_json_members(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
        parent: NodeId,
    ) {
        pos.advance(1);
        loop {
            skip_white_space(pos);
            match pos.current() {
                0 => {
                    self.warn(WarningKind::JsonNoEndObjectFound, pos);
                    return;
                }
                b'}' => {
                    pos.advance(1);
                    return;
                }
                b'"' => {}
                _ => {
                    self.warn(WarningKind::JsonUnexpectedCharacter, pos);
                    pos.advance(1);
                    continue;
                }
            }

            let raw_key = self.read_json_string(pos);
            let key = text::json_unescape(raw_key).into_owned();
            skip_white_space(pos);
            if pos.current() == b':' {
                pos.advance(1);
            } else {
                self.warn(WarningKind::JsonMissingColon, pos);
            }
            skip_white_space(pos);
            self.parse_json_member(document, pos, parent, &key);

            skip_white_space(pos);
            if pos.current() == b',' {
                pos.advance(1);
            }
        }
    }

    fn parse_json_member(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
        parent: NodeId,
        key: &str,
    ) {
        let is_document = document.node_type(parent) == NodeType::Document;

        if let Some(name) = key.strip_prefix(self.options.json_attribute_prefix)
            && !is_document
        {
            match self.read_json_scalar(pos) {
                Some(Scalar::String(raw)) => {
                    let value = text::convert(raw, TextFormat::JsonStringEncoded, TextFormat::Cdata);
                    self.set_json_attribute(document, pos, parent, name, &value, true);
                }
                Some(Scalar::Literal(raw)) => {
                    self.set_json_attribute(document, pos, parent, name, raw, false);
                }
                Some(Scalar::Null) => {
                    self.set_json_attribute(document, pos, parent, name, "", true);
                }
                None => {
                    self.warn(WarningKind::JsonIllegalAttributeValue, pos);
                    self.skip_json_value(document, pos);
                }
            }
            return;
        }

        if key == self.options.json_text_key && !is_document {
            match self.read_json_scalar(pos) {
                Some(Scalar::String(raw)) => {
                    if !raw.is_empty() {
                        let text = document.create_text_with_format(raw, TextFormat::JsonStringEncoded);
                        document.adopt_as_last_child(parent, text);
                    }
                }
                Some(Scalar::Literal(raw)) => {
                    let text = document.create_text_with_format(raw, TextFormat::JsonNumberEncoded);
                    document.adopt_as_last_child(parent, text);
                }
                Some(Scalar::Null) => {}
                None => {
                    self.warn(WarningKind::JsonIllegalAttributeValue, pos);
                    self.skip_json_value(document, pos);
                }
            }
            return;
        }

        if pos.current() == b'[' {
            self.parse_json_array(document, pos, parent, key);
        } else {
            self.parse_json_element(document, pos, parent, key);
        }
    }

    // Bare literals stay unquoted so they are written back as literals
    fn set_json_attribute(
        &mut self,
        document: &mut Document,
        pos: &ParserPos<'_>,
        parent: NodeId,
        name: &str,
        value: &str,
        quoted: bool,
    ) {
        if document.set_attribute(parent, name, value) {
            self.warn(WarningKind::DuplicateAttribute, pos);
        }
        if let Some(attribute) = document.find_attribute(parent, name) {
            document.set_quoted(attribute, quoted);
        }
    }

    /// Every item becomes an element named `key` under `parent`. A
    /// nested array becomes one element holding the inner items.
    fn parse_json_array(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
        parent: NodeId,
        key: &str,
    ) {
        if !self.enter(pos) {
            return;
        }
        pos.advance(1);
        loop {
            skip_white_space(pos);
            match pos.current() {
                0 => {
                    self.warn(WarningKind::JsonNoEndArrayFound, pos);
                    break;
                }
                b']' => {
                    pos.advance(1);
                    break;
                }
                b'}' => {
                    // Left for the enclosing object
                    self.warn(WarningKind::JsonNoEndArrayFound, pos);
                    break;
                }
                b'[' => {
                    let element = document.create_element(key);
                    document.adopt_as_last_child(parent, element);
                    self.parse_json_array(document, pos, element, key);
                }
                _ => self.parse_json_element(document, pos, parent, key),
            }
            skip_white_space(pos);
            if pos.current() == b',' {
                pos.advance(1);
            }
        }
        self.leave();
    }

    fn parse_json_element(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
        parent: NodeId,
        key: &str,
    ) {
        match pos.current() {
            b'{' => {
                let element = new_element(document, parent, key);
                self.parse_json_object(document, pos, element);
            }
            b'[' => {
                let element = new_element(document, parent, key);
                self.parse_json_array(document, pos, element, key);
            }
            _ => {
                let Some(scalar) = self.read_json_scalar(pos) else {
                    // No value here, the closing bracket or separator
                    // is left for the caller
                    self.warn(WarningKind::JsonUnexpectedCharacter, pos);
                    if !matches!(pos.current(), 0 | b'}' | b']' | b',') {
                        pos.advance(1);
                    }
                    return;
                };
                let element = new_element(document, parent, key);
                match scalar {
                    Scalar::String(raw) => {
                        if !raw.is_empty() {
                            let text = document.create_text_with_format(raw, TextFormat::JsonStringEncoded);
                            document.adopt_as_last_child(element, text);
                        }
                    }
                    Scalar::Literal(raw) => {
                        let text = document.create_text_with_format(raw, TextFormat::JsonNumberEncoded);
                        document.adopt_as_last_child(element, text);
                    }
                    Scalar::Null => {}
                }
            }
        }
    }

    // Object and array values are not allowed in some places. They
    // are parsed into a detached holder and thrown away.
    fn skip_json_value(&mut self, document: &mut Document, pos: &mut ParserPos<'_>) {
        let holder = document.create_element("");
        if pos.current() == b'[' {
            self.parse_json_array(document, pos, holder, "");
        } else {
            self.parse_json_element(document, pos, holder, "");
        }
        document.delete(holder);
    }

    fn read_json_scalar<'a>(&mut self, pos: &mut ParserPos<'a>) -> Option<Scalar<'a>> {
        let start = *pos;
        match pos.current() {
            b'"' => Some(Scalar::String(self.read_json_string(pos))),
            b'-' | b'0'..=b'9' => {
                while is_number_char(pos.current()) {
                    pos.advance(1);
                }
                Some(Scalar::Literal(start.slice_to(pos)))
            }
            _ if pos.is_string("true", true) => {
                pos.advance(4);
                Some(Scalar::Literal(start.slice_to(pos)))
            }
            _ if pos.is_string("false", true) => {
                pos.advance(5);
                Some(Scalar::Literal(start.slice_to(pos)))
            }
            _ if pos.is_string("null", true) => {
                pos.advance(4);
                Some(Scalar::Null)
            }
            _ => None,
        }
    }

    /// Reads a quoted string at the cursor and returns its contents
    /// with the escapes left in.
    fn read_json_string<'a>(&mut self, pos: &mut ParserPos<'a>) -> &'a str {
        pos.advance(1);
        let start = *pos;
        loop {
            match pos.current() {
                0 => {
                    self.warn(WarningKind::JsonUnterminatedString, pos);
                    return start.slice_to(pos);
                }
                b'\\' => pos.advance(2),
                b'"' => break,
                _ => pos.advance(1),
            }
        }
        let raw = start.slice_to(pos);
        pos.advance(1);
        raw
    }
}
