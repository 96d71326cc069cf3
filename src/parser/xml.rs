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
use crate::entities;
use crate::text::TextFormat;

use super::Parser;
use super::ParserPos;
use super::WarningKind;
use super::is_legal_name_start;
use super::is_white_space;
use super::read_name;
use super::skip_white_space;

fn is_declaration_start(pos: &ParserPos<'_>) -> bool {
    pos.is_string("<?xml", false) && (is_white_space(pos.peek(5)) || pos.peek(5) == b'?')
}

fn is_markup_start(pos: &ParserPos<'_>) -> bool {
    pos.current() == b'<' && matches!(pos.peek(1), b'!' | b'?')
        || pos.current() == b'<' && is_legal_name_start(pos.peek(1))
}

fn at_tag_end(pos: &ParserPos<'_>) -> bool {
    pos.current() == b'>' || pos.is_string("/>", true) || pos.is_string("?>", true)
}

// Skips a bad token inside a tag, always consuming at least one byte
fn skip_illegal(pos: &mut ParserPos<'_>) {
    pos.advance(1);
    while !pos.is_eof() && !is_white_space(pos.current()) && !at_tag_end(pos) {
        pos.advance(1);
    }
}

impl Parser {
    pub(super) fn parse_xml_document(&mut self, document: &mut Document, pos: &mut ParserPos<'_>) {
        let root = document.root();
        loop {
            let text_start = *pos;
            skip_white_space(pos);
            if pos.is_eof() {
                break;
            }
            if is_markup_start(pos) {
                self.parse_node(document, pos, root);
            } else {
                *pos = text_start;
                self.warn(WarningKind::TextOutsideElement, pos);
                self.parse_text(document, pos, root);
            }
        }
    }

    fn parse_node(&mut self, document: &mut Document, pos: &mut ParserPos<'_>, parent: NodeId) {
        if pos.is_string("<!--", true) {
            self.parse_comment(document, pos, parent);
        } else if pos.is_string("<![CDATA[", true) {
            self.parse_text(document, pos, parent);
        } else if is_declaration_start(pos) {
            self.parse_declaration(document, pos, parent);
        } else if pos.is_string("<?", true) {
            self.parse_unknown(document, pos, parent, "<?", "?>");
        } else if pos.is_string("<!", true) {
            self.parse_unknown(document, pos, parent, "<!", ">");
        } else if pos.current() == b'<' && is_legal_name_start(pos.peek(1)) {
            self.parse_element(document, pos, parent);
        } else {
            if pos.current() == b'<' {
                self.warn(WarningKind::IllegalElementName, pos);
            }
            self.parse_text(document, pos, parent);
        }
    }

    fn parse_element(&mut self, document: &mut Document, pos: &mut ParserPos<'_>, parent: NodeId) {
        if !self.enter(pos) {
            return;
        }
        self.parse_element_body(document, pos, parent);
        self.leave();
    }

    fn parse_element_body(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
        parent: NodeId,
    ) {
        let start_location = pos.location();
        pos.advance(1);
        let name = read_name(pos);
        let element = document.create_element(name);
        document.adopt_as_last_child(parent, element);

        loop {
            skip_white_space(pos);
            if pos.is_eof() {
                self.warn(WarningKind::NoEndBracketFound, pos);
                return;
            }
            if pos.is_string("/>", true) {
                pos.advance(2);
                return;
            }
            if pos.current() == b'>' {
                pos.advance(1);
                break;
            }
            if !is_legal_name_start(pos.current()) {
                self.warn(WarningKind::IllegalAttributeName, pos);
                skip_illegal(pos);
                continue;
            }
            let (name, value) = self.parse_attribute(pos);
            if document.set_attribute(element, name, &value) {
                self.warn(WarningKind::DuplicateAttribute, pos);
            }
        }

        loop {
            if pos.is_eof() {
                self.warn_at(WarningKind::NoEndTagFound, start_location);
                return;
            }
            if pos.is_string("</", true) {
                self.parse_end_tag(document, pos, element);
                return;
            }
            self.parse_node(document, pos, element);
        }
    }

    fn parse_end_tag(&mut self, document: &Document, pos: &mut ParserPos<'_>, element: NodeId) {
        let tag_location = pos.location();
        pos.advance(2);
        let name = read_name(pos);
        if !document.element_names_match(document.name(element), name) {
            self.warn_at(WarningKind::MismatchedEndTag, tag_location);
        }
        skip_white_space(pos);
        if pos.current() == b'>' {
            pos.advance(1);
            return;
        }
        if pos.is_eof() {
            self.warn(WarningKind::NoEndBracketFound, pos);
            return;
        }
        self.warn(WarningKind::ContentAfterCloseElementName, pos);
        while !pos.is_eof() && pos.current() != b'>' {
            pos.advance(1);
        }
        pos.advance(1);
    }

    /// Reads `name`, `name=value` or `name="value"`, returning the name
    /// and the decoded value.
    fn parse_attribute<'a>(&mut self, pos: &mut ParserPos<'a>) -> (&'a str, String) {
        let name = read_name(pos);
        let after_name = *pos;
        skip_white_space(pos);
        if pos.current() != b'=' {
            *pos = after_name;
            self.warn(WarningKind::AttributeWithoutValue, pos);
            return (name, String::new());
        }
        pos.advance(1);
        skip_white_space(pos);

        let quote = pos.current();
        if quote == b'"' || quote == b'\'' {
            pos.advance(1);
            let start = *pos;
            while !pos.is_eof() && pos.current() != quote {
                pos.advance(1);
            }
            let raw = start.slice_to(pos);
            if pos.is_eof() {
                self.warn(WarningKind::NoEndQuoteFound, pos);
            } else {
                pos.advance(1);
            }
            return (name, entities::unescape(raw).into_owned());
        }

        self.warn(WarningKind::AttributeValueNotQuoted, pos);
        let start = *pos;
        while !pos.is_eof() && !is_white_space(pos.current()) && !at_tag_end(pos) {
            pos.advance(1);
        }
        (name, entities::unescape(start.slice_to(pos)).into_owned())
    }

    fn parse_text(&mut self, document: &mut Document, pos: &mut ParserPos<'_>, parent: NodeId) {
        if pos.is_string("<![CDATA[", true) {
            pos.advance(9);
            let start = *pos;
            while !pos.is_eof() && !pos.is_string("]]>", true) {
                pos.advance(1);
            }
            let value = start.slice_to(pos);
            if pos.is_eof() {
                self.warn(WarningKind::NoEndCdataFound, pos);
            } else {
                pos.advance(3);
            }
            let text = document.create_text_with_format(value, TextFormat::Cdata);
            document.adopt_as_last_child(parent, text);
            return;
        }

        let start = *pos;
        while !pos.is_eof() && !(pos.current() == b'<' && *pos != start) {
            pos.advance(1);
        }
        let text = document.create_text_with_format(start.slice_to(pos), TextFormat::EntityEncoded);
        document.adopt_as_last_child(parent, text);
    }

    fn parse_comment(&mut self, document: &mut Document, pos: &mut ParserPos<'_>, parent: NodeId) {
        pos.advance(4);
        let start = *pos;
        while !pos.is_eof() && !pos.is_string("-->", true) {
            pos.advance(1);
        }
        let value = start.slice_to(pos);
        if pos.is_eof() {
            self.warn(WarningKind::NoEndCommentFound, pos);
        } else {
            pos.advance(3);
        }
        let comment = document.create_comment(value);
        document.adopt_as_last_child(parent, comment);
    }

    fn parse_declaration(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
        parent: NodeId,
    ) {
        pos.advance(5);
        let declaration = document.create_declaration();
        document.adopt_as_last_child(parent, declaration);

        loop {
            skip_white_space(pos);
            if pos.is_eof() {
                self.warn(WarningKind::NoEndDeclarationFound, pos);
                return;
            }
            if pos.is_string("?>", true) {
                pos.advance(2);
                return;
            }
            if pos.current() == b'>' {
                self.warn(WarningKind::NotProperEndDeclaration, pos);
                pos.advance(1);
                return;
            }
            if pos.is_string("/>", true) {
                self.warn(WarningKind::NotProperEndDeclaration, pos);
                pos.advance(2);
                return;
            }
            if !is_legal_name_start(pos.current()) {
                self.warn(WarningKind::IllegalAttributeName, pos);
                skip_illegal(pos);
                continue;
            }
            let (name, value) = self.parse_attribute(pos);
            if document.set_attribute(declaration, name, &value) {
                self.warn(WarningKind::DuplicateAttribute, pos);
            }
        }
    }

    /// Keeps `<!...>` and `<?...?>` markup verbatim. The stored value
    /// has the leading `<` and the final `>` stripped.
    fn parse_unknown(
        &mut self,
        document: &mut Document,
        pos: &mut ParserPos<'_>,
        parent: NodeId,
        marker: &str,
        ending: &str,
    ) {
        pos.advance(1);
        let start = *pos;
        pos.advance(marker.len() - 1);
        while !pos.is_eof() && !pos.is_string(ending, true) {
            pos.advance(1);
        }
        let value = if pos.is_eof() {
            self.warn(WarningKind::NoEndUnknownTagFound, pos);
            start.slice_to(pos)
        } else {
            pos.advance(ending.len() - 1);
            let value = start.slice_to(pos);
            pos.advance(1);
            value
        };
        let unknown = document.create_unknown(value);
        document.adopt_as_last_child(parent, unknown);
    }
}
