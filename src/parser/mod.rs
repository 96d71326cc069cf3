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
mod json;
mod location;
mod position;
mod xml;

use crate::Document;

pub use error::ParseWarning;
pub use error::WarningKind;
pub use location::Location;
pub use position::ParserPos;

pub const DEFAULT_TAB_SIZE: usize = 4;
pub const DEFAULT_MAX_DEPTH: usize = 256;
pub const DEFAULT_JSON_ATTRIBUTE_PREFIX: char = '$';
pub const DEFAULT_JSON_TEXT_KEY: &str = "#text";

/// Settings of a [Parser].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParserOptions {
    /// Tab stop distance used for column numbers in warnings.
    pub tab_size: usize,
    /// Deepest element or JSON container nesting accepted. Parsing
    /// stops with a warning when the input goes deeper.
    pub max_depth: usize,
    /// Name matching rule of the parsed document for elements.
    pub element_names_case_sensitive: bool,
    /// Name matching rule of the parsed document for attributes.
    pub attribute_names_case_sensitive: bool,
    /// JSON member names starting with this become attributes.
    pub json_attribute_prefix: char,
    /// JSON member name holding the text of an element.
    pub json_text_key: String,
}

impl ParserOptions {
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_case_sensitivity(mut self, elements: bool, attributes: bool) -> Self {
        self.element_names_case_sensitive = elements;
        self.attribute_names_case_sensitive = attributes;
        self
    }

    pub fn with_json_attribute_prefix(mut self, prefix: char) -> Self {
        self.json_attribute_prefix = prefix;
        self
    }

    pub fn with_json_text_key(mut self, key: &str) -> Self {
        self.json_text_key = key.to_string();
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            tab_size: DEFAULT_TAB_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            element_names_case_sensitive: true,
            attribute_names_case_sensitive: true,
            json_attribute_prefix: DEFAULT_JSON_ATTRIBUTE_PREFIX,
            json_text_key: DEFAULT_JSON_TEXT_KEY.to_string(),
        }
    }
}

/// A parse session building [Document] trees from XML or JSON text.
///
/// Parsing never fails. Problems in the input are recorded as
/// [ParseWarning]s and the parser continues from the next token it
/// recognizes. Warnings of the last parse are available until the
/// next one starts.
///
/// ```
/// use dualdom::{Parser, WarningKind};
///
/// let mut parser = Parser::new();
/// let doc = parser.parse_xml("<a><!-- unterminated </a>");
/// assert_eq!(parser.warnings()[0].kind, WarningKind::NoEndCommentFound);
/// assert_eq!(doc.to_string(), "<a><!-- unterminated </a>--></a>");
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    options: ParserOptions,
    warnings: Vec<ParseWarning>,
    depth: usize,
    aborted: bool,
}

impl Parser {
    pub fn new() -> Parser {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Parser {
        Parser {
            options,
            warnings: Vec::new(),
            depth: 0,
            aborted: false,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ParseWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn reset(&mut self) {
        self.warnings.clear();
        self.depth = 0;
        self.aborted = false;
    }

    fn new_document(&self) -> Document {
        Document::with_case_sensitivity(
            self.options.element_names_case_sensitive,
            self.options.attribute_names_case_sensitive,
        )
    }

    pub fn parse_xml(&mut self, text: &str) -> Document {
        self.reset();
        let mut document = self.new_document();
        let mut pos = ParserPos::new(text, self.options.tab_size);
        tracing::trace!(bytes = text.len(), "parsing XML");
        self.parse_xml_document(&mut document, &mut pos);
        tracing::trace!(
            nodes = document.node_count(),
            warnings = self.warnings.len(),
            "parsed XML"
        );
        document
    }

    pub fn parse_json(&mut self, text: &str) -> Document {
        self.reset();
        let mut document = self.new_document();
        let mut pos = ParserPos::new(text, self.options.tab_size);
        tracing::trace!(bytes = text.len(), "parsing JSON");
        self.parse_json_document(&mut document, &mut pos);
        tracing::trace!(
            nodes = document.node_count(),
            warnings = self.warnings.len(),
            "parsed JSON"
        );
        document
    }

    fn warn(&mut self, kind: WarningKind, pos: &ParserPos<'_>) {
        self.warn_at(kind, pos.location());
    }

    fn warn_at(&mut self, kind: WarningKind, location: Location) {
        // Everything after a depth abort is noise
        if self.aborted {
            return;
        }
        tracing::debug!(%location, warning = %kind, "parse warning");
        self.warnings.push(ParseWarning { kind, location });
    }

    // Every recursive routine goes through this guard. Past the
    // maximum depth the rest of the input is dropped.
    fn enter(&mut self, pos: &mut ParserPos<'_>) -> bool {
        if self.depth >= self.options.max_depth {
            self.warn(WarningKind::ExceededMaxDepth, pos);
            self.aborted = true;
            pos.set_eof();
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

fn is_white_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

fn skip_white_space(pos: &mut ParserPos<'_>) {
    while is_white_space(pos.current()) {
        pos.advance(1);
    }
}

fn is_legal_name_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b':' || c >= 0x80
}

fn is_legal_name(c: u8) -> bool {
    is_legal_name_start(c) || c.is_ascii_digit() || c == b'-' || c == b'.'
}

fn read_name<'a>(pos: &mut ParserPos<'a>) -> &'a str {
    let start = *pos;
    while is_legal_name(pos.current()) {
        pos.advance(1);
    }
    start.slice_to(pos)
}

#[cfg(test)]
mod tests;
