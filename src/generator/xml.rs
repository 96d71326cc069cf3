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
use crate::NodeKind;
use crate::entities::escape;
use crate::entities::escaped_size;
use crate::text;
use crate::text::TextFormat;

use super::Generator;
use super::Step;
use super::Visitor;
use super::XmlWriteFlags;

const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

// Format a text is actually written in, and whether it goes into a
// CDATA section. JSON formats have no XML form.
fn text_output(
    flags: XmlWriteFlags,
    value: &str,
    format: TextFormat,
    output_format: TextFormat,
) -> (TextFormat, bool) {
    match output_format {
        TextFormat::Cdata => {
            if flags.normalize() || text::convert(value, format, TextFormat::Cdata).contains(CDATA_END)
            {
                (TextFormat::EntityEncoded, false)
            } else {
                (TextFormat::Cdata, true)
            }
        }
        _ => (TextFormat::EntityEncoded, false),
    }
}

impl Generator {
    fn xml_attributes_size(&self, document: &Document, id: NodeId) -> usize {
        let encode_cr = self.xml_flags.encode_cr();
        let mut size = 0;
        for (name, value) in document.attributes(id) {
            size += 1; // space
            size += name.len();
            size += 2; // =" characters
            size += escaped_size(value, encode_cr);
            size += 1; // " character
        }
        size
    }

    fn xml_attributes_write(&self, document: &Document, id: NodeId, buf: &mut String) {
        let encode_cr = self.xml_flags.encode_cr();
        for (name, value) in document.attributes(id) {
            buf.push(' ');
            buf.push_str(name);
            buf.push_str("=\"");
            escape(value, encode_cr, buf);
            buf.push('"');
        }
    }

    pub(super) fn xml_measure(&self, document: &Document, start: NodeId) -> usize {
        let flags = self.xml_flags;
        let mut size = 0;

        let mut visitor = Visitor::new(document, start);
        while let Some(step) = visitor.next() {
            match step {
                Step::Start(id) => match document.kind(id) {
                    NodeKind::Document => {}
                    NodeKind::Element { name } => {
                        size += 1; // Tag opening '<'
                        size += name.len();
                        size += self.xml_attributes_size(document, id);
                        if document.has_children(id) {
                            size += 1;
                        } else {
                            size += 2; // Standalone tag closing '/>'
                        }
                    }
                    NodeKind::Attribute { name, value } => {
                        size += name.len();
                        size += 2; // =" characters
                        size += escaped_size(value, flags.encode_cr());
                        size += 1;
                    }
                    NodeKind::Text {
                        value,
                        format,
                        output_format,
                    } => {
                        let (output, cdata) = text_output(flags, value, format, output_format);
                        if cdata {
                            size += CDATA_START.len() + CDATA_END.len();
                        }
                        size += text::value_in_format_size(
                            value,
                            format,
                            output,
                            flags.normalize(),
                            flags.encode_cr(),
                        );
                    }
                    NodeKind::Comment { value } => {
                        size += 4; // <!--
                        size += value.len();
                        size += 3; // -->
                    }
                    NodeKind::Declaration => {
                        size += 5; // <?xml
                        size += self.xml_attributes_size(document, id);
                        size += 3; // ' ?>'
                    }
                    NodeKind::Unknown { value } => {
                        size += 1;
                        size += value.len();
                        size += 1;
                    }
                },
                Step::End(id) => {
                    if let NodeKind::Element { name } = document.kind(id) {
                        size += 2; // End tag opening '</'
                        size += name.len();
                        size += 1; // End tag closing '>'
                    }
                }
            }
        }

        size
    }

    pub(super) fn xml_write(&self, document: &Document, start: NodeId, buf: &mut String) {
        let flags = self.xml_flags;

        let mut visitor = Visitor::new(document, start);
        while let Some(step) = visitor.next() {
            match step {
                Step::Start(id) => match document.kind(id) {
                    NodeKind::Document => {}
                    NodeKind::Element { name } => {
                        buf.push('<');
                        buf.push_str(name);
                        self.xml_attributes_write(document, id, buf);
                        if document.has_children(id) {
                            buf.push('>');
                        } else {
                            buf.push_str("/>");
                        }
                    }
                    NodeKind::Attribute { name, value } => {
                        buf.push_str(name);
                        buf.push_str("=\"");
                        escape(value, flags.encode_cr(), buf);
                        buf.push('"');
                    }
                    NodeKind::Text {
                        value,
                        format,
                        output_format,
                    } => {
                        let (output, cdata) = text_output(flags, value, format, output_format);
                        if cdata {
                            buf.push_str(CDATA_START);
                        }
                        buf.push_str(&text::value_in_format(
                            value,
                            format,
                            output,
                            flags.normalize(),
                            flags.encode_cr(),
                        ));
                        if cdata {
                            buf.push_str(CDATA_END);
                        }
                    }
                    NodeKind::Comment { value } => {
                        buf.push_str("<!--");
                        buf.push_str(value);
                        buf.push_str("-->");
                    }
                    NodeKind::Declaration => {
                        buf.push_str("<?xml");
                        self.xml_attributes_write(document, id, buf);
                        buf.push_str(" ?>");
                    }
                    NodeKind::Unknown { value } => {
                        buf.push('<');
                        buf.push_str(value);
                        buf.push('>');
                    }
                },
                Step::End(id) => {
                    if let NodeKind::Element { name } = document.kind(id) {
                        buf.push_str("</");
                        buf.push_str(name);
                        buf.push('>');
                    }
                }
            }
        }
    }
}
