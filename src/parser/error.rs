/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

use super::Location;

/// Type of a recoverable problem found while parsing.
///
/// The parser never stops on these. It records the warning, skips to
/// the next token it recognizes and keeps building the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WarningKind {
    NoEndCommentFound,
    NoEndCdataFound,
    NoEndDeclarationFound,
    NotProperEndDeclaration,
    NoEndUnknownTagFound,
    NoEndBracketFound,
    NoEndTagFound,
    NoEndQuoteFound,
    IllegalElementName,
    IllegalAttributeName,
    DuplicateAttribute,
    AttributeWithoutValue,
    AttributeValueNotQuoted,
    MismatchedEndTag,
    ContentAfterCloseElementName,
    TextOutsideElement,
    ExceededMaxDepth,
    JsonMissingColon,
    JsonUnexpectedCharacter,
    JsonUnterminatedString,
    JsonNoEndObjectFound,
    JsonNoEndArrayFound,
    JsonIllegalAttributeValue,
    JsonContentAfterDocument,
}

impl WarningKind {
    pub fn description(&self) -> &'static str {
        match self {
            WarningKind::NoEndCommentFound => "Comment is not closed with '-->'",
            WarningKind::NoEndCdataFound => "CDATA section is not closed with ']]>'",
            WarningKind::NoEndDeclarationFound => "Declaration is not closed with '?>'",
            WarningKind::NotProperEndDeclaration => "Declaration must end with '?>'",
            WarningKind::NoEndUnknownTagFound => "Unknown markup is not closed",
            WarningKind::NoEndBracketFound => "Start tag is not closed with '>'",
            WarningKind::NoEndTagFound => "Element has no end tag",
            WarningKind::NoEndQuoteFound => "Attribute value has no closing quote",
            WarningKind::IllegalElementName => "Element name has illegal characters",
            WarningKind::IllegalAttributeName => "Attribute name has illegal characters",
            WarningKind::DuplicateAttribute => "Attribute name already used in this element",
            WarningKind::AttributeWithoutValue => "Attribute must have '=' before the value",
            WarningKind::AttributeValueNotQuoted => {
                "Attribute value must be in double or single quotes"
            }
            WarningKind::MismatchedEndTag => "Start and end tags have different names",
            WarningKind::ContentAfterCloseElementName => "End tag has content after the name",
            WarningKind::TextOutsideElement => "Text is not allowed outside of elements",
            WarningKind::ExceededMaxDepth => "Nesting is deeper than the allowed maximum",
            WarningKind::JsonMissingColon => "Object member name must be followed by ':'",
            WarningKind::JsonUnexpectedCharacter => "Unexpected character in JSON",
            WarningKind::JsonUnterminatedString => "String is not closed with '\"'",
            WarningKind::JsonNoEndObjectFound => "Object is not closed with '}'",
            WarningKind::JsonNoEndArrayFound => "Array is not closed with ']'",
            WarningKind::JsonIllegalAttributeValue => {
                "Attribute members cannot have object or array values"
            }
            WarningKind::JsonContentAfterDocument => "Content after the top level object",
        }
    }
}

impl Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// A recoverable parse problem and where it happened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseWarning {
    pub kind: WarningKind,
    pub location: Location,
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.location)
    }
}
