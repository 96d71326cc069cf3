/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod arena;
mod canonical;
mod document;
mod entities;
mod generator;
mod helpers;
mod parser;
pub mod text;
mod walker;

pub use arena::ArenaStats;
pub use arena::NodeId;

pub use document::Attributes;
pub use document::Children;
pub use document::DescendantOrSelf;
pub use document::Document;
pub use document::DomError;
pub use document::NodeKind;
pub use document::NodeRef;
pub use document::NodeType;

pub use walker::NodeFilter;
pub use walker::WalkSink;

pub use parser::DEFAULT_JSON_ATTRIBUTE_PREFIX;
pub use parser::DEFAULT_JSON_TEXT_KEY;
pub use parser::DEFAULT_MAX_DEPTH;
pub use parser::DEFAULT_TAB_SIZE;
pub use parser::Location;
pub use parser::ParseWarning;
pub use parser::Parser;
pub use parser::ParserOptions;
pub use parser::ParserPos;
pub use parser::WarningKind;

pub use text::TextFormat;

pub use generator::Dialect;
pub use generator::Generator;
pub use generator::XmlWriteFlags;

pub use canonical::canonicalize;
pub use canonical::clone_as_canonical_json;

pub use helpers::Hours;
pub use helpers::Micros;
pub use helpers::Millis;
pub use helpers::Minutes;
pub use helpers::Nanos;
pub use helpers::ScalarValue;
pub use helpers::Seconds;
pub use helpers::string_to_time;
pub use helpers::time_to_string;
pub use helpers::to_json;
pub use helpers::to_string;
pub use helpers::to_xml;
