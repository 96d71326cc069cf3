/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::borrow::Cow;
use std::fmt::Display;

use crate::entities;

/// Encoding of a text value.
///
/// A text node stores its value in one of these formats and can be
/// asked to produce it in any other. Conversions go through the
/// plain (CDATA) form:
///
/// | from \ to | Entity | CDATA | JSON |
/// |---|---|---|---|
/// | Entity | same | decode entities | decode entities, JSON escape |
/// | CDATA | escape entities | same | JSON escape |
/// | JSON | JSON unescape, escape entities | JSON unescape | same |
///
/// The two JSON formats share the string escaping rules; they only
/// differ in whether the generator quotes the value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TextFormat {
    /// XML character data with `&lt;` style entities.
    #[default]
    EntityEncoded,
    /// Plain characters, written as a CDATA section in XML.
    Cdata,
    /// Contents of a JSON string literal without the quotes.
    JsonStringEncoded,
    /// A JSON literal emitted without quotes, such as a number or `true`.
    JsonNumberEncoded,
}

impl TextFormat {
    pub const ALL: [TextFormat; 4] = [
        TextFormat::EntityEncoded,
        TextFormat::Cdata,
        TextFormat::JsonStringEncoded,
        TextFormat::JsonNumberEncoded,
    ];

    pub fn is_json(self) -> bool {
        matches!(
            self,
            TextFormat::JsonStringEncoded | TextFormat::JsonNumberEncoded
        )
    }
}

impl Display for TextFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TextFormat::EntityEncoded => "entity encoded",
            TextFormat::Cdata => "CDATA",
            TextFormat::JsonStringEncoded => "JSON string encoded",
            TextFormat::JsonNumberEncoded => "JSON number encoded",
        };
        f.write_str(name)
    }
}

fn json_escape_of(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        '\u{8}' => Some("\\b"),
        '\u{c}' => Some("\\f"),
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\t' => Some("\\t"),
        _ => None,
    }
}

/// Byte length of `s` after [json_escape].
pub fn json_escaped_size(s: &str) -> usize {
    let mut size = 0;
    for c in s.chars() {
        match json_escape_of(c) {
            Some(escape) => size += escape.len(),
            // \u00XX
            None if c < ' ' => size += 6,
            None => size += c.len_utf8(),
        }
    }

    size
}

/// Appends `s` to `buf` escaped for use inside a JSON string literal.
pub fn json_escape(s: &str, buf: &mut String) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut start = 0;
    for (i, c) in s.char_indices() {
        if let Some(escape) = json_escape_of(c) {
            buf.push_str(&s[start..i]);
            buf.push_str(escape);
            start = i + 1;
        } else if c < ' ' {
            buf.push_str(&s[start..i]);
            buf.push_str("\\u00");
            buf.push(HEX[(c as usize) >> 4] as char);
            buf.push(HEX[(c as usize) & 0xf] as char);
            start = i + 1;
        }
    }
    buf.push_str(&s[start..]);
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Resolves the escape sequences of a JSON string literal body.
///
/// Unpaired surrogates decode to U+FFFD. Unknown escapes are kept
/// as written.
pub fn json_unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }

    let mut buf = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(slash) = rest.find('\\') {
        buf.push_str(&rest[..slash]);
        rest = &rest[slash + 1..];
        let Some(c) = rest.chars().next() else {
            buf.push('\\');
            break;
        };
        rest = &rest[c.len_utf8()..];
        match c {
            '"' => buf.push('"'),
            '\\' => buf.push('\\'),
            '/' => buf.push('/'),
            'b' => buf.push('\u{8}'),
            'f' => buf.push('\u{c}'),
            'n' => buf.push('\n'),
            'r' => buf.push('\r'),
            't' => buf.push('\t'),
            'u' => match hex4(rest) {
                Some(high @ 0xd800..=0xdbff) => {
                    rest = &rest[4..];
                    let low = rest
                        .strip_prefix("\\u")
                        .and_then(hex4)
                        .filter(|low| (0xdc00..=0xdfff).contains(low));
                    match low {
                        Some(low) => {
                            rest = &rest[6..];
                            let code = 0x10000 + ((high - 0xd800) << 10) + (low - 0xdc00);
                            buf.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        }
                        None => buf.push(char::REPLACEMENT_CHARACTER),
                    }
                }
                Some(code) => {
                    rest = &rest[4..];
                    buf.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => buf.push_str("\\u"),
            },
            other => {
                buf.push('\\');
                buf.push(other);
            }
        }
    }
    buf.push_str(rest);

    Cow::Owned(buf)
}

fn entity_encode(s: &str, encode_cr: bool) -> Cow<'_, str> {
    if entities::escaped_size(s, encode_cr) == s.len() {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(entities::escaped_size(s, encode_cr));
    entities::escape(s, encode_cr, &mut buf);
    Cow::Owned(buf)
}

fn json_encode(s: &str) -> Cow<'_, str> {
    let size = json_escaped_size(s);
    if size == s.len() {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(size);
    json_escape(s, &mut buf);
    Cow::Owned(buf)
}

fn into_owned_cow<'a>(value: Cow<'_, str>) -> Cow<'a, str> {
    Cow::Owned(value.into_owned())
}

/// Converts `value` from one encoding to another.
pub fn convert(value: &str, from: TextFormat, to: TextFormat) -> Cow<'_, str> {
    use TextFormat::*;

    match (from, to) {
        (EntityEncoded, EntityEncoded) | (Cdata, Cdata) => Cow::Borrowed(value),
        (JsonStringEncoded | JsonNumberEncoded, JsonStringEncoded | JsonNumberEncoded) => {
            Cow::Borrowed(value)
        }
        (EntityEncoded, Cdata) => entities::unescape(value),
        (EntityEncoded, JsonStringEncoded | JsonNumberEncoded) => {
            match entities::unescape(value) {
                Cow::Borrowed(plain) => json_encode(plain),
                Cow::Owned(plain) => into_owned_cow(json_encode(&plain)),
            }
        }
        (Cdata, EntityEncoded) => entity_encode(value, false),
        (Cdata, JsonStringEncoded | JsonNumberEncoded) => json_encode(value),
        (JsonStringEncoded | JsonNumberEncoded, Cdata) => json_unescape(value),
        (JsonStringEncoded | JsonNumberEncoded, EntityEncoded) => match json_unescape(value) {
            Cow::Borrowed(plain) => entity_encode(plain, false),
            Cow::Owned(plain) => into_owned_cow(entity_encode(&plain, false)),
        },
    }
}

fn convert_plain(value: &str, to: TextFormat, encode_cr: bool) -> Cow<'_, str> {
    match to {
        TextFormat::EntityEncoded => entity_encode(value, encode_cr),
        TextFormat::Cdata => Cow::Borrowed(value),
        TextFormat::JsonStringEncoded | TextFormat::JsonNumberEncoded => json_encode(value),
    }
}

/// Produces a stored value in the requested output format.
///
/// With `normalize` set the value is first reduced to its plain form,
/// so the result never depends on how the value happened to be stored.
/// `encode_cr` replaces carriage returns with `&#xD;` whenever plain
/// characters are entity encoded.
pub fn value_in_format(
    value: &str,
    storage: TextFormat,
    output: TextFormat,
    normalize: bool,
    encode_cr: bool,
) -> Cow<'_, str> {
    if storage == TextFormat::Cdata {
        return convert_plain(value, output, encode_cr);
    }
    if normalize {
        let plain = convert(value, storage, TextFormat::Cdata);
        return into_owned_cow(convert_plain(&plain, output, encode_cr));
    }
    convert(value, storage, output)
}

/// Byte length of [value_in_format] with the same arguments.
pub fn value_in_format_size(
    value: &str,
    storage: TextFormat,
    output: TextFormat,
    normalize: bool,
    encode_cr: bool,
) -> usize {
    use TextFormat::*;

    match (storage, output) {
        (Cdata, EntityEncoded) => entities::escaped_size(value, encode_cr),
        (Cdata, Cdata) => value.len(),
        (Cdata, JsonStringEncoded | JsonNumberEncoded) => json_escaped_size(value),
        (EntityEncoded, EntityEncoded) if !normalize => value.len(),
        (JsonStringEncoded | JsonNumberEncoded, JsonStringEncoded | JsonNumberEncoded)
            if !normalize =>
        {
            value.len()
        }
        _ => value_in_format(value, storage, output, normalize, encode_cr).len(),
    }
}
