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

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
    pub const CR: &str = "&#xD;";
}

fn entity_of(c: char, encode_cr: bool) -> Option<&'static str> {
    match c {
        '<' => Some(predefined::LT),
        '>' => Some(predefined::GT),
        '&' => Some(predefined::AMP),
        '\'' => Some(predefined::APOS),
        '"' => Some(predefined::QUOT),
        '\r' if encode_cr => Some(predefined::CR),
        _ => None,
    }
}

/// Byte length of `s` after [escape].
pub fn escaped_size(s: &str, encode_cr: bool) -> usize {
    let mut size = 0;
    for c in s.chars() {
        match entity_of(c, encode_cr) {
            Some(entity) => size += entity.len(),
            None => size += c.len_utf8(),
        }
    }

    size
}

/// Appends `s` to `buf` with the markup characters replaced by the
/// predefined entities, and carriage returns too if `encode_cr` is set.
pub fn escape(s: &str, encode_cr: bool, buf: &mut String) {
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if let Some(entity) = entity_of(c, encode_cr) {
            buf.push_str(&s[start..i]);
            buf.push_str(entity);
            start = i + c.len_utf8();
        }
    }
    buf.push_str(&s[start..]);
}

fn decode_reference(reference: &str) -> Option<char> {
    match reference {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let number = reference.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Replaces predefined entities and character references with the
/// characters they stand for. Anything that does not decode is kept
/// as written.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut buf = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        buf.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                buf.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                buf.push('&');
                rest = &rest[1..];
            }
        }
    }
    buf.push_str(rest);

    Cow::Owned(buf)
}
