/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::Location;

fn is_continuation(c: u8) -> bool {
    c & 0xc0 == 0x80
}

fn next_tab_stop(column: usize, tab_size: usize) -> usize {
    ((column - 1) / tab_size + 1) * tab_size + 1
}

/// A copyable cursor into the parser input.
///
/// The cursor tracks the row and column of its byte offset while it
/// moves. `\r\n`, `\r` and `\n` each count as one line break, a tab
/// moves the column to the next multiple of the tab size, and a
/// multi-byte UTF-8 character takes one column.
///
/// The end of the input, or the first NUL byte, is the end of file.
/// A cursor can also be unresolved, which behaves as end of file and
/// gets its real offset lazily when it has to move backwards or
/// measure a distance.
///
/// ```
/// use dualdom::ParserPos;
///
/// let mut pos = ParserPos::new("a\tb", 4);
/// pos += 2;
/// assert_eq!(pos.current(), b'b');
/// assert_eq!(pos.column(), 5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ParserPos<'a> {
    source: &'a str,
    pos: Option<usize>,
    row: usize,
    column: usize,
    tab_size: usize,
}

impl<'a> ParserPos<'a> {
    /// Creates a cursor at the start of `source`.
    pub fn new(source: &'a str, tab_size: usize) -> Self {
        ParserPos {
            source,
            pos: Some(0),
            row: 1,
            column: 1,
            tab_size: tab_size.max(1),
        }
    }

    /// Creates a cursor which does not point anywhere yet.
    pub fn unresolved(source: &'a str, tab_size: usize) -> Self {
        ParserPos {
            source,
            pos: None,
            row: 0,
            column: 0,
            tab_size: tab_size.max(1),
        }
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.source.as_bytes().get(index).copied().unwrap_or(0)
    }

    fn end_offset(&self) -> usize {
        self.source
            .bytes()
            .position(|c| c == 0)
            .unwrap_or(self.source.len())
    }

    fn resolved_offset(&self) -> usize {
        match self.pos {
            Some(pos) => pos,
            None => self.end_offset(),
        }
    }

    fn column_from_line_start(&self, pos: usize) -> usize {
        let mut start = pos;
        while start > 0 {
            let previous = self.byte_at(start - 1);
            if previous == b'\n' || (previous == b'\r' && self.byte_at(start) != b'\n') {
                break;
            }
            start -= 1;
        }

        let mut column = 1;
        for &c in &self.source.as_bytes()[start..pos] {
            match c {
                b'\t' => column = next_tab_stop(column, self.tab_size),
                b'\r' => {}
                c if is_continuation(c) => {}
                _ => column += 1,
            }
        }
        column
    }

    pub fn is_sof(&self) -> bool {
        self.pos == Some(0)
    }

    pub fn is_eof(&self) -> bool {
        self.current() == 0
    }

    pub fn set_sof(&mut self) {
        self.pos = Some(0);
        self.row = 1;
        self.column = 1;
    }

    /// Moves to the end of file, resolving an unresolved cursor.
    pub fn set_eof(&mut self) {
        if self.pos.is_none() {
            self.set_sof();
        }
        while !self.is_eof() {
            self.advance(1);
        }
    }

    /// Byte at the cursor, or 0 at the end of file.
    pub fn current(&self) -> u8 {
        match self.pos {
            Some(pos) => self.byte_at(pos),
            None => 0,
        }
    }

    /// Byte `offset` bytes after the cursor, or 0 past the end.
    pub fn peek(&self, offset: usize) -> u8 {
        match self.pos {
            Some(pos) if self.byte_at(pos) != 0 => self.byte_at(pos + offset),
            _ => 0,
        }
    }

    /// Moves forward up to `count` bytes, stopping at the end of file.
    pub fn advance(&mut self, count: usize) {
        let Some(mut pos) = self.pos else {
            return;
        };
        for _ in 0..count {
            match self.byte_at(pos) {
                0 => break,
                b'\r' => {
                    if self.byte_at(pos + 1) != b'\n' {
                        self.row += 1;
                        self.column = 1;
                    }
                }
                b'\n' => {
                    self.row += 1;
                    self.column = 1;
                }
                b'\t' => self.column = next_tab_stop(self.column, self.tab_size),
                c if is_continuation(c) => {}
                _ => self.column += 1,
            }
            pos += 1;
        }
        self.pos = Some(pos);
    }

    /// Moves backward up to `count` bytes, stopping at the start of file.
    pub fn retreat(&mut self, count: usize) {
        if self.pos.is_none() {
            self.set_eof();
        }
        let Some(mut pos) = self.pos else {
            return;
        };
        for _ in 0..count {
            if pos == 0 {
                break;
            }
            pos -= 1;
            match self.byte_at(pos) {
                b'\n' => {
                    self.row = self.row.saturating_sub(1).max(1);
                    self.column = self.column_from_line_start(pos);
                }
                b'\r' => {
                    if self.byte_at(pos + 1) != b'\n' {
                        self.row = self.row.saturating_sub(1).max(1);
                    }
                    self.column = self.column_from_line_start(pos);
                }
                b'\t' => self.column = self.column_from_line_start(pos),
                c if is_continuation(c) => {}
                _ => self.column = self.column.saturating_sub(1).max(1),
            }
        }
        self.pos = Some(pos);
    }

    /// Number of bytes from `earlier` to this cursor.
    ///
    /// Unresolved cursors count as the end of file. Returns 0 if
    /// `earlier` is actually after this cursor.
    pub fn distance(&self, earlier: &ParserPos<'_>) -> usize {
        self.resolved_offset()
            .saturating_sub(earlier.resolved_offset())
    }

    /// Checks whether the input at the cursor starts with `literal`.
    ///
    /// Case insensitive comparison folds ASCII letters only. The
    /// comparison never reads past the end of file.
    pub fn is_string(&self, literal: &str, case_sensitive: bool) -> bool {
        let Some(pos) = self.pos else {
            return literal.is_empty();
        };
        literal.bytes().enumerate().all(|(i, expected)| {
            let actual = self.byte_at(pos + i);
            if actual == 0 {
                false
            } else if case_sensitive {
                actual == expected
            } else {
                actual.eq_ignore_ascii_case(&expected)
            }
        })
    }

    /// One based line number, or 0 while the cursor is unresolved.
    pub fn row(&self) -> usize {
        self.row
    }

    /// One based column, or 0 while the cursor is unresolved.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> Option<usize> {
        self.pos
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Current position. An unresolved cursor reports the end of file
    /// offset with row and column 0, since its line is not known until
    /// it is resolved.
    pub fn location(&self) -> Location {
        Location {
            bytes: self.resolved_offset(),
            row: self.row,
            column: self.column,
        }
    }

    /// Input text from the cursor to the end.
    pub fn rest(&self) -> &'a str {
        let start = self.resolved_offset();
        self.source.get(start..).unwrap_or("")
    }

    /// Input text between this cursor and `end`.
    pub(crate) fn slice_to(&self, end: &ParserPos<'a>) -> &'a str {
        let start = self.resolved_offset();
        let end = end.resolved_offset().max(start);
        self.source.get(start..end).unwrap_or("")
    }
}

impl PartialEq for ParserPos<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.resolved_offset() == other.resolved_offset()
    }
}

impl Eq for ParserPos<'_> {}

impl AddAssign<usize> for ParserPos<'_> {
    fn add_assign(&mut self, count: usize) {
        self.advance(count);
    }
}

impl SubAssign<usize> for ParserPos<'_> {
    fn sub_assign(&mut self, count: usize) {
        self.retreat(count);
    }
}

impl<'a> Add<usize> for ParserPos<'a> {
    type Output = ParserPos<'a>;

    fn add(mut self, count: usize) -> ParserPos<'a> {
        self.advance(count);
        self
    }
}

impl<'a> Sub<usize> for ParserPos<'a> {
    type Output = ParserPos<'a>;

    fn sub(mut self, count: usize) -> ParserPos<'a> {
        self.retreat(count);
        self
    }
}

impl<'a> Sub<ParserPos<'a>> for ParserPos<'a> {
    type Output = usize;

    fn sub(self, earlier: ParserPos<'a>) -> usize {
        self.distance(&earlier)
    }
}

/// # Must not compile tests
///
/// A cursor cannot outlive the text it points into:
/// ```compile_fail
/// use dualdom::ParserPos;
/// let pos: ParserPos;
/// {
///     let text = String::from("<a/>");
///     pos = ParserPos::new(&text, 4);
/// }
/// println!("{}", pos.row());
/// ```
#[cfg(doctest)]
struct MustNotCompileTests;
