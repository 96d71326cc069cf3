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

/// A position in the parser input text.
///
/// This struct is returned from the
/// [location()](crate::ParserPos::location) method and attached to
/// every [ParseWarning](crate::ParseWarning), so diagnostics can point
/// the user at the offending spot.
///
/// Rows and columns start from 1. Columns are counted in characters
/// with tabs expanded to the parser's tab stops.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    /// Byte offset in the input text.
    pub bytes: usize,
    /// Line number. `\r\n`, `\r` and `\n` each end one line.
    pub row: usize,
    /// Column on the line.
    pub column: usize,
}

impl Location {
    /// Creates a location pointing to the start of the input.
    pub fn new() -> Self {
        Location {
            bytes: 0,
            row: 1,
            column: 1,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.row, self.column
        )
    }
}
