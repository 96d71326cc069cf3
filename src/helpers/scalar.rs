/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::time::Duration;
use std::time::SystemTime;

/// A value which can be stored as the text of a child element.
///
/// Numbers, booleans, durations and times (in seconds since the Unix
/// epoch) are written as JSON numbers, strings as JSON strings. A bare
/// [Duration] counts milliseconds, the [Hours], [Minutes], [Seconds],
/// [Millis], [Micros] and [Nanos] wrappers pick the unit explicitly.
pub trait ScalarValue: Sized {
    /// Whether [adopt_element_value()](crate::Document::adopt_element_value)
    /// leaves out empty values of this type.
    const OMIT_EMPTY: bool;

    /// Written as a JSON number instead of a JSON string.
    const IS_NUMBER: bool = true;

    /// Parses the plain text of an element. Returns None if the text
    /// is malformed or out of range.
    fn parse_text(text: &str) -> Option<Self>;

    fn to_text(&self) -> String;

    /// Zero, false, the empty string, a zero duration or the epoch.
    fn is_empty_value(&self) -> bool;

    /// False for values without a JSON form, like a NaN float. Such
    /// values are never written.
    fn is_representable(&self) -> bool {
        true
    }
}

macro_rules! number_scalar {
    ($zero:expr => $($ty:ty),*) => {
        $(
            impl ScalarValue for $ty {
                const OMIT_EMPTY: bool = false;

                fn parse_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn is_empty_value(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

number_scalar!(0 => i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_scalar {
    ($($ty:ty),*) => {
        $(
            impl ScalarValue for $ty {
                const OMIT_EMPTY: bool = false;

                fn parse_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok().filter(|value: &$ty| value.is_finite())
                }

                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn is_empty_value(&self) -> bool {
                    *self == 0.0
                }

                fn is_representable(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

float_scalar!(f32, f64);

impl ScalarValue for bool {
    const OMIT_EMPTY: bool = false;

    fn parse_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") || text == "1" {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") || text == "0" {
            Some(false)
        } else {
            None
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl ScalarValue for String {
    const OMIT_EMPTY: bool = true;
    const IS_NUMBER: bool = false;

    fn parse_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MILLI: u128 = 1_000_000;

fn duration_from_units(count: u64, nanos_per_unit: u128) -> Option<Duration> {
    let nanos = u128::from(count).checked_mul(nanos_per_unit)?;
    let seconds = u64::try_from(nanos / NANOS_PER_SECOND).ok()?;
    let subsec = u32::try_from(nanos % NANOS_PER_SECOND).ok()?;
    Some(Duration::new(seconds, subsec))
}

// Whole units, the remainder is dropped
fn duration_to_units(duration: &Duration, nanos_per_unit: u128) -> String {
    (duration.as_nanos() / nanos_per_unit).to_string()
}

impl ScalarValue for Duration {
    const OMIT_EMPTY: bool = true;

    fn parse_text(text: &str) -> Option<Self> {
        u64::parse_text(text).and_then(|count| duration_from_units(count, NANOS_PER_MILLI))
    }

    fn to_text(&self) -> String {
        duration_to_units(self, NANOS_PER_MILLI)
    }

    fn is_empty_value(&self) -> bool {
        self.is_zero()
    }
}

macro_rules! duration_unit {
    ($($(#[$meta:meta])* $name:ident = $nanos:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
            pub struct $name(pub Duration);

            impl ScalarValue for $name {
                const OMIT_EMPTY: bool = true;

                fn parse_text(text: &str) -> Option<Self> {
                    u64::parse_text(text)
                        .and_then(|count| duration_from_units(count, $nanos))
                        .map($name)
                }

                fn to_text(&self) -> String {
                    duration_to_units(&self.0, $nanos)
                }

                fn is_empty_value(&self) -> bool {
                    self.0.is_zero()
                }
            }
        )*
    };
}

duration_unit! {
    /// A duration stored as whole hours.
    Hours = 3_600 * NANOS_PER_SECOND;
    /// A duration stored as whole minutes.
    Minutes = 60 * NANOS_PER_SECOND;
    /// A duration stored as whole seconds.
    ///
    /// ```
    /// use std::time::Duration;
    /// use dualdom::{Document, Seconds};
    ///
    /// let mut doc = Document::new();
    /// let root = doc.create_element("r");
    /// doc.adopt_element_value(root, "timeout", &Seconds(Duration::from_millis(90_500)));
    /// assert_eq!(doc.node_ref(root).to_string(), "<r><timeout>90</timeout></r>");
    /// ```
    Seconds = NANOS_PER_SECOND;
    /// A duration stored as whole milliseconds, same as a bare [Duration].
    Millis = NANOS_PER_MILLI;
    /// A duration stored as whole microseconds.
    Micros = 1_000;
    /// A duration stored as nanoseconds.
    Nanos = 1;
}

impl ScalarValue for SystemTime {
    const OMIT_EMPTY: bool = true;

    fn parse_text(text: &str) -> Option<Self> {
        let seconds = u64::parse_text(text)?;
        SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(seconds))
    }

    fn to_text(&self) -> String {
        epoch_seconds(*self).to_string()
    }

    fn is_empty_value(&self) -> bool {
        *self == SystemTime::UNIX_EPOCH
    }
}

// Times before the epoch count as the epoch
pub(super) fn epoch_seconds(time: SystemTime) -> u64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|since| since.as_secs())
        .unwrap_or(0)
}
