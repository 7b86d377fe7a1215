//! The tabkv text format.
//!
//! This module documents the line grammar produced by [`Encoder`](crate::Encoder)
//! and consumed by [`Decoder`](crate::Decoder), and holds the literal markers
//! both sides agree on.
//!
//! # Overview
//!
//! tabkv is a line-oriented key/value notation for hand-editable configuration
//! and save data. Every line stands on its own; there is no quoting, escaping or
//! multi-line value.
//!
//! # Lines
//!
//! ## Scalars
//!
//! ```text
//! name: Alice
//! speed: 2.5
//! ```
//!
//! The key ends at the **first** `": "`. Everything after it, including further
//! colons and leading spaces, is the value. A line ending in `:` is a key with an
//! empty value.
//!
//! ## Maps
//!
//! ```text
//!  ------------- Player
//! name: Alice
//!  ============= Player
//! ```
//!
//! A begin sentinel appends a new map level and moves one depth deeper; an end
//! sentinel moves one depth back. Keys land in the level at the current depth,
//! so a map opened after a sibling closed writes into the sibling's level. The
//! titles are labels for humans (and for the Serde bridge); sentinels are
//! matched by position, never by title.
//!
//! ## Tabs
//!
//! Indentation is `open tabs × tab size` spaces. It is purely visual: the
//! decoder strips leading whitespace before looking at a line, so tabs never
//! change which map a key lands in.
//!
//! ```text
//!  ------------- M
//! a: 1
//!   b: 2
//!  ============= M
//! ```
//!
//! decodes to the table `[ {}, {a: 1, b: 2} ]`.
//!
//! ## Version
//!
//! An optional `Version: <x.y.z>` line is written first and read back as
//! document metadata rather than as a key.
//!
//! ## Everything else
//!
//! Blank lines and lines with no delimiter (titles written by
//! [`Event::Title`](crate::Event::Title)) are ignored by the decoder.

/// Begin-map sentinel, written after one space of the current indentation.
pub const MAP_BEGIN: &str = "-------------";

/// End-map sentinel.
pub const MAP_END: &str = "=============";

/// Separator between a key and its value.
pub const DELIMITER: &str = ": ";

/// Reserved key carrying the document version.
pub const VERSION_KEY: &str = "Version";

/// Returns the title of a map sentinel line, if `line` (already stripped of
/// indentation) starts with `marker` followed by a space or the end of line.
pub(crate) fn sentinel_title<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix(' ')
    }
}

/// Splits a stripped line into key and raw value.
pub(crate) fn split_pair(line: &str) -> Option<(&str, &str)> {
    match line.split_once(DELIMITER) {
        Some(pair) => Some(pair),
        None => line.strip_suffix(':').map(|key| (key, "")),
    }
}
