//! tabkv decoding.
//!
//! This module provides the [`Decoder`], which parses tabkv text into a
//! depth-indexed table of [`Level`]s and answers depth-scoped lookups.
//!
//! ## Overview
//!
//! - **Single pass**: every line is handled once, in order, with no backtracking
//! - **Depth counter**: each begin sentinel appends a new level and moves the
//!   parse depth one deeper; an end sentinel moves it back (never below 0). A
//!   key lands in the level at the current parse depth. Titles are kept but
//!   never matched
//! - **Sections**: the same pass records every map on its own, with its
//!   nested maps, for callers that need the written tree ([`Decoder::sections`])
//! - **Indentation ignored**: leading whitespace is stripped before a line is
//!   looked at
//! - **Lenient**: unbalanced end sentinels, blank lines and lines without a
//!   delimiter are skipped; nothing in parsing can fail
//!
//! ## Lookup depth
//!
//! Lookups are depth-exact: [`Decoder::get`] only looks at the level under the
//! lookup cursor, which starts at the deepest level of the table. The cursor is
//! moved explicitly with [`Decoder::push_depth`], [`Decoder::pop_depth`] and
//! [`Decoder::set_depth`], and is always clamped to the table.
//!
//! ```rust
//! use serde_tabkv::Decoder;
//!
//! let text = "\
//! root: 0
//!  ------------- Settings
//! volume: 7
//!  ------------- Video
//! fullscreen: true
//!  ============= Video
//!  ============= Settings
//! ";
//!
//! let mut decoder = Decoder::parse(text);
//! assert_eq!(decoder.levels().len(), 3);
//! assert_eq!(decoder.depth(), 2);
//! assert!(decoder.get("fullscreen").to::<bool>());
//! assert!(decoder.get("volume").is_empty());
//!
//! decoder.set_depth(0);
//! assert_eq!(&decoder["root"], "0");
//! decoder.push_depth();
//! assert_eq!(decoder.get("volume").to::<u8>(), 7);
//! ```

use crate::format::{self, MAP_BEGIN, MAP_END, VERSION_KEY};
use crate::{Error, Level, RawValue, Result, Section};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::Read;
use std::ops::Index;
use std::path::Path;
use tracing::{debug, trace};

/// The tabkv decoder.
///
/// Built once from finished text; afterwards only the lookup cursor changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoder {
    levels: Vec<Level>,
    sections: Vec<Section>,
    version: Option<String>,
    parse_depth: usize,
    lookup_depth: usize,
}

impl Decoder {
    /// Parses tabkv text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut levels = vec![Level::root()];
        let mut parse_depth = 0usize;
        let mut sections = vec![Section::root()];
        let mut open = vec![0usize];
        let mut version = None;

        for line in text.lines() {
            let line = line.trim_start();
            if line.is_empty() {
                continue;
            }

            if let Some(title) = format::sentinel_title(line, MAP_BEGIN) {
                levels.push(Level::titled(title));
                parse_depth += 1;

                let index = sections.len();
                sections.push(Section::titled(title));
                if let Some(parent) = open.last().and_then(|&i| sections.get_mut(i)) {
                    parent.push_child(index);
                }
                open.push(index);
                continue;
            }

            if format::sentinel_title(line, MAP_END).is_some() {
                if parse_depth > 0 {
                    parse_depth -= 1;
                    open.pop();
                } else {
                    trace!("map end at root depth ignored");
                }
                continue;
            }

            let Some((key, value)) = format::split_pair(line) else {
                continue;
            };

            if key == VERSION_KEY {
                version = Some(value.to_string());
                continue;
            }

            // Every begin appends a level, so parse_depth is always in range
            if let Some(level) = levels.get_mut(parse_depth) {
                level.insert(key, value);
            }
            if let Some(section) = open.last().and_then(|&i| sections.get_mut(i)) {
                section.insert(key, value);
            }
        }

        let lookup_depth = levels.len() - 1;
        debug!(
            levels = levels.len(),
            sections = sections.len(),
            parse_depth,
            version = version.as_deref(),
            "parsed tabkv document"
        );

        Decoder {
            levels,
            sections,
            version,
            parse_depth,
            lookup_depth,
        }
    }

    /// Reads and parses a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
        Ok(Self::parse(&text))
    }

    /// Reads everything from `reader` and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails or the input is not UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }

    /// Looks `key` up at the current lookup depth.
    ///
    /// A missing key yields a handle over `""`.
    #[must_use]
    pub fn get(&self, key: &str) -> RawValue<'_> {
        self.get_at(self.lookup_depth, key)
    }

    /// Looks `key` up at an explicit depth, leaving the cursor alone.
    #[must_use]
    pub fn get_at(&self, depth: usize, key: &str) -> RawValue<'_> {
        self.levels
            .get(depth)
            .and_then(|level| level.get(key))
            .map(RawValue::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.levels
            .get(self.lookup_depth)
            .is_some_and(|level| level.contains_key(key))
    }

    /// Moves the lookup cursor one level deeper, if there is one.
    pub fn push_depth(&mut self) {
        if self.lookup_depth + 1 < self.levels.len() {
            self.lookup_depth += 1;
        } else {
            trace!(depth = self.lookup_depth, "push_depth clamped at deepest level");
        }
    }

    /// Moves the lookup cursor one level shallower, stopping at the root.
    pub fn pop_depth(&mut self) {
        self.lookup_depth = self.lookup_depth.saturating_sub(1);
    }

    /// Puts the lookup cursor on `depth`, clamped to the deepest level.
    pub fn set_depth(&mut self, depth: usize) {
        let deepest = self.levels.len() - 1;
        if depth > deepest {
            trace!(depth, deepest, "set_depth clamped");
        }
        self.lookup_depth = depth.min(deepest);
    }

    /// Current lookup depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.lookup_depth
    }

    /// Number of maps still open at the end of the input; `0` for balanced text.
    #[must_use]
    pub fn parse_depth(&self) -> usize {
        self.parse_depth
    }

    /// The whole table, root first. Never empty.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    #[must_use]
    pub fn level(&self, depth: usize) -> Option<&Level> {
        self.levels.get(depth)
    }

    /// Every map in file order, index 0 being the implicit top-level one.
    ///
    /// Unlike [`levels`](Self::levels), maps opened one after another at the
    /// same depth stay apart here, and each knows the maps nested in it.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// The document's `Version` line, if it had one.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// `true` when no level holds any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Level::is_empty)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::parse("")
    }
}

impl From<&str> for Decoder {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl Index<&str> for Decoder {
    type Output = str;

    fn index(&self, key: &str) -> &str {
        self.get(key).as_str()
    }
}

impl fmt::Display for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(version) = &self.version {
            writeln!(f, "{}{}{}", VERSION_KEY, format::DELIMITER, version)?;
        }
        for (depth, level) in self.levels.iter().enumerate() {
            match level.title() {
                Some(title) => writeln!(f, "[{}] {}", depth, title)?,
                None => writeln!(f, "[{}]", depth)?,
            }
            for (key, value) in level {
                writeln!(f, "  {}{}{}", key, format::DELIMITER, value)?;
            }
        }
        Ok(())
    }
}
