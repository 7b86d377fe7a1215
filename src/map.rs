//! Levels and sections of a decoded document.
//!
//! This module provides two views of the same text:
//!
//! - [`Level`]: one row of the depth-indexed table that lookups use. Every
//!   begin sentinel appends a level, and a key lands in the level at the parse
//!   depth it was read at. Maps opened one after another at the same depth
//!   therefore share a level
//! - [`Section`]: one map exactly as written, with its own keys and the
//!   sections opened directly inside it. The Serde bridge reads these
//!
//! Both wrap an [`IndexMap`] of raw string values.
//!
//! ## Why IndexMap?
//!
//! Lookup is keyed, but keeping insertion order means:
//!
//! - **Deterministic dumps**: [`Decoder`](crate::Decoder)'s `Display` output
//!   follows the file
//! - **Serde round trips**: structs read fields in the order they were written
//!
//! ## Examples
//!
//! ```rust
//! use serde_tabkv::Decoder;
//!
//! let decoder = Decoder::parse("name: Alice\nage: 30\nname: Bob\n");
//! let root = decoder.level(0).unwrap();
//!
//! assert_eq!(root.len(), 2);
//! assert_eq!(root.get("name"), Some("Bob"));
//! let keys: Vec<_> = root.keys().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use indexmap::IndexMap;
use serde::Serialize;

/// The keys and raw values stored at one depth.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Level {
    title: Option<String>,
    entries: IndexMap<String, String>,
}

impl Level {
    /// Creates the root level.
    #[must_use]
    pub fn root() -> Self {
        Level::default()
    }

    /// Creates a level appended by a begin sentinel.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Level {
            title: Some(title.into()),
            entries: IndexMap::new(),
        }
    }

    /// Title of the sentinel that appended this level; `None` for the root.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Inserts a raw value, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Level {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One map as written: its own keys plus the maps opened directly inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Section {
    #[serde(flatten)]
    level: Level,
    children: Vec<usize>,
}

impl Section {
    /// Creates the implicit top-level section.
    #[must_use]
    pub fn root() -> Self {
        Section::default()
    }

    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Section {
            level: Level::titled(title),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.level.title()
    }

    /// The keys written inside this map, not counting nested maps.
    #[must_use]
    pub fn entries(&self) -> &Level {
        &self.level
    }

    /// Section indices of the maps opened directly inside this one, in file order.
    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        self.level.insert(key, value);
    }

    pub(crate) fn push_child(&mut self, index: usize) {
        self.children.push(index);
    }
}
