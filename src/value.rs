//! Raw value handles returned by lookups.
//!
//! The decoder stores strings only. A lookup hands back a [`RawValue`] over the
//! stored text (or over `""` when the key is missing) and conversion to a typed
//! value happens when the caller asks for it.
//!
//! ## Lenient conversion
//!
//! [`RawValue::to`] never fails: text that does not parse as the requested type
//! yields `T::default()` (`0`, `0.0`, `false`, an empty string). Use
//! [`RawValue::parse`] to tell a stored zero from a conversion failure.
//!
//! ```rust
//! use serde_tabkv::Decoder;
//!
//! let decoder = Decoder::parse("lives: 3\nname: Alice\n");
//!
//! assert_eq!(decoder.get("lives").to::<i32>(), 3);
//! assert_eq!(decoder.get("name").to::<i32>(), 0);
//! assert_eq!(decoder.get("name").parse::<i32>(), None);
//! assert_eq!(decoder.get("missing").to::<f32>(), 0.0);
//! assert!(decoder.get("missing").is_empty());
//! ```

use crate::FromText;
use std::fmt;
use std::ops::Deref;
use tracing::trace;

/// A borrowed, not yet converted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawValue<'a> {
    text: &'a str,
}

impl<'a> RawValue<'a> {
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        RawValue { text }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Converts the text, returning `None` when it does not parse.
    #[must_use]
    pub fn parse<T: FromText>(&self) -> Option<T> {
        T::from_text(self.text)
    }

    /// Converts the text, falling back to `T::default()` when it does not parse.
    #[must_use]
    pub fn to<T: FromText + Default>(&self) -> T {
        match self.parse() {
            Some(value) => value,
            None => {
                trace!(
                    text = self.text,
                    target = std::any::type_name::<T>(),
                    "conversion failed, using default"
                );
                T::default()
            }
        }
    }
}

impl Deref for RawValue<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.text
    }
}

impl fmt::Display for RawValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl From<RawValue<'_>> for String {
    fn from(value: RawValue<'_>) -> Self {
        value.text.to_string()
    }
}

impl PartialEq<str> for RawValue<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for RawValue<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_on_failure() {
        let value = RawValue::new("not a number");
        assert_eq!(value.to::<i32>(), 0);
        assert_eq!(value.to::<u64>(), 0);
        assert_eq!(value.to::<f64>(), 0.0);
        assert!(!value.to::<bool>());
        assert_eq!(value.to::<String>(), "not a number");
    }

    #[test]
    fn test_empty_handle() {
        let value = RawValue::default();
        assert!(value.is_empty());
        assert_eq!(value.to::<f32>(), 0.0);
        assert_eq!(value.to::<char>(), '\0');
        assert_eq!(value.to::<PathBuf>(), PathBuf::new());
        assert_eq!(String::from(value), "");
    }

    #[test]
    fn test_handle_reads_like_a_str() {
        let value = RawValue::new("2 3");
        assert_eq!(value, "2 3");
        assert_eq!(value.len(), 3);
        assert_eq!(value.split(' ').count(), 2);
        assert_eq!(value.to_string(), "2 3");
    }
}
