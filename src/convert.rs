//! Conversion between typed values and their canonical text.
//!
//! Every value written by the [`Encoder`](crate::Encoder) goes through
//! [`ToText`], and every typed lookup on a [`Decoder`](crate::Decoder) goes
//! through [`FromText`]. Implementing the pair for your own type (by hand or
//! with [`text_conversion!`](crate::text_conversion)) is all it takes to store
//! it; the engine never needs to know about it.
//!
//! ## Built-in kinds
//!
//! | Type | Text |
//! |------|------|
//! | `bool` | `true` / `false` (`1` / `0` also read) |
//! | `char` | the character itself |
//! | integers | decimal |
//! | `f32`, `f64` | Rust `Display`, which round-trips exactly |
//! | `String`, `str` | verbatim |
//! | `PathBuf`, `Path` | lossy UTF-8 |
//! | `DateTime<Utc>` | RFC 3339 |
//! | `BigInt`, `BigUint` | decimal |
//! | `Option<T>` | empty for `None` |
//!
//! ```rust
//! use serde_tabkv::{FromText, ToText};
//!
//! assert_eq!((-42i32).to_text(), "-42");
//! assert_eq!(i32::from_text(" 17 "), Some(17));
//! assert_eq!(f64::from_text("2.5"), Some(2.5));
//! assert_eq!(bool::from_text("maybe"), None);
//! ```

use chrono::{DateTime, Utc};
use num_bigint::{BigInt, BigUint};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

/// Produces the canonical text of a value.
pub trait ToText {
    fn to_text(&self) -> String;
}

/// Reads a value back from its text, returning `None` when the text does not parse.
pub trait FromText: Sized {
    fn from_text(text: &str) -> Option<Self>;
}

impl<T: ToText + ?Sized> ToText for &T {
    fn to_text(&self) -> String {
        (**self).to_text()
    }
}

impl ToText for str {
    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl ToText for String {
    fn to_text(&self) -> String {
        self.clone()
    }
}

impl ToText for Cow<'_, str> {
    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl FromText for String {
    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl ToText for bool {
    fn to_text(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

impl FromText for bool {
    fn from_text(text: &str) -> Option<Self> {
        match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ToText for char {
    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl FromText for char {
    fn from_text(text: &str) -> Option<Self> {
        text.chars().next()
    }
}

macro_rules! impl_decimal_text {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToText for $ty {
                fn to_text(&self) -> String {
                    self.to_string()
                }
            }

            impl FromText for $ty {
                fn from_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

impl_decimal_text!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, BigInt, BigUint,
);

impl ToText for Path {
    fn to_text(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl ToText for PathBuf {
    fn to_text(&self) -> String {
        self.as_path().to_text()
    }
}

impl FromText for PathBuf {
    fn from_text(text: &str) -> Option<Self> {
        Some(PathBuf::from(text))
    }
}

impl ToText for DateTime<Utc> {
    fn to_text(&self) -> String {
        self.to_rfc3339()
    }
}

impl FromText for DateTime<Utc> {
    fn from_text(text: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl<T: ToText> ToText for Option<T> {
    fn to_text(&self) -> String {
        self.as_ref().map(ToText::to_text).unwrap_or_default()
    }
}

impl<T: FromText> FromText for Option<T> {
    fn from_text(text: &str) -> Option<Self> {
        if text.is_empty() {
            Some(None)
        } else {
            T::from_text(text).map(Some)
        }
    }
}

/// Whitespace-separated components of a composite value's text.
///
/// Composite types usually store their parts space-separated on one line
/// (`"2 3"` for a 2D vector). `Fields` reads them back one part at a time.
///
/// # Examples
///
/// ```rust
/// use serde_tabkv::Fields;
///
/// let mut fields = Fields::new("2 3.5 yes");
/// assert_eq!(fields.next_as::<i32>(), Some(2));
/// assert_eq!(fields.next_as::<f32>(), Some(3.5));
/// assert_eq!(fields.next_as::<bool>(), None);
/// assert_eq!(fields.next_as::<bool>(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    pub fn new(text: &'a str) -> Self {
        Fields {
            inner: text.split_whitespace(),
        }
    }

    /// Converts the next component, consuming it even when it does not parse.
    pub fn next_as<T: FromText>(&mut self) -> Option<T> {
        self.inner.next().and_then(T::from_text)
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_integers_trim_and_reject() {
        assert_eq!(u64::from_text("18446744073709551615"), Some(u64::MAX));
        assert_eq!(i64::from_text("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(u32::from_text("-1"), None);
        assert_eq!(i32::from_text("1.5"), None);
        assert_eq!(i32::from_text(""), None);
    }

    #[test]
    fn test_floats_round_trip_display() {
        for v in [0.0f64, -1.25, 1e-300, f64::MAX, 0.1 + 0.2] {
            assert_eq!(f64::from_text(&v.to_text()), Some(v));
        }
        assert_eq!(0.1f32.to_text(), "0.1");
        assert_eq!(f32::from_text("2"), Some(2.0));
    }

    #[test]
    fn test_bool_and_char() {
        assert_eq!(true.to_text(), "true");
        assert_eq!(bool::from_text("0"), Some(false));
        assert_eq!(bool::from_text("TRUE"), None);
        assert_eq!(char::from_text("xyz"), Some('x'));
        assert_eq!(char::from_text(""), None);
    }

    #[test]
    fn test_paths_and_strings() {
        let path = PathBuf::from("assets/level 1.map");
        assert_eq!(PathBuf::from_text(&path.to_text()), Some(path));
        assert_eq!(String::from_text(""), Some(String::new()));
        assert_eq!("a: b".to_text(), "a: b");
    }

    #[test]
    fn test_datetime_and_bigint() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(DateTime::<Utc>::from_text(&dt.to_text()), Some(dt));

        let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
        assert_eq!(BigInt::from_text(&big.to_text()), Some(big));
        assert_eq!(BigUint::from_text("-1"), None);
    }

    #[test]
    fn test_option_text() {
        assert_eq!(None::<i32>.to_text(), "");
        assert_eq!(Some(5).to_text(), "5");
        assert_eq!(Option::<i32>::from_text(""), Some(None));
        assert_eq!(Option::<i32>::from_text("7"), Some(Some(7)));
        assert_eq!(Option::<i32>::from_text("x"), None);
    }
}
