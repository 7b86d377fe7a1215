//! Serde deserialization out of a decoded tabkv table.
//!
//! This module provides the [`Deserializer`], which reads `T: Deserialize`
//! structs and maps from a [`Decoder`].
//!
//! ## Overview
//!
//! A struct is read from one [`Section`]: its scalar fields come from the
//! section's own keys, its nested struct or map fields from the sections opened
//! directly inside it, matched by title. This is the shape
//! [`to_string`](crate::to_string) writes. Reading goes by section rather than
//! by depth, so two maps written one after another at the same depth stay
//! apart.
//!
//! Unlike [`RawValue::to`](crate::RawValue::to), text that does not parse as
//! the field's type is an error ([`Error::TypeMismatch`]) rather than a default.
//! An empty value reads as `None` for `Option` fields.
//!
//! ## Usage
//!
//! ```rust
//! use serde_tabkv::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Stats { hp: u32 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Player { name: String, stats: Stats }
//!
//! let text = "name: Alice\n ------------- stats\n  hp: 10\n ============= stats\n";
//! let player: Player = from_str(text).unwrap();
//! assert_eq!(player, Player { name: "Alice".into(), stats: Stats { hp: 10 } });
//! ```
//!
//! Borrowing straight from a decoder:
//!
//! ```rust
//! use serde_tabkv::{from_decoder, Decoder};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Entry<'a> { path: &'a str }
//!
//! let decoder = Decoder::parse("path: assets/hero.png\n");
//! let entry: Entry = from_decoder(&decoder).unwrap();
//! assert_eq!(entry.path, "assets/hero.png");
//! ```

use crate::{Decoder, Error, FromText, Result, Section};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Reads one section of a [`Decoder`] as a map.
#[derive(Clone, Copy)]
pub struct Deserializer<'de> {
    decoder: &'de Decoder,
    section: usize,
}

impl<'de> Deserializer<'de> {
    /// Starts at the top-level section, whatever the decoder's lookup depth.
    pub fn new(decoder: &'de Decoder) -> Self {
        Self::at_section(decoder, 0)
    }

    /// Starts at the section with index `section` in [`Decoder::sections`].
    pub fn at_section(decoder: &'de Decoder, section: usize) -> Self {
        Deserializer { decoder, section }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let section = self
            .decoder
            .section(self.section)
            .ok_or_else(|| Error::custom(format!("no section {}", self.section)))?;
        visitor.visit_map(SectionAccess::new(self.decoder, section))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf seq tuple tuple_struct map struct enum identifier
    }
}

enum Pending<'de> {
    Text { key: &'de str, text: &'de str },
    Section(usize),
}

/// Yields a section's keys first, then its child sections by title.
struct SectionAccess<'de> {
    decoder: &'de Decoder,
    entries: indexmap::map::Iter<'de, String, String>,
    children: std::slice::Iter<'de, usize>,
    pending: Option<Pending<'de>>,
}

impl<'de> SectionAccess<'de> {
    fn new(decoder: &'de Decoder, section: &'de Section) -> Self {
        SectionAccess {
            decoder,
            entries: section.entries().iter(),
            children: section.children().iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for SectionAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if let Some((key, text)) = self.entries.next() {
            self.pending = Some(Pending::Text { key, text });
            return seed.deserialize(TextDeserializer::key(key)).map(Some);
        }

        match self.children.next() {
            Some(&index) => {
                let title = self
                    .decoder
                    .section(index)
                    .and_then(Section::title)
                    .unwrap_or_default();
                self.pending = Some(Pending::Section(index));
                seed.deserialize(TextDeserializer::key(title)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some(Pending::Text { key, text }) => seed.deserialize(TextDeserializer { key, text }),
            Some(Pending::Section(index)) => {
                seed.deserialize(Deserializer::at_section(self.decoder, index))
            }
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len() + self.children.len())
    }
}

/// Deserializes one raw value (or a key) through [`FromText`].
#[derive(Clone, Copy)]
struct TextDeserializer<'de> {
    key: &'de str,
    text: &'de str,
}

impl<'de> TextDeserializer<'de> {
    fn key(key: &'de str) -> Self {
        TextDeserializer { key, text: key }
    }

    fn convert<T: FromText>(&self, expected: &str) -> Result<T> {
        T::from_text(self.text).ok_or_else(|| Error::type_mismatch(self.key, expected, self.text))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.convert::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for TextDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.text)
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.text)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.text)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.text.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.text.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("sequences"))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("tuples"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("tuple structs"))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::type_mismatch(self.key, "map", self.text))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.text.into_deserializer())
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.text)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}
