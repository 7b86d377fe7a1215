//! Serde serialization into tabkv.
//!
//! This module provides the [`Serializer`], which drives an
//! [`Encoder`](crate::Encoder) from any `T: Serialize` struct or map.
//!
//! ## Mapping
//!
//! - **Scalars** become `key: value` lines, converted through
//!   [`ToText`](crate::ToText)
//! - **Nested structs and maps** become a map (`BeginMap` titled with the field
//!   name), with their fields one tab deeper
//! - **`None`** fields are left out; unit values are written with an empty value
//! - **Unit enum variants** are written by name
//!
//! Sequences, tuples, byte arrays and enum variants carrying data have no
//! notation and fail with [`Error::UnsupportedType`]. So do strings spanning
//! several lines and keys that would not read back as the same key.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_tabkv::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Stats { hp: u32, speed: f32 }
//!
//! #[derive(Serialize)]
//! struct Player { name: String, stats: Stats }
//!
//! let player = Player { name: "Alice".into(), stats: Stats { hp: 10, speed: 1.5 } };
//! assert_eq!(
//!     to_string(&player).unwrap(),
//!     "name: Alice\n ------------- stats\n  hp: 10\n  speed: 1.5\n ============= stats\n"
//! );
//! ```

use crate::format::{DELIMITER, MAP_BEGIN, MAP_END, VERSION_KEY};
use crate::{Encoder, EncoderOptions, Error, Result, ToText};
use serde::ser::{self, Impossible, Serialize};

/// The tabkv serializer.
///
/// Accepts a struct or map at the top level. Created via [`Serializer::new`].
pub struct Serializer {
    encoder: Encoder,
}

impl Serializer {
    pub fn new(options: EncoderOptions) -> Self {
        Serializer {
            encoder: Encoder::with_options(options),
        }
    }

    /// Returns the encoded text.
    pub fn into_inner(self) -> String {
        self.encoder.content()
    }

    fn begin_nested(&mut self, key: &str) {
        self.encoder.begin_map(key).begin_tab();
    }

    fn end_nested(&mut self, key: &str) {
        self.encoder.end_tab().end_map(key);
    }
}

fn top_level(kind: &str) -> Error {
    Error::unsupported_type(&format!("{} at the top level (expected a struct or map)", kind))
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty()
        || key.contains(DELIMITER)
        || key.contains('\n')
        || key.contains('\r')
        || key.starts_with(char::is_whitespace)
        || key.starts_with(MAP_BEGIN)
        || key.starts_with(MAP_END)
    {
        return Err(Error::unsupported_type(&format!("key `{}`", key.escape_debug())));
    }
    if key == VERSION_KEY {
        return Err(Error::unsupported_type(&format!(
            "key `{}` (reserved for the document version)",
            VERSION_KEY
        )));
    }
    Ok(())
}

fn check_text(key: &str, text: &str) -> Result<()> {
    if text.contains('\n') || text.contains('\r') {
        return Err(Error::unsupported_type(&format!(
            "multi-line string for key `{}`",
            key
        )));
    }
    Ok(())
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = MapSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<Self::Ok> {
        Err(top_level("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, _v: i64) -> Result<Self::Ok> {
        Err(top_level("integer"))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, _v: u64) -> Result<Self::Ok> {
        Err(top_level("integer"))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, _v: f64) -> Result<Self::Ok> {
        Err(top_level("float"))
    }

    fn serialize_char(self, _v: char) -> Result<Self::Ok> {
        Err(top_level("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<Self::Ok> {
        Err(top_level("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(top_level("byte array"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(top_level("enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequences"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuples"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type("tuple structs"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer::root(self))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(MapSerializer::root(self))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

/// Writes the entries of one struct or map.
///
/// Nested ones remember their title so `end` can close the map they opened.
pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    key: Option<String>,
    closing: Option<String>,
}

impl<'a> MapSerializer<'a> {
    fn root(ser: &'a mut Serializer) -> Self {
        MapSerializer {
            ser,
            key: None,
            closing: None,
        }
    }

    fn finish(self) -> Result<()> {
        if let Some(title) = self.closing {
            self.ser.end_nested(&title);
        }
        Ok(())
    }
}

impl<'a> ser::SerializeMap for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key.serialize(KeySerializer)?;
        check_key(&key)?;
        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        value.serialize(FieldSerializer {
            ser: &mut *self.ser,
            key: &key,
        })
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeStruct for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        check_key(key)?;
        value.serialize(FieldSerializer {
            ser: &mut *self.ser,
            key,
        })
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Serializes the value of one keyed entry.
struct FieldSerializer<'a> {
    ser: &'a mut Serializer,
    key: &'a str,
}

impl FieldSerializer<'_> {
    fn write<T: ToText>(self, value: T) -> Result<()> {
        let text = value.to_text();
        check_text(self.key, &text)?;
        self.ser.encoder.pair(self.key, text);
        Ok(())
    }
}

impl<'a> ser::Serializer for FieldSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = MapSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        self.write(v)
    }

    // f32 keeps its own shortest form instead of widening to f64
    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(Error::unsupported_type("byte arrays"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.write("")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.write(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequences"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuples"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type("tuple structs"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.ser.begin_nested(self.key);
        Ok(MapSerializer {
            ser: self.ser,
            key: None,
            closing: Some(self.key.to_string()),
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

/// Turns a map key into text. Only scalars are accepted.
struct KeySerializer;

fn key_must_be_scalar() -> Error {
    Error::unsupported_type("map keys must be scalars")
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_text())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_scalar())
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_scalar())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_scalar())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_scalar())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_scalar())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_scalar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    fn encode<T: Serialize>(value: &T) -> Result<String> {
        let mut serializer = Serializer::new(EncoderOptions::default());
        value.serialize(&mut serializer)?;
        Ok(serializer.into_inner())
    }

    #[derive(Serialize)]
    struct Window {
        title: String,
        width: u32,
        scale: Option<f32>,
        mode: Mode,
    }

    #[derive(Serialize)]
    enum Mode {
        Windowed,
    }

    #[test]
    fn test_struct_fields_in_order() {
        let window = Window {
            title: "Main: editor".to_string(),
            width: 1280,
            scale: None,
            mode: Mode::Windowed,
        };
        assert_eq!(
            encode(&window).unwrap(),
            "title: Main: editor\nwidth: 1280\nmode: Windowed\n"
        );
    }

    #[test]
    fn test_nested_maps_are_titled_by_key() {
        let mut inner = BTreeMap::new();
        inner.insert(1u8, 'x');
        let mut outer = BTreeMap::new();
        outer.insert("chars", inner);
        assert_eq!(
            encode(&outer).unwrap(),
            " ------------- chars\n  1: x\n ============= chars\n"
        );
    }

    #[test]
    fn test_rejects_unsupported_shapes() {
        assert!(matches!(encode(&5), Err(Error::UnsupportedType(_))));
        assert!(matches!(encode(&vec![1, 2]), Err(Error::UnsupportedType(_))));

        let mut tuple_field = BTreeMap::new();
        tuple_field.insert("pair", (1, 2));
        assert!(matches!(encode(&tuple_field), Err(Error::UnsupportedType(_))));

        let mut multi_line = BTreeMap::new();
        multi_line.insert("note", "a\nb");
        assert!(matches!(encode(&multi_line), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_rejects_keys_that_do_not_read_back() {
        for key in ["", "a: b", "Version", " padded", "------------- x"] {
            let mut map = BTreeMap::new();
            map.insert(key, 1);
            assert!(
                matches!(encode(&map), Err(Error::UnsupportedType(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }
}
