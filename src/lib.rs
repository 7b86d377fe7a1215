//! # serde_tabkv
//!
//! A line-oriented, hand-editable key/value text format ("tabkv") with an
//! event-driven [`Encoder`], a depth-scoped [`Decoder`], and Serde support.
//!
//! ## What is tabkv?
//!
//! tabkv targets configuration and save data that people open in a text editor:
//!
//! ```text
//! Version: 1.0.0
//!  ------------- Player
//! name: Alice
//! position: 2 3
//!   hp: 10
//!  ============= Player
//! ```
//!
//! - **One pair per line**: `key: value`, split at the first `": "`
//! - **Maps**: begin/end sentinel lines open and close a lookup level
//! - **Tabs**: indentation is cosmetic and ignored when reading
//! - **Lenient**: reading never fails; missing keys and unparsable values fall
//!   back to type defaults
//!
//! ## Quick Start
//!
//! ### Writing and reading with events
//!
//! ```rust
//! use serde_tabkv::{Decoder, Encoder};
//!
//! let mut encoder = Encoder::new();
//! encoder
//!     .begin_map("M")
//!     .pair("a", 1)
//!     .begin_tab()
//!     .pair("b", 2)
//!     .end_tab()
//!     .end_map("M");
//!
//! let decoder = Decoder::parse(&encoder.content());
//! assert_eq!(decoder.levels().len(), 2);
//! assert_eq!(decoder.get("b").to::<i32>(), 2);
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tabkv::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Audio {
//!     volume: u8,
//!     muted: bool,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     audio: Audio,
//! }
//!
//! let config = Config {
//!     name: "Alice".to_string(),
//!     audio: Audio { volume: 7, muted: false },
//! };
//!
//! let text = to_string(&config).unwrap();
//! let config_back: Config = from_str(&text).unwrap();
//! assert_eq!(config, config_back);
//! ```
//!
//! ### Your own types
//!
//! Anything implementing [`ToText`] and [`FromText`] can be written and read;
//! [`text_conversion!`] implements both from two closures.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Serde round trip of a nested struct
//! - **`events.rs`** - Driving the encoder event by event
//! - **`custom_conversion.rs`** - Storing a 2D vector
//! - **`depth_lookup.rs`** - Moving the lookup cursor between maps
//! - **`custom_options.rs`** - Tab size, version line and file output
//!
//! Run any example with: `cargo run --example <name>`

pub mod convert;
pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod event;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod sink;
pub mod value;

pub use convert::{Fields, FromText, ToText};
pub use de::Deserializer;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use event::Event;
pub use map::{Level, Section};
pub use options::{EncoderOptions, DEFAULT_TAB_SIZE};
pub use ser::Serializer;
pub use sink::{FileSink, Sink};
pub use value::RawValue;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Serialize a struct or map to a tabkv string.
///
/// # Examples
///
/// ```rust
/// use serde_tabkv::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for values with no tabkv notation
/// (top-level scalars, sequences, tuples, data-carrying enum variants).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncoderOptions::default())
}

/// Serialize a struct or map to a tabkv string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tabkv::{to_string_with_options, EncoderOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Inner { x: i32 }
///
/// #[derive(Serialize)]
/// struct Outer { inner: Inner }
///
/// let options = EncoderOptions::new().with_tab_size(4).with_version("2.1.0");
/// let text = to_string_with_options(&Outer { inner: Inner { x: 1 } }, options).unwrap();
/// assert_eq!(
///     text,
///     "Version: 2.1.0\n ------------- inner\n    x: 1\n ============= inner\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncoderOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize a struct or map to a writer in tabkv format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, EncoderOptions::default())
}

/// Serialize a struct or map to a writer in tabkv format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncoderOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a decoded table.
///
/// Reading starts at the top-level section, so the decoder's lookup depth does not
/// matter. `T` may borrow from the decoder.
///
/// # Errors
///
/// Returns an error if a field is missing or its text does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_decoder<'de, T>(decoder: &'de Decoder) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::new(decoder))
}

/// Deserialize an instance of type `T` from tabkv text.
///
/// # Examples
///
/// ```rust
/// use serde_tabkv::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\n  y: 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if a field is missing or its text does not parse as the
/// field's type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let decoder = Decoder::parse(s);
    from_decoder(&decoder)
}

/// Deserialize an instance of type `T` from an I/O stream of tabkv.
///
/// # Errors
///
/// Returns an error if reading from the reader fails, or the data cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let decoder = Decoder::from_reader(reader)?;
    from_decoder(&decoder)
}

/// Deserialize an instance of type `T` from bytes of tabkv text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
