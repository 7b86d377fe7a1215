//! Error types for tabkv I/O and the Serde bridge.
//!
//! The encoding/decoding engine itself never fails: missing keys, unparsable
//! values and unbalanced map markers all degrade to defaults (see
//! [`RawValue::to`](crate::RawValue::to)). [`Error`] is only produced at the
//! edges of the crate:
//!
//! - **I/O Errors**: a [`Sink`](crate::Sink) failed to write, or
//!   [`Decoder::open`](crate::Decoder::open) could not read its input
//! - **Unsupported Types**: the Serde bridge was handed a shape the format has
//!   no notation for (sequences, tuples, data-carrying enum variants)
//! - **Type Mismatches**: the Serde bridge found text that does not parse as
//!   the requested field type
//!
//! ## Examples
//!
//! ```rust
//! use serde_tabkv::{to_string, Error};
//!
//! let result = to_string(&vec![1, 2, 3]);
//! assert!(matches!(result, Err(Error::UnsupportedType(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised outside the lenient core.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A value kind the format cannot express
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Stored text did not parse as the requested type
    #[error("Type mismatch for key `{key}`: expected {expected}, found `{found}`")]
    TypeMismatch {
        key: String,
        expected: String,
        found: String,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error for a key whose text could not be converted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tabkv::Error;
    ///
    /// let err = Error::type_mismatch("port", "u16", "eighty");
    /// assert!(err.to_string().contains("expected u16"));
    /// ```
    pub fn type_mismatch(key: &str, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for shapes the format cannot express.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tabkv::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
