//! Configuration options for the tabkv encoder.
//!
//! [`EncoderOptions`] controls the cosmetic side of the output (how many spaces
//! one tab is worth), the optional version header, and whether an encoder with
//! a sink saves itself when dropped.
//!
//! The options derive Serde traits, so they can be kept in an application's own
//! configuration file:
//!
//! ```rust
//! use serde_tabkv::EncoderOptions;
//!
//! let options: EncoderOptions = serde_json::from_str(r#"{ "tab_size": 4 }"#).unwrap();
//! assert_eq!(options.tab_size, 4);
//! assert!(options.save_on_destroy);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of spaces per tab.
pub const DEFAULT_TAB_SIZE: usize = 2;

/// Configuration options for [`Encoder`](crate::Encoder).
///
/// # Examples
///
/// ```rust
/// use serde_tabkv::EncoderOptions;
///
/// // Defaults: 2-space tabs, save on drop, no version line
/// let options = EncoderOptions::new();
///
/// // Custom configuration
/// let options = EncoderOptions::new()
///     .with_tab_size(10)
///     .with_version("1.2.0")
///     .with_save_on_destroy(false);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    pub tab_size: usize,
    pub save_on_destroy: bool,
    pub version: Option<String>,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            tab_size: DEFAULT_TAB_SIZE,
            save_on_destroy: true,
            version: None,
        }
    }
}

impl EncoderOptions {
    /// Creates default options (2-space tabs, save on destroy, no version).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tabkv::EncoderOptions;
    ///
    /// let options = EncoderOptions::new();
    /// assert_eq!(options.tab_size, 2);
    /// assert!(options.version.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces emitted per open tab.
    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Sets whether an encoder writes its sink when dropped without an explicit close.
    #[must_use]
    pub fn with_save_on_destroy(mut self, save: bool) -> Self {
        self.save_on_destroy = save;
        self
    }

    /// Sets the version emitted as the first line (`Version: <version>`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tabkv::EncoderOptions;
    ///
    /// let options = EncoderOptions::new().with_version("0.3.1");
    /// assert_eq!(options.version.as_deref(), Some("0.3.1"));
    /// ```
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}
