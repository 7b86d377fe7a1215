//! tabkv encoding.
//!
//! This module provides the [`Encoder`], which turns a stream of [`Event`]s
//! interleaved with value tokens into tabkv text.
//!
//! ## Overview
//!
//! The encoder is a small state machine:
//!
//! - **Key / Value**: after [`Event::Key`] the next token becomes the pending
//!   key; after [`Event::Value`] the next token completes the pair, which is
//!   written immediately as `key: value`.
//! - **Markers**: [`Event::BeginMap`], [`Event::EndMap`] and [`Event::Title`]
//!   use the next token as their label and leave the key/value state alone.
//! - **Tabs**: [`Event::BeginTab`] and [`Event::EndTab`] change the indentation
//!   of every following line and consume no token.
//!
//! Nothing is validated: unbalanced maps or tabs produce text the
//! [`Decoder`](crate::Decoder) still reads.
//!
//! ## Usage
//!
//! ```rust
//! use serde_tabkv::{Encoder, Event};
//!
//! let mut encoder = Encoder::new();
//! encoder
//!     .event(Event::BeginMap).value("M")
//!     .event(Event::Key).value("a").event(Event::Value).value(1)
//!     .event(Event::BeginTab)
//!     .event(Event::Key).value("b").event(Event::Value).value(2)
//!     .event(Event::EndTab)
//!     .event(Event::EndMap).value("M");
//!
//! assert_eq!(
//!     encoder.content(),
//!     " ------------- M\na: 1\n  b: 2\n ============= M\n"
//! );
//! ```
//!
//! The same document with the convenience methods:
//!
//! ```rust
//! use serde_tabkv::Encoder;
//!
//! let mut encoder = Encoder::new();
//! encoder
//!     .begin_map("M")
//!     .pair("a", 1)
//!     .begin_tab()
//!     .pair("b", 2)
//!     .end_tab()
//!     .end_map("M");
//! assert!(encoder.content().contains("  b: 2\n"));
//! ```

use crate::format::{DELIMITER, MAP_BEGIN, MAP_END, VERSION_KEY};
use crate::{EncoderOptions, Event, FileSink, Result, Sink, ToText};
use std::fmt;
use std::mem;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    Key,
    Value,
}

/// A structural event waiting for its label token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    BeginMap,
    EndMap,
    Title,
}

/// The tabkv encoder.
///
/// Content is kept in memory. When a [`Sink`] is attached, [`Encoder::close`]
/// hands it a snapshot; an encoder dropped without being closed does the same
/// if `save_on_destroy` is set (the default).
pub struct Encoder {
    output: String,
    options: EncoderOptions,
    tab_depth: usize,
    expect: Expect,
    pending_key: String,
    marker: Option<Marker>,
    sink: Option<Box<dyn Sink>>,
    closed: bool,
}

impl Encoder {
    /// Creates an in-memory encoder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    #[must_use]
    pub fn with_options(options: EncoderOptions) -> Self {
        Encoder {
            output: String::with_capacity(256),
            options,
            tab_depth: 0,
            expect: Expect::Key,
            pending_key: String::new(),
            marker: None,
            sink: None,
            closed: false,
        }
    }

    /// Creates an encoder that saves to `path` on close.
    ///
    /// The file is not touched until the encoder is closed or dropped.
    #[must_use]
    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self::new().with_sink(FileSink::new(path))
    }

    /// Attaches the sink that receives the content on close.
    #[must_use]
    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.options.tab_size = tab_size;
    }

    pub fn set_save_on_destroy(&mut self, save: bool) {
        self.options.save_on_destroy = save;
    }

    /// Sets the version written as the first line of the content.
    ///
    /// Can be called at any point of the session; the version line always
    /// precedes the rest of the content.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.options.version = Some(version.into());
    }

    /// Feeds a structural event.
    ///
    /// A map or title marker still waiting for its label is written untitled
    /// first.
    pub fn event(&mut self, event: Event) -> &mut Self {
        if let Some(marker) = self.marker.take() {
            trace!(?marker, next = ?event, "marker superseded before its title");
            self.write_marker(marker, "");
        }

        match event {
            Event::Key => self.expect = Expect::Key,
            Event::Value => self.expect = Expect::Value,
            Event::BeginTab => self.tab_depth += 1,
            Event::EndTab => self.tab_depth = self.tab_depth.saturating_sub(1),
            Event::BeginMap => self.marker = Some(Marker::BeginMap),
            Event::EndMap => self.marker = Some(Marker::EndMap),
            Event::Title => self.marker = Some(Marker::Title),
        }
        self
    }

    /// Feeds a value token, interpreted according to the last event.
    pub fn value<T: ToText>(&mut self, value: T) -> &mut Self {
        let text = value.to_text();

        if let Some(marker) = self.marker.take() {
            self.write_marker(marker, &text);
            return self;
        }

        match self.expect {
            Expect::Key => self.pending_key = text,
            Expect::Value => {
                let key = mem::take(&mut self.pending_key);
                self.write_pair(&key, &text);
                self.expect = Expect::Key;
            }
        }
        self
    }

    /// Writes `key: value`.
    pub fn pair<K: ToText, V: ToText>(&mut self, key: K, value: V) -> &mut Self {
        self.event(Event::Key)
            .value(key)
            .event(Event::Value)
            .value(value)
    }

    pub fn begin_map<T: ToText>(&mut self, title: T) -> &mut Self {
        self.event(Event::BeginMap).value(title)
    }

    pub fn end_map<T: ToText>(&mut self, title: T) -> &mut Self {
        self.event(Event::EndMap).value(title)
    }

    pub fn begin_tab(&mut self) -> &mut Self {
        self.event(Event::BeginTab)
    }

    pub fn end_tab(&mut self) -> &mut Self {
        self.event(Event::EndTab)
    }

    /// Writes a bare title line, ignored when decoding.
    pub fn title<T: ToText>(&mut self, title: T) -> &mut Self {
        self.event(Event::Title).value(title)
    }

    /// Number of tabs currently open.
    #[must_use]
    pub fn tab_depth(&self) -> usize {
        self.tab_depth
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the encoded text, version line first.
    #[must_use]
    pub fn content(&self) -> String {
        match &self.options.version {
            Some(version) => {
                let mut content =
                    String::with_capacity(VERSION_KEY.len() + version.len() + self.output.len() + 3);
                content.push_str(VERSION_KEY);
                content.push_str(DELIMITER);
                content.push_str(version);
                content.push('\n');
                content.push_str(&self.output);
                content
            }
            None => self.output.clone(),
        }
    }

    /// Hands the content to the sink, if any.
    ///
    /// The buffer is kept, so the content stays readable afterwards. Closing
    /// an already closed encoder does nothing.
    ///
    /// # Errors
    ///
    /// Returns the sink's error; the encoder then stays open.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.flush_marker();

        let content = self.content();
        if let Some(sink) = self.sink.as_mut() {
            sink.write(&content)?;
            debug!(bytes = content.len(), "encoder content written to sink");
        }
        self.closed = true;
        Ok(())
    }

    /// Closes the encoder and returns its content.
    ///
    /// The sink is written at most once, even when that write fails.
    ///
    /// # Errors
    ///
    /// Returns the sink's error, if a sink is attached and fails.
    pub fn finish(mut self) -> Result<String> {
        if let Err(err) = self.close() {
            self.options.save_on_destroy = false;
            return Err(err);
        }
        Ok(self.content())
    }

    fn flush_marker(&mut self) {
        if let Some(marker) = self.marker.take() {
            self.write_marker(marker, "");
        }
    }

    fn write_pair(&mut self, key: &str, value: &str) {
        self.write_indent();
        self.output.push_str(key);
        self.output.push_str(DELIMITER);
        self.output.push_str(value);
        self.output.push('\n');
    }

    fn write_marker(&mut self, marker: Marker, title: &str) {
        self.write_indent();
        match marker {
            Marker::BeginMap | Marker::EndMap => {
                let sentinel = if marker == Marker::BeginMap {
                    MAP_BEGIN
                } else {
                    MAP_END
                };
                self.output.push(' ');
                self.output.push_str(sentinel);
                self.output.push(' ');
                self.output.push_str(title);
            }
            Marker::Title => self.output.push_str(title),
        }
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        let width = self.tab_depth * self.options.tab_size;
        self.output.extend(std::iter::repeat(' ').take(width));
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("options", &self.options)
            .field("tab_depth", &self.tab_depth)
            .field("expect", &self.expect)
            .field("pending_key", &self.pending_key)
            .field("marker", &self.marker)
            .field("has_sink", &self.sink.is_some())
            .field("closed", &self.closed)
            .finish()
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        if self.closed || self.sink.is_none() || !self.options.save_on_destroy {
            return;
        }
        if let Err(err) = self.close() {
            warn!(%err, "failed to save encoder content on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Sink for Recorder {
        fn write(&mut self, text: &str) -> Result<()> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    struct Failing;

    impl Sink for Failing {
        fn write(&mut self, _text: &str) -> Result<()> {
            Err(Error::io("disk full"))
        }
    }

    #[test]
    fn test_pair_is_written_when_value_arrives() {
        let mut encoder = Encoder::new();
        encoder.event(Event::Key).value("speed");
        assert_eq!(encoder.content(), "");
        encoder.event(Event::Value).value(2.5f32);
        assert_eq!(encoder.content(), "speed: 2.5\n");
    }

    #[test]
    fn test_repeated_key_token_replaces_pending_key() {
        let mut encoder = Encoder::new();
        encoder
            .event(Event::Key)
            .value("first")
            .value("second")
            .event(Event::Value)
            .value(1);
        assert_eq!(encoder.content(), "second: 1\n");
    }

    #[test]
    fn test_state_returns_to_key_after_value() {
        let mut encoder = Encoder::new();
        encoder
            .event(Event::Key)
            .value("a")
            .event(Event::Value)
            .value(1)
            .value("b");
        assert_eq!(encoder.content(), "a: 1\n");
        encoder.event(Event::Value).value(2);
        assert_eq!(encoder.content(), "a: 1\nb: 2\n");
    }

    #[test]
    fn test_marker_keeps_half_built_pair() {
        let mut encoder = Encoder::new();
        encoder
            .event(Event::Key)
            .value("a")
            .begin_map("M")
            .event(Event::Value)
            .value(1);
        assert_eq!(encoder.content(), " ------------- M\na: 1\n");
    }

    #[test]
    fn test_marker_without_title_is_written_untitled() {
        let mut encoder = Encoder::new();
        encoder.event(Event::BeginMap).pair("k", "v");
        assert_eq!(encoder.content(), " ------------- \nk: v\n");
    }

    #[test]
    fn test_tabs_indent_by_tab_size() {
        let mut encoder = Encoder::with_options(EncoderOptions::new().with_tab_size(10));
        encoder
            .begin_tab()
            .pair("Tab key", 10)
            .begin_tab()
            .end_map("Map 1")
            .end_tab()
            .end_tab()
            .pair("root", true);
        let expected = format!(
            "{}Tab key: 10\n{} ============= Map 1\nroot: true\n",
            " ".repeat(10),
            " ".repeat(20)
        );
        assert_eq!(encoder.content(), expected);
    }

    #[test]
    fn test_end_tab_floors_at_zero() {
        let mut encoder = Encoder::new();
        encoder.end_tab().end_tab().pair("a", 1).begin_tab();
        assert_eq!(encoder.tab_depth(), 1);
        assert_eq!(encoder.content(), "a: 1\n");
    }

    #[test]
    fn test_maps_do_not_indent() {
        let mut encoder = Encoder::new();
        encoder.begin_map("Outer").begin_map("Inner").pair("a", 1);
        assert_eq!(
            encoder.content(),
            " ------------- Outer\n ------------- Inner\na: 1\n"
        );
    }

    #[test]
    fn test_title_line() {
        let mut encoder = Encoder::new();
        encoder.begin_tab().title("Inventory").pair("slots", 12);
        assert_eq!(encoder.content(), "  Inventory\n  slots: 12\n");
    }

    #[test]
    fn test_version_is_first_line() {
        let mut encoder = Encoder::new();
        encoder.pair("a", 1);
        encoder.set_version("1.0.2");
        assert_eq!(encoder.content(), "Version: 1.0.2\na: 1\n");
    }

    #[test]
    fn test_close_writes_once() {
        let recorder = Recorder::default();
        let mut encoder = Encoder::new().with_sink(recorder.clone());
        encoder.pair("a", 1);
        encoder.close().unwrap();
        encoder.close().unwrap();
        assert!(encoder.is_closed());
        drop(encoder);
        assert_eq!(*recorder.0.borrow(), vec!["a: 1\n".to_string()]);
    }

    #[test]
    fn test_drop_saves_when_not_closed() {
        let recorder = Recorder::default();
        {
            let mut encoder = Encoder::new().with_sink(recorder.clone());
            encoder.set_version("2.0.0");
            encoder.pair("a", 1);
        }
        assert_eq!(
            *recorder.0.borrow(),
            vec!["Version: 2.0.0\na: 1\n".to_string()]
        );
    }

    #[test]
    fn test_drop_respects_save_on_destroy() {
        let recorder = Recorder::default();
        {
            let mut encoder = Encoder::new().with_sink(recorder.clone());
            encoder.set_save_on_destroy(false);
            encoder.pair("a", 1);
        }
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_failed_close_stays_open() {
        let mut encoder = Encoder::new().with_sink(Failing);
        encoder.pair("a", 1);
        assert!(matches!(encoder.close(), Err(Error::Io(_))));
        assert!(!encoder.is_closed());
    }

    #[test]
    fn test_failed_finish_writes_sink_once() {
        struct Counting(Rc<RefCell<usize>>);

        impl Sink for Counting {
            fn write(&mut self, _text: &str) -> Result<()> {
                *self.0.borrow_mut() += 1;
                Err(Error::io("disk full"))
            }
        }

        let calls = Rc::new(RefCell::new(0));
        let mut encoder = Encoder::new().with_sink(Counting(Rc::clone(&calls)));
        encoder.pair("a", 1);
        assert!(matches!(encoder.finish(), Err(Error::Io(_))));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_finish_flushes_armed_marker() {
        let mut encoder = Encoder::new();
        encoder.pair("a", 1).event(Event::EndMap);
        assert_eq!(encoder.finish().unwrap(), "a: 1\n ============= \n");
    }
}
