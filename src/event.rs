//! Structural events understood by the [`Encoder`](crate::Encoder).

/// Tells the encoder how to interpret the next value token.
///
/// `Key` and `Value` drive the key/value state. `BeginMap`, `EndMap` and
/// `Title` consume the next token as a label. `BeginTab` and `EndTab` adjust
/// the indentation immediately and consume nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Key,
    Value,
    BeginTab,
    EndTab,
    BeginMap,
    EndMap,
    Title,
}

