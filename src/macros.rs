/// Registers a text conversion for a user type.
///
/// Expands to [`ToText`](crate::ToText) and [`FromText`](crate::FromText)
/// impls built from two closure-like bodies: the first receives `&Type`, the
/// second the stored `&str` and returns `Option<Type>`.
///
/// ```rust
/// use serde_tabkv::{text_conversion, Decoder, Encoder, Fields};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Vec2f {
///     x: f32,
///     y: f32,
/// }
///
/// text_conversion!(
///     Vec2f,
///     |v| format!("{} {}", v.x, v.y),
///     |text| {
///         let mut fields = Fields::new(text);
///         Some(Vec2f { x: fields.next_as()?, y: fields.next_as()? })
///     }
/// );
///
/// let mut encoder = Encoder::new();
/// encoder.pair("Vec2f", Vec2f { x: 2.0, y: 3.0 });
/// let decoder = Decoder::parse(&encoder.content());
/// assert_eq!(decoder.get("Vec2f").to::<Vec2f>(), Vec2f { x: 2.0, y: 3.0 });
/// ```
#[macro_export]
macro_rules! text_conversion {
    ($ty:ty, |$value:ident| $to_text:expr, |$text:ident| $from_text:expr $(,)?) => {
        impl $crate::ToText for $ty {
            fn to_text(&self) -> ::std::string::String {
                let $value = self;
                $to_text
            }
        }

        impl $crate::FromText for $ty {
            fn from_text($text: &str) -> ::std::option::Option<Self> {
                $from_text
            }
        }
    };
}
