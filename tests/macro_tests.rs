use serde_tabkv::{text_conversion, Decoder, Encoder, Fields, FromText, ToText};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Vec2f {
    x: f32,
    y: f32,
}

text_conversion!(
    Vec2f,
    |v| format!("{} {}", v.x, v.y),
    |text| {
        let mut fields = Fields::new(text);
        Some(Vec2f {
            x: fields.next_as()?,
            y: fields.next_as()?,
        })
    }
);

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Rgb(u8, u8, u8);

text_conversion!(
    Rgb,
    |c| format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2),
    |text| {
        let hex = text.trim().strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    },
);

#[test]
fn test_composite_value_is_one_line() {
    let mut encoder = Encoder::new();
    encoder.pair("Vec2f", Vec2f { x: 2.0, y: 3.0 });
    assert_eq!(encoder.content(), "Vec2f: 2 3\n");
}

#[test]
fn test_composite_value_roundtrip() {
    let position = Vec2f { x: -1.5, y: 1e10 };
    let color = Rgb(255, 128, 0);

    let mut encoder = Encoder::new();
    encoder
        .begin_map("Sprite")
        .pair("position", position)
        .pair("color", color)
        .end_map("Sprite");
    let text = encoder.content();
    assert!(text.contains("color: #ff8000\n"));

    let decoder = Decoder::parse(&text);
    assert_eq!(decoder.get("position").to::<Vec2f>(), position);
    assert_eq!(decoder.get("color").to::<Rgb>(), color);
}

#[test]
fn test_composite_value_defaults_on_bad_text() {
    let decoder = Decoder::parse("position: 1\ncolor: red\n");
    assert_eq!(decoder.get("position").to::<Vec2f>(), Vec2f::default());
    assert_eq!(decoder.get("color").to::<Rgb>(), Rgb::default());
    assert_eq!(decoder.get("color").parse::<Rgb>(), None);
}

#[test]
fn test_conversion_in_option_and_reference() {
    let v = Vec2f { x: 0.5, y: 0.25 };
    assert_eq!((&v).to_text(), "0.5 0.25");
    assert_eq!(Some(v).to_text(), "0.5 0.25");
    assert_eq!(None::<Vec2f>.to_text(), "");
    assert_eq!(Option::<Vec2f>::from_text(""), Some(None));
    assert_eq!(Option::<Vec2f>::from_text("0.5 0.25"), Some(Some(v)));
}

#[test]
fn test_fields_iterates_raw_components() {
    let parts: Vec<&str> = Fields::new("  2   3 4 ").collect();
    assert_eq!(parts, vec!["2", "3", "4"]);
}
