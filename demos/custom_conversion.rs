//! Storing your own types with ToText / FromText.
//!
//! Run with: cargo run --example custom_conversion

use serde_tabkv::{text_conversion, Decoder, Encoder, Fields, FromText, ToText};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Vec2f {
    x: f32,
    y: f32,
}

// With the macro
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
enum Team {
    #[default]
    Neutral,
    Red,
    Blue,
}

// By hand
impl ToText for Team {
    fn to_text(&self) -> String {
        match self {
            Team::Neutral => "neutral",
            Team::Red => "red",
            Team::Blue => "blue",
        }
        .to_string()
    }
}

impl FromText for Team {
    fn from_text(text: &str) -> Option<Self> {
        match text.trim() {
            "neutral" => Some(Team::Neutral),
            "red" => Some(Team::Red),
            "blue" => Some(Team::Blue),
            _ => None,
        }
    }
}

fn main() {
    let mut encoder = Encoder::new();
    encoder
        .begin_map("Unit")
        .pair("position", Vec2f { x: 2.0, y: 3.0 })
        .pair("velocity", Vec2f { x: -0.5, y: 0.0 })
        .pair("team", Team::Blue)
        .end_map("Unit");

    let text = encoder.content();
    println!("Encoded:\n{}", text);

    let decoder = Decoder::parse(&text);
    let position = decoder.get("position").to::<Vec2f>();
    let velocity = decoder.get("velocity").to::<Vec2f>();
    let team = decoder.get("team").to::<Team>();
    println!("position = {:?}", position);
    println!("velocity = {:?}", velocity);
    println!("team = {:?}", team);

    // Unparsable text falls back to the default value
    let broken = Decoder::parse("position: north\nteam: green\n");
    println!(
        "broken position = {:?}, team = {:?}",
        broken.get("position").to::<Vec2f>(),
        broken.get("team").to::<Team>()
    );
    println!(
        "strict parse of position = {:?}",
        broken.get("position").parse::<Vec2f>()
    );
}
