//! Writing a save file event by event, then reading it back.
//!
//! Run with: cargo run --example events

use serde_tabkv::{text_conversion, Decoder, Encoder, EncoderOptions, Event, Fields};
use std::error::Error;

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

fn main() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join("serde_tabkv_events");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("save.txt");

    {
        let mut encoder = Encoder::to_path(&path);
        encoder.set_tab_size(10);
        encoder.set_version("1.0.0");

        encoder
            .event(Event::BeginMap)
            .value("Map 0")
            .event(Event::Key)
            .value("Key")
            .event(Event::Value)
            .value("Value")
            .event(Event::Key)
            .value("Vec2f")
            .event(Event::Value)
            .value(Vec2f { x: 2.0, y: 3.0 })
            .event(Event::BeginMap)
            .value("Map 1")
            .event(Event::Key)
            .value("Key Map 1")
            .event(Event::Value)
            .value(2)
            .event(Event::EndMap)
            .value("Map 1")
            .event(Event::BeginTab)
            .event(Event::Key)
            .value("Tab key")
            .event(Event::Value)
            .value(10)
            .event(Event::EndTab)
            .event(Event::EndMap)
            .value("Map 0");

        println!("Written to {}:\n{}", path.display(), encoder.content());
        // Dropping the encoder saves it
    }

    let mut decoder = Decoder::open(&path)?;
    println!("Decoded table:\n{}", decoder);

    // The cursor starts at the deepest level
    println!("Key Map 1 = {}", decoder.get("Key Map 1").to::<f32>());

    decoder.pop_depth();
    println!("Key = {}", decoder.get("Key"));
    println!("Vec2f = {:?}", decoder.get("Vec2f").to::<Vec2f>());
    println!("Tab key = {}", decoder.get("Tab key").to::<i32>());

    // An in-memory encoder writes nothing anywhere
    let mut scratch = Encoder::with_options(EncoderOptions::new().with_save_on_destroy(false));
    scratch.pair("unsaved", true);
    println!("Scratch:\n{}", scratch.content());

    std::fs::remove_file(&path)?;
    Ok(())
}
